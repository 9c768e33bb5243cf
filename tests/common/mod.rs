//! Shared utilities for integration testing.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use multiserve::config::ListenerConfig;
use multiserve::http::{build_router, AppState, HttpServer, ServeError};
use multiserve::lifecycle::{ServerGroup, Shutdown};

/// Start a full server group on the given addresses.
///
/// Returns the shutdown coordinator and a handle yielding the group's
/// aggregate result.
pub fn start_group(
    addrs: &[&str],
    grace: Duration,
) -> (Shutdown, JoinHandle<Result<(), ServeError>>) {
    let shutdown = Shutdown::new();
    let state = AppState {
        shutdown: shutdown.clone(),
    };
    let router = build_router(state, Duration::from_secs(5));

    let mut group = ServerGroup::new(&shutdown);
    for addr in addrs {
        let listener = ListenerConfig {
            bind_address: addr.to_string(),
        };
        group.spawn_listener(HttpServer::new(&listener, router.clone(), grace));
    }

    (shutdown, tokio::spawn(group.wait()))
}

/// HTTP client for talking to local listeners.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Wait until the address accepts TCP connections.
#[allow(dead_code)]
pub async fn wait_until_serving(addr: &str) {
    for _ in 0..100 {
        if TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("listener on {} never came up", addr);
}

/// Whether the address currently accepts TCP connections.
#[allow(dead_code)]
pub async fn is_serving(addr: &str) -> bool {
    TcpStream::connect(addr).await.is_ok()
}
