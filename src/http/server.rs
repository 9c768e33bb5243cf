//! Per-address HTTP server task.
//!
//! # Responsibilities
//! - Bind the listening socket for one configured address
//! - Serve the shared Router until told to stop
//! - Watch the shared cancellation token and drain gracefully
//! - Enforce the drain grace period (force-close on overrun)
//!
//! # Lifecycle
//! ```text
//! Binding → Serving → Draining → Closed
//!    │         │
//!    │         └─ Failed (unexpected accept error)
//!    └─ Failed (bind error)
//! ```
//!
//! # Design Decisions
//! - Cancellation-induced closure is never an error, even when the grace
//!   period is exceeded (the overrun is logged and the drain is cut short)
//! - Cancellation before or during bind must not hang: a failed bind still
//!   surfaces as an error, a successful one drains immediately
//! - Exactly one "Listener stopped" line per listener, success or failure

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::ListenerConfig;
use crate::observability::metrics;

/// Terminal failure of a listener.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Failed to acquire the configured address (port in use, permission).
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed for a reason other than intentional shutdown.
    #[error("accept loop failed on {addr}: {source}")]
    Accept {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The listener task panicked or was aborted by the runtime.
    #[error("listener task failed: {reason}")]
    Task { reason: String },
}

/// HTTP server bound to a single address, serving the shared router.
pub struct HttpServer {
    router: Router,
    bind_address: String,
    grace: Duration,
}

impl HttpServer {
    /// Create a server for one listener address.
    ///
    /// `grace` bounds how long draining may take after shutdown is
    /// requested; in-flight connections still open past it are cut.
    pub fn new(config: &ListenerConfig, router: Router, grace: Duration) -> Self {
        Self {
            router,
            bind_address: config.bind_address.clone(),
            grace,
        }
    }

    /// Address this server will bind to.
    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    /// Run the server until the token is cancelled or a fatal error occurs.
    ///
    /// Returns `Ok(())` for cancellation-induced shutdown (graceful or
    /// forced) and an error only for bind/accept failures.
    pub async fn run(self, token: CancellationToken) -> Result<(), ServeError> {
        let addr = self.bind_address.clone();
        let result = self.serve(token).await;

        match &result {
            Ok(()) => tracing::info!(address = %addr, "Listener stopped"),
            Err(e) => tracing::error!(address = %addr, error = %e, "Listener stopped"),
        }
        metrics::record_listener_stop(&addr, result.is_ok());

        result
    }

    async fn serve(self, token: CancellationToken) -> Result<(), ServeError> {
        let Self {
            router,
            bind_address,
            grace,
        } = self;

        tracing::debug!(address = %bind_address, "Binding listener");
        let listener = TcpListener::bind(&bind_address).await.map_err(|source| {
            ServeError::Bind {
                addr: bind_address.clone(),
                source,
            }
        })?;
        let local_addr = listener.local_addr().map_err(|source| ServeError::Bind {
            addr: bind_address.clone(),
            source,
        })?;

        tracing::info!(address = %local_addr, "Listener serving");

        let drain_token = token.clone();
        let serve = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            drain_token.cancelled().await;
            tracing::info!(address = %local_addr, "Draining connections");
        })
        .into_future();

        // The serve future resolves once the drain completes naturally;
        // the timer arm cuts it off when in-flight work outlives the grace.
        let forced = async {
            token.cancelled().await;
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = serve => result.map_err(|source| ServeError::Accept {
                addr: bind_address.clone(),
                source,
            }),
            _ = forced => {
                tracing::warn!(
                    address = %local_addr,
                    grace = ?grace,
                    "Grace period exceeded, forcing close"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    fn test_router() -> Router {
        Router::new().route("/", get(|| async { "ok" }))
    }

    fn test_config(addr: &str) -> ListenerConfig {
        ListenerConfig {
            bind_address: addr.to_string(),
        }
    }

    #[tokio::test]
    async fn cancellation_induced_stop_is_clean() {
        let server = HttpServer::new(
            &test_config("127.0.0.1:0"),
            test_router(),
            Duration::from_secs(1),
        );
        let token = CancellationToken::new();
        let handle = tokio::spawn(server.run(token.clone()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();

        let result = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("listener should stop within grace")
            .unwrap();
        assert!(result.is_ok(), "clean shutdown must not be an error");
    }

    #[tokio::test]
    async fn bind_conflict_is_an_error() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupied.local_addr().unwrap().to_string();

        let server = HttpServer::new(&test_config(&addr), test_router(), Duration::from_secs(1));
        let result = server.run(CancellationToken::new()).await;

        match result {
            Err(ServeError::Bind { addr: failed, .. }) => assert_eq!(failed, addr),
            other => panic!("expected bind error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancellation_before_bind_does_not_hang() {
        let token = CancellationToken::new();
        token.cancel();

        let server = HttpServer::new(
            &test_config("127.0.0.1:0"),
            test_router(),
            Duration::from_secs(1),
        );
        let result = tokio::time::timeout(Duration::from_secs(2), server.run(token))
            .await
            .expect("pre-cancelled listener must resolve promptly");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn cancellation_before_bind_still_surfaces_bind_error() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupied.local_addr().unwrap().to_string();

        let token = CancellationToken::new();
        token.cancel();

        let server = HttpServer::new(&test_config(&addr), test_router(), Duration::from_secs(1));
        let result = tokio::time::timeout(Duration::from_secs(2), server.run(token))
            .await
            .expect("must resolve promptly");
        assert!(matches!(result, Err(ServeError::Bind { .. })));
    }
}
