//! multiserve
//!
//! One HTTP handler served on N independently bound addresses, with one
//! shared cancellation context coordinating their shutdown.
//!
//! # Architecture Overview
//!
//! ```text
//!   SIGINT ──► signals::watch ──┐
//!                               ├──► Shutdown (one token, flips once)
//!   GET /stop ─────────────────┘        │
//!                                       ▼ child token
//!                               ┌───────────────────┐
//!                               │    ServerGroup    │
//!                               │  (fan-out/fan-in) │
//!                               └──┬───────┬────────┘
//!                                  ▼       ▼
//!                            HttpServer  HttpServer   (one per address,
//!                             :8080       :9090        shared Router)
//!                                  │       │
//!                                  ▼       ▼
//!                          drain within grace, report outcome
//!                                       │
//!                                       ▼
//!                    wait(): first error (stops siblings) or clean exit
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use multiserve::config::{load_config, Config};
use multiserve::http::{build_router, AppState, HttpServer};
use multiserve::lifecycle::{signals, ServerGroup, Shutdown};
use multiserve::observability::{logging, metrics};

/// Multi-listener HTTP server with coordinated graceful shutdown.
#[derive(Parser, Debug)]
#[command(name = "multiserve")]
#[command(about = "Serve one handler on many addresses with coordinated shutdown")]
#[command(version)]
struct Args {
    /// Path to a TOML config file; the stock two-listener loopback pair is
    /// used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    tracing::info!("multiserve v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::standard(),
    };

    tracing::info!(
        listeners = config.listeners.len(),
        grace_secs = config.shutdown.grace_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();

    // OS signal path; flips the same state as GET /stop.
    let signal_events = signals::install()?;
    tokio::spawn(signals::watch(signal_events, shutdown.clone()));

    let state = AppState {
        shutdown: shutdown.clone(),
    };
    let router = build_router(state, Duration::from_secs(config.timeouts.request_secs));

    let grace = Duration::from_secs(config.shutdown.grace_secs);
    let mut group = ServerGroup::new(&shutdown);
    for listener in &config.listeners {
        group.spawn_listener(HttpServer::new(listener, router.clone(), grace));
    }

    if let Err(e) = group.wait().await {
        tracing::error!(error = %e, "Server group exited with failure");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
