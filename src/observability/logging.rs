//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Configure log level from flags and environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via `RUST_LOG`; `--verbose` overrides

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `verbose` forces debug-level output for the crate and its middleware;
/// otherwise `RUST_LOG` is honored with an info-level fallback.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("multiserve=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "multiserve=info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
