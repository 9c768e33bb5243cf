//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters; Prometheus scrape endpoint when enabled)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging with per-field values, not formatted strings
//! - Request ID flows through the middleware stack
//! - Metrics are cheap (atomic increments) and optional

pub mod logging;
pub mod metrics;
