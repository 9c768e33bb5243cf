//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define server metrics (requests, listener outcomes)
//! - Expose a Prometheus-compatible metrics endpoint when enabled
//!
//! # Metrics
//! - `multiserve_requests_total` (counter): requests by route
//! - `multiserve_listener_stops_total` (counter): listener terminations by
//!   address and outcome
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic increments via the metrics facade)
//! - The exposition endpoint runs outside the coordinated listener group;
//!   it dies with the process, not with the drain

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and start the exposition endpoint.
///
/// Failure to install is logged, not fatal: the server runs without
/// metrics rather than refusing to start.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Count one handled request on `route`.
pub fn record_request(route: &'static str) {
    counter!("multiserve_requests_total", "route" => route).increment(1);
}

/// Count one listener termination.
pub fn record_listener_stop(addr: &str, clean: bool) {
    let outcome = if clean { "clean" } else { "failed" };
    counter!(
        "multiserve_listener_stops_total",
        "address" => addr.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
