//! Metrics collection and exposition.
//!
//! # Metrics
//! - `devserver_requests_total` (counter): requests by method, status, outcome
//! - `devserver_request_duration_seconds` (histogram): latency distribution
//!
//! Outcome labels: `forward`, `spa`, `introspection`, `none`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged, not fatal: a dev server without metrics
/// is still a working dev server.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, outcome: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!("devserver_requests_total", &labels).increment(1);
    histogram!("devserver_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}
