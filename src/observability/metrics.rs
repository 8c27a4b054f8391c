//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): total requests by action, status
//! - `relay_request_duration_seconds` (histogram): latency distribution
//!
//! Labels carry the action name ("none" when the request never reached
//! dispatch) and the response status code.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged and otherwise ignored; the relay works
/// without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(action: &str, status: u16, start: Instant) {
    metrics::counter!(
        "relay_requests_total",
        "action" => action.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "relay_request_duration_seconds",
        "action" => action.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
