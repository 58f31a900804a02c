//! Metrics collection and exposition.
//!
//! # Metrics
//! - `echo_requests_total` (counter): requests by method, status
//! - `echo_request_duration_seconds` (histogram): mapping + serialization latency
//! - `echo_parse_errors_total` (counter): individual parse failures inside composite errors

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one answered request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "echo_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("echo_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Count the individual failures of one composite error.
pub fn record_parse_errors(count: usize) {
    metrics::counter!("echo_parse_errors_total").increment(count as u64);
}
