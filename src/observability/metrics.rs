//! Metrics collection and exposition.
//!
//! # Metrics
//! - `webserver_requests_total` (counter): requests by method and status
//! - `webserver_request_duration_seconds` (histogram): latency distribution
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so handlers and tests can record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];

    metrics::counter!("webserver_requests_total", &labels).increment(1);
    metrics::histogram!("webserver_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
