//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by route, status
//! - `relay_request_duration_seconds` (histogram): latency by route
//! - `relay_commands_forwarded_total` (counter): commands delivered
//! - `relay_dial_retries_total` (counter): transient dial retries

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
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

/// Record one finished HTTP request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    counter!(
        "relay_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!("relay_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one command delivered to the control daemon.
pub fn record_forwarded() {
    counter!("relay_commands_forwarded_total").increment(1);
}

/// Record one transient dial retry.
pub fn record_dial_retry() {
    counter!("relay_dial_retries_total").increment(1);
}
