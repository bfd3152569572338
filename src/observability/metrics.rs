//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by route, status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_upstream_calls_total` (counter): RPCs by service, outcome
//! - `gateway_upstream_call_duration_seconds` (histogram): RPC latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed inbound request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "gateway_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("gateway_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream RPC.
pub fn record_upstream_call(service: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!(
        "gateway_upstream_calls_total",
        "service" => service,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("gateway_upstream_call_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}
