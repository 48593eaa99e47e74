//! Metrics collection and exposition.
//!
//! # Metrics
//! - `blog_upstream_requests_total` (counter): upstream calls by method, status, success
//! - `blog_upstream_request_duration_seconds` (histogram): upstream latency
//! - `blog_page_renders_total` (counter): rendered pages by route and upstream outcome
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exporter is optional and bound to its own address

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one normalized upstream call.
pub fn record_upstream_call(method: &str, status: u16, success: bool, start: Instant) {
    counter!(
        "blog_upstream_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "success" => success.to_string()
    )
    .increment(1);
    histogram!("blog_upstream_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one rendered page.
pub fn record_page_render(route: &'static str, upstream_success: bool) {
    counter!(
        "blog_page_renders_total",
        "route" => route,
        "upstream_success" => upstream_success.to_string()
    )
    .increment(1);
}
