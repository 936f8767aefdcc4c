//! Metrics collection and exposition.
//!
//! # Metrics
//! - `labradorite_requests_total` (counter): requests by method, status, endpoint
//! - `labradorite_request_duration_seconds` (histogram): latency distribution
//! - `labradorite_cache_lookups_total` (counter): cache hits and misses by space
//! - `labradorite_cached_devices` (gauge): cached documents by space
//! - `labradorite_reloads_total` (counter): reloads by result

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::device::TargetSpace;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, endpoint: &'static str, start: Instant) {
    metrics::counter!(
        "labradorite_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "endpoint" => endpoint
    )
    .increment(1);
    metrics::histogram!("labradorite_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_lookup(space: TargetSpace, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!(
        "labradorite_cache_lookups_total",
        "space" => space.as_str(),
        "result" => result
    )
    .increment(1);
}

pub fn record_cached_devices(space: TargetSpace, count: usize) {
    metrics::gauge!("labradorite_cached_devices", "space" => space.as_str()).set(count as f64);
}

pub fn record_reload(success: bool) {
    let result = if success { "ok" } else { "partial" };
    metrics::counter!("labradorite_reloads_total", "result" => result).increment(1);
}
