//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tenant_router_requests_total` (counter): requests by tenant kind and action
//! - `tenant_router_request_duration_seconds` (histogram): latency by action
//!
//! # Design Decisions
//! - Labels are static strings only; tenant labels never become metric labels
//! - Recording is a no-op until a recorder is installed

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "tenant_router_requests_total";
pub const REQUEST_DURATION: &str = "tenant_router_request_duration_seconds";

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            metrics::describe_counter!(REQUESTS_TOTAL, "Requests handled, by tenant kind and action");
            metrics::describe_histogram!(
                REQUEST_DURATION,
                metrics::Unit::Seconds,
                "Time from request arrival to response"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
///
/// `tenant` is `app`, `root`, `custom`, or `none` for bypassed paths.
pub fn record_request(tenant: &'static str, action: &'static str, start: Instant) {
    metrics::counter!(REQUESTS_TOTAL, "tenant" => tenant, "action" => action).increment(1);
    metrics::histogram!(REQUEST_DURATION, "action" => action)
        .record(start.elapsed().as_secs_f64());
}
