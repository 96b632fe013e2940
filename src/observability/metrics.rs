//! Metrics collection and exposition.
//!
//! # Metrics
//! - `autoroute_routes_bound_total` (counter): routes bound, by controller and verb
//! - `autoroute_registration_failures_total` (counter): failed registrations, by controller and kind

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::convention::VerbSpec;

/// Starts the Prometheus scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_route_bound(controller: &'static str, verb: VerbSpec) {
    metrics::counter!(
        "autoroute_routes_bound_total",
        "controller" => controller,
        "verb" => verb.to_string()
    )
    .increment(1);
}

pub fn record_registration_failure(controller: &'static str, kind: &'static str) {
    metrics::counter!(
        "autoroute_registration_failures_total",
        "controller" => controller,
        "kind" => kind
    )
    .increment(1);
}
