//! Prometheus 指标端点

use axum::{Router, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;

/// `GET /metrics`
pub fn metrics_routes(handle: PrometheusHandle) -> Router {
    Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    )
}
