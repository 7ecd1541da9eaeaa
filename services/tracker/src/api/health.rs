//! 健康检查端点

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use telemetry::HealthStatus;

use super::AppState;

/// GET /health
///
/// 正常时返回纯文本 `OK`，数据库不可用时返回 503 和检查明细。
pub async fn health_check(State(state): State<AppState>) -> Response {
    let result = common::check_with_timeout(state.health.as_ref(), state.health_timeout).await;

    if result.healthy {
        return (StatusCode::OK, "OK").into_response();
    }

    let mut status = HealthStatus::new();
    status.add_check(state.health.component_name(), false, result.error);
    (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
}
