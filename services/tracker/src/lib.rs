//! Tracker Service - 时间跟踪服务
//!
//! 提供 tracker 的增删改查 HTTP 接口

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use adapter_postgres::PostgresHealthCheck;
use axum::Router;
use bootstrap::Infrastructure;
use errors::AppResult;
use tracing::info;

use api::AppState;
use application::TrackerService;
use infrastructure::persistence::{PostgresTrackerRepository, ensure_schema};

/// 建表并组装路由
pub async fn build_router(infra: Infrastructure) -> AppResult<Router> {
    info!("Initializing Tracker Service...");

    ensure_schema(&infra.gateway()).await?;

    let repo = Arc::new(PostgresTrackerRepository::new(infra.postgres_pool()));
    let service = Arc::new(TrackerService::new(repo));
    let health = Arc::new(PostgresHealthCheck::new(infra.gateway()));

    let state = AppState::new(
        service,
        health,
        infra.config().request_timeout(),
        infra.shutdown_token(),
    );

    Ok(api::router(state))
}
