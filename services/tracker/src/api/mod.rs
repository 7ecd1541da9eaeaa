//! HTTP 接口层

mod dto;
mod error;
mod handlers;
mod health;
mod validation;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tokio_util::sync::CancellationToken;

use crate::application::TrackerService;
use crate::domain::RequestContext;

pub use dto::{CreateTrackerRequest, UpdateTrackerRequest};
pub use error::{ApiError, Operation};
pub use validation::{parse_id, validate_create, validate_update};

/// 健康检查的默认超时
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TrackerService>,
    pub health: Arc<dyn common::HealthCheck>,
    pub request_timeout: Duration,
    pub health_timeout: Duration,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        service: Arc<TrackerService>,
        health: Arc<dyn common::HealthCheck>,
        request_timeout: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            service,
            health,
            request_timeout,
            health_timeout: HEALTH_CHECK_TIMEOUT,
            shutdown,
        }
    }

    /// 为单个请求创建上下文，取消信号挂在进程关闭信号之下
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.request_timeout, self.shutdown.child_token())
    }
}

/// Tracker 路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/trackers", get(handlers::list_trackers).post(handlers::create_tracker))
        .route(
            "/trackers/{id}",
            get(handlers::get_tracker)
                .put(handlers::update_tracker)
                .delete(handlers::delete_tracker),
        )
        .route("/health", get(health::health_check))
        .with_state(state)
}
