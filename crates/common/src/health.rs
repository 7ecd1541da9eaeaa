//! 通用健康检查模块
//!
//! 提供健康检查的通用 trait 和基础类型

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 基础健康检查结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseHealthResult {
    /// 是否健康
    pub healthy: bool,
    /// 延迟（毫秒）
    pub latency_ms: Option<u64>,
    /// 错误信息
    pub error: Option<String>,
}

impl BaseHealthResult {
    /// 创建健康结果
    pub fn healthy(latency_ms: u64) -> Self {
        Self {
            healthy: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    /// 创建不健康结果
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            latency_ms: None,
            error: Some(error.into()),
        }
    }

    /// 创建超时结果
    pub fn timeout() -> Self {
        Self {
            healthy: false,
            latency_ms: None,
            error: Some("Health check timed out".to_string()),
        }
    }
}

/// 健康检查 trait
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// 执行健康检查
    async fn check(&self) -> BaseHealthResult;

    /// 获取组件名称
    fn component_name(&self) -> &'static str;
}

/// 在超时限制内执行健康检查
pub async fn check_with_timeout(check: &dyn HealthCheck, timeout: Duration) -> BaseHealthResult {
    let start = Instant::now();
    match tokio::time::timeout(timeout, check.check()).await {
        Ok(result) => {
            if result.healthy {
                debug!(
                    component = check.component_name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Health check passed"
                );
            } else {
                warn!(
                    component = check.component_name(),
                    error = ?result.error,
                    "Health check failed"
                );
            }
            result
        }
        Err(_) => {
            warn!(component = check.component_name(), "Health check timed out");
            BaseHealthResult::timeout()
        }
    }
}
