//! PostgreSQL 健康检查

use std::time::Instant;

use async_trait::async_trait;
use common::{BaseHealthResult, HealthCheck};
use tracing::error;

use crate::PgGateway;

/// 连接池级别的健康检查
pub struct PostgresHealthCheck {
    gateway: PgGateway,
}

impl PostgresHealthCheck {
    pub fn new(gateway: PgGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl HealthCheck for PostgresHealthCheck {
    async fn check(&self) -> BaseHealthResult {
        let start = Instant::now();
        match self.gateway.ping().await {
            Ok(()) => BaseHealthResult::healthy(start.elapsed().as_millis() as u64),
            Err(e) => {
                error!(error = %e, "PostgreSQL health check failed");
                BaseHealthResult::unhealthy(e.to_string())
            }
        }
    }

    fn component_name(&self) -> &'static str {
        "postgres"
    }
}
