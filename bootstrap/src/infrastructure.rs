//! 基础设施资源管理

use adapter_postgres::{PgGateway, PostgresConfig};
use config::AppConfig;
use errors::{AppError, AppResult};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// 基础设施资源容器
///
/// 由 bootstrap 统一初始化，克隆开销很小。
#[derive(Clone)]
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// 持久化网关
    gateway: PgGateway,
    /// 进程级取消 token
    shutdown: CancellationToken,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 数据库不可达时直接返回错误，不做重试。
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let pg_config = PostgresConfig::from_app_config(&config).map_err(AppError::config)?;
        let gateway = PgGateway::connect(&pg_config).await?;

        Ok(Self {
            config,
            gateway,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn gateway(&self) -> PgGateway {
        self.gateway.clone()
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.gateway.pool().clone()
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 释放资源
    pub async fn close(&self) {
        self.gateway.close().await;
    }
}
