//! PostgreSQL 连接管理

use errors::{AppError, AppResult};
use sqlx::PgPool;
use sqlx::postgres::{PgPoolOptions, PgQueryResult};
use tracing::info;

use crate::PostgresConfig;

/// 创建 PostgreSQL 连接池
///
/// 建立连接后立即执行一次 ping，连接失败不会重试。
pub async fn create_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    info!(dsn = %config.redacted_dsn(), "Connecting to postgres");

    let pool = PgPoolOptions::new()
        .max_connections(config.pool_max)
        .min_connections(config.pool_min)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect_with(config.connect_options())
        .await
        .map_err(|e| AppError::database(format!("Failed to create pool: {}", e)))?;

    check_connection(&pool).await?;

    info!(
        max_connections = config.pool_max,
        min_connections = config.pool_min,
        "Connected to postgres successfully"
    );
    Ok(pool)
}

/// 检查数据库连接
pub async fn check_connection(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
    Ok(())
}

/// 持久化网关
///
/// 持有连接池，提供 connect / ping / close 以及原始 SQL 执行。
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    /// 连接数据库
    pub async fn connect(config: &PostgresConfig) -> AppResult<Self> {
        let pool = create_pool(config).await?;
        Ok(Self { pool })
    }

    /// 使用已有连接池
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ping(&self) -> AppResult<()> {
        if self.pool.is_closed() {
            return Err(AppError::database("database connection is not established"));
        }
        check_connection(&self.pool).await
    }

    /// 执行不带参数的原始 SQL
    pub async fn execute(&self, sql: &str) -> AppResult<PgQueryResult> {
        sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to execute statement: {}", e)))
    }

    /// 关闭连接池，等待已借出的连接归还
    pub async fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            info!("Database connection closed");
        }
    }
}
