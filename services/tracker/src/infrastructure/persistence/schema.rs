//! 建表

use adapter_postgres::PgGateway;
use errors::{AppError, AppResult};
use tracing::info;

pub const CREATE_TRACKER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tracker (
    id BIGSERIAL PRIMARY KEY,
    task TEXT NOT NULL,
    start_time TIMESTAMPTZ NOT NULL,
    end_time TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// 确保 tracker 表存在，可重复执行
pub async fn ensure_schema(gateway: &PgGateway) -> AppResult<()> {
    gateway
        .execute(CREATE_TRACKER_TABLE)
        .await
        .map_err(|e| AppError::database(format!("Failed to create tracker table: {}", e)))?;

    info!("Tracker table is ready");
    Ok(())
}
