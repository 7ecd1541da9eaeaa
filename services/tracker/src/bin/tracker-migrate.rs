//! 独立建表工具

use config::AppConfig;
use tracker::infrastructure::persistence::ensure_schema;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    bootstrap::run_task(AppConfig::config_path(), |infra| async move {
        ensure_schema(&infra.gateway()).await
    })
    .await
}
