//! Tracker Service 入口

use config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    bootstrap::run_server(AppConfig::config_path(), tracker::build_router).await
}
