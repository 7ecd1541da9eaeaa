//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::io;
use std::path::Path;

use axum::Router;
use config::{AppConfig, ServerConfig};
use errors::AppResult;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::metrics::metrics_routes;
use crate::runtime::{init_runtime, shutdown_signal};
use crate::shutdown::ShutdownController;

/// 运行 HTTP 服务
///
/// 启动顺序：
/// 1. 加载配置
/// 2. 初始化运行时（日志）和 Prometheus recorder
/// 3. 连接数据库
/// 4. 调用 `router_builder` 构建业务路由（可在其中执行建表等启动任务）
/// 5. 启动服务器并处理 graceful shutdown
///
/// 以上任一步失败都会直接返回错误。
///
/// # 示例
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     bootstrap::run_server(AppConfig::config_path(), |infra| async move {
///         Ok(my_service::router(infra.postgres_pool()))
///     })
///     .await
/// }
/// ```
pub async fn run_server<F, Fut>(
    config_path: impl AsRef<Path>,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 1. 加载配置
    let config = AppConfig::load(config_path)?;

    // 2. 初始化运行时
    init_runtime(&config);
    let prometheus = telemetry::init_metrics()?;

    info!("Starting {} service", config.app_name);

    // 3. 创建基础设施
    let infra = Infrastructure::from_config(config.clone()).await?;

    // 4. 构建路由
    let app = router_builder(infra.clone())
        .await?
        .merge(metrics_routes(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // 5. 启动服务器
    let listener = bind_listener(&config.server).await?;
    let addr = listener.local_addr()?;

    info!(%addr, "HTTP server starting");

    let shutdown = ShutdownController::new(infra.shutdown_token(), config.shutdown_grace());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.graceful(shutdown_signal()))
        .await?;

    // 6. 清理
    infra.close().await;
    info!("Service stopped");

    Ok(())
}

/// 绑定监听地址，`app_host` 可以是 IP 或主机名
pub async fn bind_listener(server: &ServerConfig) -> io::Result<TcpListener> {
    TcpListener::bind((server.app_host.as_str(), server.app_port)).await
}

/// 执行一次性任务（例如数据库迁移）后退出
pub async fn run_task<F, Fut>(
    config_path: impl AsRef<Path>,
    task: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let config = AppConfig::load(config_path)?;
    init_runtime(&config);

    let infra = Infrastructure::from_config(config).await?;
    let result = task(infra.clone()).await;
    infra.close().await;

    Ok(result?)
}
