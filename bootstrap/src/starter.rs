//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;

use axum::Router;
use cuba_config::AppConfig;
use cuba_errors::AppResult;
use cuba_telemetry::init_metrics;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 所有服务的统一入口点：
/// 1. 加载 `.env` 与配置
/// 2. 初始化运行时（日志、追踪）和 Prometheus recorder
/// 3. 创建基础设施资源（数据库不可达则直接退出）
/// 4. 调用闭包构建路由
/// 5. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http_server("config", |infra| async move {
///         Ok(my_routes(infra.postgres_pool()))
///     })
///     .await
/// }
/// ```
pub async fn run_http_server<F, Fut>(
    config_dir: &str,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    dotenvy::dotenv().ok();

    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);
    let metrics_handle = init_metrics()?;

    info!("Starting {} service", config.app_name);

    // 3. 创建基础设施
    let addr = config.listen_addr();
    let infra = match Infrastructure::from_config(&config, metrics_handle).await {
        Ok(infra) => infra,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            return Err(e.into());
        }
    };

    // 4. 构建路由
    let app = router_builder(infra)
        .await?
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // 5. 启动服务器
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}
