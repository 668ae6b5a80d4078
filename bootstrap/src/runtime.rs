//! 服务运行时

use cuba_config::AppConfig;
use cuba_telemetry::{init_tracing, init_tracing_json};
use tracing::{info, warn};

/// 初始化日志：生产环境输出 JSON，其余环境输出文本
pub fn init_runtime(config: &AppConfig) {
    let log_level = config.telemetry.log_level.as_str();
    match config.is_production() {
        true => init_tracing_json(log_level),
        false => init_tracing(log_level),
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        log_level,
        "Runtime initialized"
    );
}

/// 等待 Ctrl-C 或 SIGTERM
///
/// 信号处理器安装失败时只记录警告，该信号源不再触发关闭
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
