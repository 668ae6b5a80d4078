//! 基础设施资源管理
//!
//! 统一管理服务共享的基础设施资源

use cuba_adapter_postgres::{
    Migration, MigrationManager, PostgresConfig, check_connection, create_pool,
};
use cuba_config::AppConfig;
use cuba_errors::{AppError, AppResult};
use metrics_exporter_prometheus::PrometheusHandle;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
    /// Prometheus handle
    metrics_handle: PrometheusHandle,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 数据库不可达时立即失败，不做重试
    pub async fn from_config(
        config: &AppConfig,
        metrics_handle: PrometheusHandle,
    ) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let postgres_pool = create_pool(&pg_config).await?;
        check_connection(&postgres_pool).await?;
        info!(
            "PostgreSQL connection pool created (max_connections: {})",
            config.database.max_connections
        );

        Ok(Self {
            postgres_pool,
            metrics_handle,
        })
    }

    /// 应用服务的 schema 迁移
    pub async fn run_migrations(&self, migrations: &[Migration]) -> AppResult<()> {
        let result = MigrationManager::new(self.postgres_pool.clone())
            .migrate(migrations)
            .await?;

        if let Some(failed) = result.errors.first() {
            return Err(AppError::database(format!(
                "Migration {} ({}) failed: {}",
                failed.version, failed.name, failed.error
            )));
        }

        info!(
            applied = result.applied_count(),
            skipped = result.skipped.len(),
            "Schema migrations complete"
        );
        Ok(())
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取 Prometheus handle
    pub fn metrics_handle(&self) -> PrometheusHandle {
        self.metrics_handle.clone()
    }
}
