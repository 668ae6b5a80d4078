//! sd-rr Service - Return Records

use std::sync::Arc;

use cuba_bootstrap::{Infrastructure, run_http_server};
use sd_rr::api::{AppState, router};
use sd_rr::infrastructure::persistence::{PostgresReturRepository, migrations};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_http_server("config", |infra: Infrastructure| async move {
        info!("Initializing sd-rr Service...");

        infra.run_migrations(&migrations()).await?;

        let repo = Arc::new(PostgresReturRepository::new(infra.postgres_pool()));
        info!("Repositories initialized");

        Ok(router(AppState::new(repo, infra.metrics_handle())))
    })
    .await
}
