//! API 路由

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::ServiceHandler;
use crate::domain::repositories::ReturRepository;

use super::handlers;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ServiceHandler>,
    /// 就绪检查使用
    pub repo: Arc<dyn ReturRepository>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(repo: Arc<dyn ReturRepository>, metrics: PrometheusHandle) -> Self {
        Self {
            handler: Arc::new(ServiceHandler::new(repo.clone())),
            repo,
            metrics,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/retur",
            get(handlers::list_returs).post(handlers::create_retur),
        )
        .route("/retur/undo", post(handlers::undo_delete))
        .route("/retur/{id}/approve", post(handlers::approve_retur))
        .route("/retur/{id}/disapprove", post(handlers::disapprove_retur))
        .route("/retur/{id}/delete", delete(handlers::delete_retur))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
}
