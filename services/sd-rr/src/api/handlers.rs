//! HTTP 处理函数

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use cuba_errors::AppError;
use cuba_telemetry::HealthStatus;
use serde::de::DeserializeOwned;

use crate::domain::value_objects::ReturId;
use crate::error::ReturError;

use super::dto::*;
use super::routes::AppState;

type ApiResult<T> = Result<T, AppError>;

/// 无论 Content-Type 都按 JSON 解析请求体；JSON `null` 视为空对象
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ReturError> {
    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|_| ReturError::InvalidInput)
}

fn parse_id(raw: &str) -> Result<ReturId, ReturError> {
    raw.parse()
}

pub async fn list_returs(State(state): State<AppState>) -> ApiResult<Json<Vec<ReturResponse>>> {
    let returs = state.handler.list_returs().await?;
    Ok(Json(returs.iter().map(ReturResponse::from).collect()))
}

pub async fn create_retur(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ReturResponse>)> {
    let req: CreateReturRequest = parse_body(&body)?;
    let retur = state.handler.create_retur(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ReturResponse::from(&retur))))
}

pub async fn approve_retur(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ReturResponse>> {
    let id = parse_id(&id)?;
    let req: ApproveReturRequest = parse_body(&body)?;
    let retur = state.handler.approve_retur(req.into_command(id)).await?;
    Ok(Json(ReturResponse::from(&retur)))
}

pub async fn disapprove_retur(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReturResponse>> {
    let id = parse_id(&id)?;
    let retur = state.handler.disapprove_retur(id).await?;
    Ok(Json(ReturResponse::from(&retur)))
}

pub async fn delete_retur(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let id = state.handler.delete_retur(id).await?;
    Ok(Json(MessageResponse {
        message: format!("Return with ID {} deleted", id),
    }))
}

pub async fn undo_delete(State(state): State<AppState>) -> ApiResult<Json<ReturResponse>> {
    let retur = state.handler.undo_delete().await?;
    Ok(Json(ReturResponse::from(&retur)))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 就绪检查，存储不可达时返回 503
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    let mut status = HealthStatus::new();
    match state.repo.ping().await {
        Ok(()) => status.add_check("postgres", true, None),
        Err(e) => status.add_check("postgres", false, Some(e.to_string())),
    }

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = ReadinessResponse {
        ready: status.healthy,
        checks: status
            .checks
            .into_iter()
            .map(|check| ServiceCheck {
                name: check.name,
                healthy: check.healthy,
                message: check.message,
            })
            .collect(),
    };

    (code, Json(body)).into_response()
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}
