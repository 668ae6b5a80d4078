#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use cuba_telemetry::detached_metrics_handle;
use sd_rr::api::{AppState, router};
use sd_rr::domain::repositories::ReturRepository;
use sd_rr::infrastructure::persistence::InMemoryReturRepository;
use serde_json::Value;
use tower::ServiceExt;

pub fn app_with(repo: Arc<dyn ReturRepository>) -> Router {
    router(AppState::new(repo, detached_metrics_handle()))
}

pub fn app() -> Router {
    app_with(Arc::new(InMemoryReturRepository::new()))
}

/// 发送请求，返回状态码与 JSON 响应体
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn create(app: &Router, barang: &str, alasan: &str) -> Value {
    let body = serde_json::json!({ "barang": barang, "alasan": alasan }).to_string();
    let (status, json) = send(app, Method::POST, "/retur", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json
}

pub async fn delete(app: &Router, id: i64) -> (StatusCode, Value) {
    send(app, Method::DELETE, &format!("/retur/{}/delete", id), None).await
}
