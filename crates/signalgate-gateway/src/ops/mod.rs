//! Operational HTTP endpoints.
//!
//! - `/`        : liveness (`{"status": "UP"}`)
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app_state::AppState;

/// Content type of the Prometheus text exposition format.
pub const CONTENT_TYPE_LATEST: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn status() -> impl IntoResponse {
    Json(json!({ "status": "UP" }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE_LATEST)], body).into_response()
}
