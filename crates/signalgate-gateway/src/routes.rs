//! Demo routes used to exercise each outcome class of the metrics layer.

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::ApiError;

pub async fn bad_request() -> Result<Json<Value>, ApiError> {
    Err(ApiError::http(StatusCode::BAD_REQUEST, "Bad Request: an 400 error"))
}

pub async fn server_error() -> Result<Json<Value>, ApiError> {
    Err(ApiError::http(StatusCode::INTERNAL_SERVER_ERROR, "Bad Request: an 500 error"))
}

pub async fn success() -> Json<Value> {
    Json(json!({ "message": "This is a successful request" }))
}

/// Router fallback for unregistered paths.
pub async fn not_found() -> ApiError {
    ApiError::http(StatusCode::NOT_FOUND, "Not Found")
}
