//! HTTP-facing error type returned by route handlers.
//!
//! `ApiError::Http` is a recognized error condition: the handler chose the
//! status and the detail message, and its response carries the
//! [`Recognized`] extension. `ApiError::Internal` is an unrecognized fault;
//! its response carries the [`Fault`] extension. The metrics layer matches on
//! these tags, so a handler returning a 4xx/5xx as a plain response is not
//! counted as an error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use signalgate_core::error::SignalError;

/// Response extension marking a response produced from an unrecognized fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

/// Response extension marking a recognized error condition and its declared status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recognized(pub StatusCode);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{status}: {detail}")]
    Http { status: StatusCode, detail: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn http(status: StatusCode, detail: impl Into<String>) -> Self {
        ApiError::Http { status, detail: detail.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SignalError> for ApiError {
    fn from(e: SignalError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Http { status, detail } => {
                let mut resp = (status, Json(json!({ "detail": detail }))).into_response();
                resp.extensions_mut().insert(Recognized(status));
                resp
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "unhandled fault in handler");
                let mut resp = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal Server Error" })),
                )
                    .into_response();
                resp.extensions_mut().insert(Fault);
                resp
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_keeps_declared_status() {
        let resp = ApiError::http(StatusCode::CONFLICT, "taken").into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(
            resp.extensions().get::<Recognized>(),
            Some(&Recognized(StatusCode::CONFLICT))
        );
        assert!(resp.extensions().get::<Fault>().is_none());
    }

    #[test]
    fn internal_error_is_marked_as_fault() {
        let err: ApiError = SignalError::Internal("db gone".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.extensions().get::<Fault>(), Some(&Fault));
        assert!(resp.extensions().get::<Recognized>().is_none());
    }
}
