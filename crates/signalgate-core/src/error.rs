//! Shared error type across signalgate crates.

use thiserror::Error;

/// Stable error codes surfaced to operators and clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SignalError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl SignalError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SignalError::BadRequest(_) => ClientCode::BadRequest,
            SignalError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            SignalError::Internal(_) => ClientCode::Internal,
        }
    }
}
