//! Gateway error types and their HTTP mapping.
//!
//! | Source | Status | Body |
//! |--------|--------|------|
//! | Malformed body / missing field | 400 | `{error}` |
//! | Domain rejection, missing player/guild/slot | 400 | `{error}` |
//! | Missing caller identity | 401 | `{error}` |
//! | Store unavailable, contention | 500 | `{error}` (generic) |

use ath_02_progress::{ErrorKind, ProgressError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Error returned by a request handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Missing or malformed request input
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// No authenticated caller
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<ProgressError> for ApiError {
    fn from(e: ProgressError) -> Self {
        match e.kind() {
            ErrorKind::Infrastructure => {
                error!(error = %e, "[ath-03] infrastructure failure");
                Self::internal()
            }
            ErrorKind::Validation | ErrorKind::Domain | ErrorKind::NotFound => {
                debug!(error = %e, "[ath-03] request rejected");
                Self::bad_request(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Gateway lifecycle errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server terminated with an I/O error
    #[error("server error: {0}")]
    Server(String),
}
