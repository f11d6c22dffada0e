//! HTTP error responses
//!
//! Maps engine errors to status codes and the `{ message, error }` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::executor::EngineError;
use crate::storage::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Rejected request (400)
    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    /// Operation not available in the current mode (409)
    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    /// Server-side failure (500); detail only exposed in development
    #[error("Internal Server Error")]
    Internal { detail: Option<String> },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    /// Translates an engine error. `expose_detail` controls whether
    /// internal failures carry their cause.
    pub fn from_engine(err: EngineError, expose_detail: bool) -> Self {
        match err {
            EngineError::Validation(err) => ApiError::BadRequest {
                code: err.code().code(),
                message: err.message().to_string(),
            },
            EngineError::Store(err) => Self::from_store(err, expose_detail),
        }
    }

    pub fn from_store(err: StoreError, expose_detail: bool) -> Self {
        match err {
            StoreError::ReloadUnsupported(_) => ApiError::Conflict {
                code: err.code(),
                message: err.to_string(),
            },
            other => ApiError::Internal {
                detail: expose_detail.then(|| other.to_string()),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        let error = match err {
            ApiError::BadRequest { code, .. } | ApiError::Conflict { code, .. } => {
                Some(code.to_string())
            }
            ApiError::Internal { detail } => detail,
        };
        ErrorResponse { message, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
