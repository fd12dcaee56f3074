//! Request-scoped error type and its HTTP mapping.
//!
//! Every failure is synchronous and terminal for its own request;
//! nothing here is retried and nothing is fatal to the process.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use darkroom_pipeline::EngineError;
use darkroom_store::StoreError;
use serde_json::json;

/// Failures surfaced to HTTP clients as `{"detail": ...}` bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Referenced image id does not exist. 404.
    #[error("Image not found")]
    NotFound,
    /// Malformed transformation parameter. 400.
    #[error("{0}")]
    InvalidArgument(String),
    /// Uploaded bytes are not a decodable image. 400.
    #[error("{0}")]
    Decode(String),
    /// Response encoding failed. 500.
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidArgument(_) | Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        (self.status(), Json(json!({ "detail": detail }))).into_response()
    }
}
