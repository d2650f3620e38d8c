use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tickbridge_core::{SourceError, ValidationError};

/// Endpoint-level error categories mapped to response statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("upstream fetch failed: {0}")]
    Upstream(SourceError),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<SourceError> for ApiError {
    fn from(error: SourceError) -> Self {
        Self::Upstream(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(error) => {
                let body = json!({ "error": error.to_string() });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::Upstream(error) => {
                tracing::warn!(code = error.code(), "upstream fetch failed: {error}");
                let body = json!({ "error": "Failed to retrieve data from upstream provider" });
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
            Self::Unexpected(details) => {
                tracing::error!("unexpected error: {details}");
                let body = json!({
                    "error": "An unexpected error occurred",
                    "details": details,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
