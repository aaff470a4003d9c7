use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::utils::error::{ArchitectError, ErrorCategory};

/// Error rendered as `{"detail": "..."}` with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<ArchitectError> for ApiError {
    fn from(error: ArchitectError) -> Self {
        let status = match (&error, error.category()) {
            (ArchitectError::ValidationError { .. }, _) => StatusCode::BAD_REQUEST,
            (_, ErrorCategory::Authentication) | (_, ErrorCategory::Provider) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = match &error {
            ArchitectError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("Error processing request: {}", error);
        }
        Self { status, detail }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("❌ Validation error caught: {}", rejection.body_text());
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
