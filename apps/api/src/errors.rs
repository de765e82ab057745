use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Message returned to callers when the model's output cannot be parsed.
/// The parse detail is logged, never returned.
const MALFORMED_OUTPUT_MESSAGE: &str = "The model returned output that could not be parsed";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as the `{"error": "..."}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::MalformedModelOutput(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Configuration(msg) => {
                tracing::warn!("Configuration error: {msg}");
                msg.clone()
            }
            AppError::Validation(msg) => {
                tracing::debug!("Rejected request body: {msg}");
                msg.clone()
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                msg.clone()
            }
            AppError::MalformedModelOutput(detail) => {
                tracing::error!("Malformed model output: {detail}");
                MALFORMED_OUTPUT_MESSAGE.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Configuration("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MalformedModelOutput("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_llm_error_surfaces_message_unredacted() {
        let err: AppError = LlmError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        }
        .into();
        assert!(matches!(&err, AppError::Upstream(m) if m.contains("Incorrect API key provided")));
    }
}
