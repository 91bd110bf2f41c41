use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::portfolio::RenderError;
use crate::resume::ParseError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Parse(ParseError::UnsupportedFormat(_)) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                "File type not allowed. Please upload PDF or DOCX.".to_string(),
            ),
            AppError::Parse(ParseError::ExtractionEmpty) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_EMPTY",
                self.to_string(),
            ),
            AppError::Parse(ParseError::Io(e)) => {
                tracing::error!("Resume read error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "The uploaded file could not be read".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e:?}");
                let code = match e {
                    RenderError::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
                    RenderError::Render { .. } => "RENDER_FAILED",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "Failed to generate portfolio display from parsed data.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
