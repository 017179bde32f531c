use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::review::evaluator::EvaluationError;
use crate::review::extractor::ExtractError;
use crate::review::prompts::PromptError;

pub const MISSING_INPUT_MESSAGE: &str = "Resume file and job description are required";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Resume file exceeds the maximum upload size";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only `InvalidInput` and `PayloadTooLarge` are told apart for the caller;
/// every other failure is logged here and answered with the generic 500 body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload exceeds the configured size limit")]
    PayloadTooLarge,

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput(reason) => {
                tracing::info!("Rejected review request: {reason}");
                (StatusCode::BAD_REQUEST, MISSING_INPUT_MESSAGE)
            }
            AppError::PayloadTooLarge => {
                tracing::info!("Rejected review request: upload too large");
                (StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE_MESSAGE)
            }
            AppError::Extraction(e) => {
                tracing::error!("Error analyzing resume: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            AppError::Prompt(e) => {
                tracing::error!("Error analyzing resume: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            AppError::Evaluation(e) => {
                tracing::error!("Error analyzing resume: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
