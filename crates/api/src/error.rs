use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use imagegen_core::error::ValidationError;
use serde_json::json;

use crate::relay::RelayError;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as `{ "success": false, "error", "code", "details" }`
/// so no failure escapes the request boundary unstructured.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A request parameter failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The query string could not be decoded at all.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// `PERCHANCE_WORKER_URL` is not set.
    #[error("Worker service not configured")]
    WorkerNotConfigured,

    /// The worker did not answer within the configured bound.
    #[error("Worker service timeout")]
    WorkerTimeout,

    /// The worker could not be reached.
    #[error("Cannot connect to worker service: {0}")]
    WorkerUnreachable(String),

    /// The worker answered with an error; its status is passed through.
    #[error("Worker service error ({status}): {details}")]
    Worker { status: StatusCode, details: String },

    /// Anything else that went wrong while producing the image.
    #[error("Failed to generate image: {0}")]
    GenerationFailed(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::NotConfigured => AppError::WorkerNotConfigured,
            RelayError::Timeout => AppError::WorkerTimeout,
            RelayError::Unreachable(msg) => AppError::WorkerUnreachable(msg),
            RelayError::WorkerStatus { status, details } => AppError::Worker {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                details,
            },
            RelayError::InvalidResponse(msg) | RelayError::Request(msg) => {
                AppError::GenerationFailed(msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error, details): (StatusCode, &str, String, Option<String>) =
            match self {
                AppError::Validation(err) => {
                    (StatusCode::BAD_REQUEST, err.code(), err.to_string(), None)
                }
                AppError::BadRequest(msg) => (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    "Invalid query string".to_string(),
                    Some(msg),
                ),
                AppError::WorkerNotConfigured => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "WORKER_NOT_CONFIGURED",
                    "Worker service not configured".to_string(),
                    Some(
                        "Please set PERCHANCE_WORKER_URL environment variable with your worker URL"
                            .to_string(),
                    ),
                ),
                AppError::WorkerTimeout => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "WORKER_TIMEOUT",
                    "Worker service timeout".to_string(),
                    Some("Image generation took too long. Please try again.".to_string()),
                ),
                AppError::WorkerUnreachable(msg) => {
                    tracing::error!(error = %msg, "Worker unreachable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "WORKER_UNREACHABLE",
                        "Cannot connect to worker service".to_string(),
                        Some(
                            "Please check PERCHANCE_WORKER_URL or ensure the worker service is running"
                                .to_string(),
                        ),
                    )
                }
                AppError::Worker { status, details } => (
                    status,
                    "WORKER_ERROR",
                    "Worker service error".to_string(),
                    Some(details),
                ),
                AppError::GenerationFailed(msg) => {
                    tracing::error!(error = %msg, "Image generation failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "GENERATION_FAILED",
                        "Failed to generate image".to_string(),
                        Some(msg),
                    )
                }
            };

        let body = json!({
            "success": false,
            "error": error,
            "code": code,
            "details": details,
        });

        (status, axum::Json(body)).into_response()
    }
}
