use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use imagegen_core::error::ValidationError;
use imagegen_provider::ProviderError;
use serde_json::json;

/// Worker-level error type for HTTP handlers.
///
/// Renders as `{ "error", "code", "details"? }` with the matching status.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// A request parameter failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body was present but not a JSON object.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// The provider failed; carries the underlying message.
    #[error("Failed to generate image: {0}")]
    GenerationFailed(String),
}

/// Convenience type alias for handler return values.
pub type WorkerResult<T> = Result<T, WorkerError>;

impl From<ProviderError> for WorkerError {
    fn from(err: ProviderError) -> Self {
        WorkerError::GenerationFailed(err.to_string())
    }
}

impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            WorkerError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": err.to_string(), "code": err.code(), "details": null }),
            ),
            WorkerError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid JSON body", "code": "INVALID_BODY", "details": msg }),
            ),
            WorkerError::GenerationFailed(msg) => {
                tracing::error!(error = %msg, "Image generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to generate image",
                        "code": "GENERATION_FAILED",
                        "details": msg,
                    }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
