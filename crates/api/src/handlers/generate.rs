//! Handlers for `GET /generate` and `GET /generate/image`.
//!
//! Both validate the query string, forward the request to the worker, and
//! translate the reply. The first returns JSON with an image reference; the
//! second relays the raw image bytes.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use imagegen_core::encoding::{data_uri, IMAGE_CONTENT_TYPE};
use imagegen_core::generation::{GenerationRequest, GenerationResult, Shape};
use imagegen_core::validation::{self, RawGenerationParams};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Successful `GET /generate` payload.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub image_url: String,
    pub prompt: String,
    pub seed: i64,
    pub shape: Shape,
    pub guidance_scale: f64,
    /// Always present; `null` when no negative prompt was used.
    pub negative_prompt: Option<String>,
}

impl TryFrom<GenerationResult> for GenerateResponse {
    type Error = AppError;

    /// Prefer a hosted `image_url`; otherwise embed the base64 payload as a
    /// `data:` URI.
    fn try_from(result: GenerationResult) -> Result<Self, Self::Error> {
        let image_url = match (result.image_url, result.image_base64) {
            (Some(url), _) => url,
            (None, Some(encoded)) => data_uri(IMAGE_CONTENT_TYPE, &encoded),
            (None, None) => {
                return Err(AppError::GenerationFailed(
                    "worker response contained no image".to_string(),
                ))
            }
        };

        let GenerationRequest {
            prompt,
            seed,
            guidance_scale,
            shape,
            negative_prompt,
        } = result.request;

        Ok(Self {
            success: true,
            image_url,
            prompt,
            seed,
            shape,
            guidance_scale,
            negative_prompt,
        })
    }
}

/// GET /generate
pub async fn generate(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let request = validate_query(query)?;

    let result = state.worker.generate(&request).await?;
    tracing::info!(prompt = %result.request.prompt, "Generation relayed");

    Ok(Json(GenerateResponse::try_from(result)?))
}

/// GET /generate/image
pub async fn generate_image(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Response> {
    let request = validate_query(query)?;

    let image = state.worker.fetch_image(&request).await?;
    tracing::info!(bytes = image.bytes.len(), "Image relayed");

    Ok(([(CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}

fn validate_query(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<GenerationRequest> {
    let Query(pairs) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = validation::validate(RawGenerationParams::from_pairs(pairs))?;
    tracing::debug!(
        seed = request.seed,
        shape = %request.shape,
        guidance_scale = request.guidance_scale,
        "Validated generation request"
    );
    Ok(request)
}
