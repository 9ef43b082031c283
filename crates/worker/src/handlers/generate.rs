//! `POST /generate`: run one provider call and return the image.
//!
//! The image comes back as base64 inside a JSON result unless the caller's
//! `Accept` header asks for `image/png`, in which case the raw bytes are
//! streamed. Both paths hand over the provider bytes untouched.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use imagegen_core::encoding::{encode_image, IMAGE_CONTENT_TYPE};
use imagegen_core::generation::GenerationResult;
use imagegen_core::validation::{self, RawGenerationParams};

use crate::error::{WorkerError, WorkerResult};
use crate::state::WorkerState;

/// POST /generate
pub async fn generate(
    State(state): State<WorkerState>,
    headers: HeaderMap,
    body: Bytes,
) -> WorkerResult<Response> {
    let raw = parse_body(&body)?;
    let request = validation::validate(raw)?;
    let binary = wants_binary(&headers);

    tracing::info!(
        seed = request.seed,
        shape = %request.shape,
        guidance_scale = request.guidance_scale,
        binary,
        "Dispatching generation request to provider"
    );

    let image = state.provider.generate(&request).await?;

    tracing::info!(bytes = image.len(), "Generation completed");

    if binary {
        return Ok(([(CONTENT_TYPE, IMAGE_CONTENT_TYPE)], image).into_response());
    }

    Ok(Json(GenerationResult {
        image_base64: Some(encode_image(&image)),
        image_url: None,
        request,
    })
    .into_response())
}

/// Decode the request body. An empty body or a JSON `null` is treated as
/// an empty parameter set so that it fails validation on the prompt.
fn parse_body(body: &[u8]) -> WorkerResult<RawGenerationParams> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawGenerationParams::default());
    }
    let parsed: Option<RawGenerationParams> =
        serde_json::from_slice(body).map_err(|e| WorkerError::InvalidBody(e.to_string()))?;
    Ok(parsed.unwrap_or_default())
}

/// True when the `Accept` header asks for a PNG (or any image) and not JSON.
fn wants_binary(headers: &HeaderMap) -> bool {
    let accept = headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join(",")
        .to_ascii_lowercase();

    let wants_image = accept.contains(IMAGE_CONTENT_TYPE) || accept.contains("image/*");
    wants_image && !accept.contains("application/json")
}
