//! HTTP client for the worker service.
//!
//! Forwards a validated [`GenerationRequest`] as `POST {worker}/generate`
//! and classifies every way that hop can go wrong. Exactly one request is
//! sent per call; nothing is retried.

use std::time::Duration;

use imagegen_core::encoding::IMAGE_CONTENT_TYPE;
use imagegen_core::generation::{GenerationRequest, GenerationResult};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

/// Default bound on a single worker round trip.
pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from the front-to-worker hop.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// No worker URL configured; no request was attempted.
    #[error("worker service not configured")]
    NotConfigured,

    /// The worker did not answer within the configured bound.
    #[error("worker request timed out")]
    Timeout,

    /// The worker could not be reached at all.
    #[error("cannot connect to worker: {0}")]
    Unreachable(String),

    /// The worker answered with a non-success status.
    #[error("worker returned {status}: {details}")]
    WorkerStatus {
        status: u16,
        /// The worker's own `error` message, or `HTTP <status>`.
        details: String,
    },

    /// The worker answered 2xx with a body that could not be used.
    #[error("invalid worker response: {0}")]
    InvalidResponse(String),

    /// Any other transport failure.
    #[error("worker request failed: {0}")]
    Request(String),
}

/// Raw image relayed from the worker's binary encoding.
#[derive(Debug, Clone)]
pub struct WorkerImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Error body shape the worker renders on failure.
#[derive(Debug, Deserialize)]
struct WorkerErrorBody {
    error: Option<String>,
}

/// Client for a single worker base URL.
pub struct WorkerClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl WorkerClient {
    /// Build a client bounded by `timeout`. A `None` or blank `base_url`
    /// leaves the client unconfigured.
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        Ok(Self { client, base_url })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Request a JSON generation result (base64 image or image URL).
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, RelayError> {
        let response = self.dispatch(request, "application/json").await?;
        let body = response.bytes().await.map_err(classify)?;
        serde_json::from_slice(&body).map_err(|e| RelayError::InvalidResponse(e.to_string()))
    }

    /// Request the raw image bytes.
    pub async fn fetch_image(&self, request: &GenerationRequest) -> Result<WorkerImage, RelayError> {
        let response = self.dispatch(request, IMAGE_CONTENT_TYPE).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(IMAGE_CONTENT_TYPE)
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(RelayError::InvalidResponse(format!(
                "expected an image, got {content_type}"
            )));
        }

        let bytes = response.bytes().await.map_err(classify)?.to_vec();
        if bytes.is_empty() {
            return Err(RelayError::InvalidResponse("empty image".to_string()));
        }
        Ok(WorkerImage {
            content_type,
            bytes,
        })
    }

    // ---- private helpers ----

    async fn dispatch(
        &self,
        request: &GenerationRequest,
        accept: &str,
    ) -> Result<reqwest::Response, RelayError> {
        let base_url = self.base_url.as_deref().ok_or(RelayError::NotConfigured)?;
        let url = format!("{base_url}/generate");

        tracing::debug!(%url, accept, "Dispatching request to worker");
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, accept)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        Self::ensure_success(response).await
    }

    /// Pass 2xx responses through; turn anything else into
    /// [`RelayError::WorkerStatus`] carrying the worker's own message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RelayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.map_err(classify)?;
        let details = match serde_json::from_slice::<WorkerErrorBody>(&body) {
            Ok(parsed) => parsed.error.unwrap_or_else(|| "Unknown error".to_string()),
            Err(_) => format!("HTTP {}", status.as_u16()),
        };
        tracing::warn!(status = status.as_u16(), %details, "Worker returned an error");

        Err(RelayError::WorkerStatus {
            status: status.as_u16(),
            details,
        })
    }
}

/// Map a transport error to the relay taxonomy.
fn classify(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout
    } else if err.is_connect() {
        RelayError::Unreachable(err.to_string())
    } else {
        RelayError::Request(err.to_string())
    }
}
