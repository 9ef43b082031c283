//! Image generation provider seam.
//!
//! The worker only ever talks to the [`ImageProvider`] trait. The production
//! implementation is [`api::HttpImageProvider`]; tests plug in stubs.

pub mod api;

use async_trait::async_trait;
use imagegen_core::generation::GenerationRequest;

pub use api::HttpImageProvider;

/// Errors from a provider call. All of them surface to clients as a generic
/// generation failure carrying this message.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered, but not with an image.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// The provider answered with zero image bytes.
    #[error("Provider returned an empty image")]
    EmptyImage,
}

/// A backend that turns a generation request into raw image bytes.
///
/// Implementations are called exactly once per request and must not retry.
/// The returned bytes are treated as read-once and passed through untouched.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, ProviderError>;
}
