//! REST client for an HTTP image generation backend.
//!
//! Sends one `POST {api_url}/generate` per request. The backend may answer
//! with the image itself, with base64 JSON, or with a URL that is downloaded
//! in a single follow-up `GET`.

use async_trait::async_trait;
use imagegen_core::encoding::decode_image;
use imagegen_core::generation::GenerationRequest;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::{ImageProvider, ProviderError};

/// HTTP client for a single provider endpoint.
pub struct HttpImageProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

/// JSON reply shape accepted from the provider when it does not stream the
/// image directly.
#[derive(Debug, Deserialize)]
struct ProviderReply {
    #[serde(default)]
    image_base64: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl HttpImageProvider {
    /// Create a new provider client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:7860`.
    /// * `api_key` - Optional bearer credential sent with every request.
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    /// Create a provider client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Base URL this client talks to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- private helpers ----

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Fetch an image the provider parked at `url`. Relative URLs resolve
    /// against the provider base URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let base = reqwest::Url::parse(&format!("{}/", self.api_url))
            .map_err(|e| ProviderError::MalformedResponse(format!("invalid provider URL: {e}")))?;
        let target = base
            .join(url)
            .map_err(|e| ProviderError::MalformedResponse(format!("invalid image URL '{url}': {e}")))?;

        tracing::debug!(url = %target, "Downloading generated image");
        let response = self.authorize(self.client.get(target)).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`ProviderError::ApiError`] containing the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ImageProvider for HttpImageProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .authorize(self.client.post(format!("{}/generate", self.api_url)))
            .json(request)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let bytes = if content_type.starts_with("image/")
            || content_type.starts_with("application/octet-stream")
        {
            response.bytes().await?.to_vec()
        } else {
            let body = response.bytes().await?;
            let reply: ProviderReply = serde_json::from_slice(&body)
                .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
            match (reply.image_base64, reply.image_url) {
                (Some(encoded), _) => decode_image(&encoded).map_err(|e| {
                    ProviderError::MalformedResponse(format!("invalid base64 image: {e}"))
                })?,
                (None, Some(url)) => self.download(&url).await?,
                (None, None) => {
                    return Err(ProviderError::MalformedResponse(
                        "response contained no image".to_string(),
                    ))
                }
            }
        };

        if bytes.is_empty() {
            return Err(ProviderError::EmptyImage);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use imagegen_core::encoding::encode_image;

    use super::*;

    const IMAGE: &[u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xFF, 0x10, 0x80];

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn png(bytes: &'static [u8]) -> impl IntoResponse {
        ([(header::CONTENT_TYPE, "image/png")], bytes)
    }

    #[tokio::test]
    async fn returns_streamed_image_bytes() {
        let url = serve(Router::new().route("/generate", post(|| async { png(IMAGE) }))).await;
        let provider = HttpImageProvider::new(url, None);

        let bytes = provider.generate(&GenerationRequest::new("a cat")).await.unwrap();
        assert_eq!(bytes, IMAGE);
    }

    #[tokio::test]
    async fn forwards_request_body_and_credentials() {
        let router = Router::new().route(
            "/generate",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["prompt"], "a cat");
                assert_eq!(body["shape"], "square");
                assert_eq!(body["seed"], -1);
                assert_eq!(headers[header::AUTHORIZATION], "Bearer secret");
                png(IMAGE)
            }),
        );
        let url = serve(router).await;
        let provider = HttpImageProvider::new(url, Some("secret".into()));

        assert!(provider.generate(&GenerationRequest::new("a cat")).await.is_ok());
    }

    #[tokio::test]
    async fn decodes_base64_json_reply() {
        let router = Router::new().route(
            "/generate",
            post(|| async { Json(serde_json::json!({ "image_base64": encode_image(IMAGE) })) }),
        );
        let provider = HttpImageProvider::new(serve(router).await, None);

        let bytes = provider.generate(&GenerationRequest::new("a cat")).await.unwrap();
        assert_eq!(bytes, IMAGE);
    }

    #[tokio::test]
    async fn downloads_image_from_returned_url() {
        let router = Router::new()
            .route(
                "/generate",
                post(|| async { Json(serde_json::json!({ "image_url": "/files/out.png" })) }),
            )
            .route("/files/out.png", get(|| async { png(IMAGE) }));
        let provider = HttpImageProvider::new(serve(router).await, None);

        let bytes = provider.generate(&GenerationRequest::new("a cat")).await.unwrap();
        assert_eq!(bytes, IMAGE);
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let router = Router::new().route(
            "/generate",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let provider = HttpImageProvider::new(serve(router).await, None);

        let err = provider.generate(&GenerationRequest::new("a cat")).await.unwrap_err();
        assert_matches!(err, ProviderError::ApiError { status: 503, ref body } if body == "overloaded");
    }

    #[tokio::test]
    async fn empty_image_is_rejected() {
        let router = Router::new().route("/generate", post(|| async { png(&[]) }));
        let provider = HttpImageProvider::new(serve(router).await, None);

        let err = provider.generate(&GenerationRequest::new("a cat")).await.unwrap_err();
        assert_matches!(err, ProviderError::EmptyImage);
    }

    #[tokio::test]
    async fn json_without_image_is_malformed() {
        let router = Router::new().route(
            "/generate",
            post(|| async { Json(serde_json::json!({ "status": "done" })) }),
        );
        let provider = HttpImageProvider::new(serve(router).await, None);

        let err = provider.generate(&GenerationRequest::new("a cat")).await.unwrap_err();
        assert_matches!(err, ProviderError::MalformedResponse(_));
    }

    #[tokio::test]
    async fn trailing_slash_is_trimmed_from_base_url() {
        let provider = HttpImageProvider::new("http://localhost:7860/".into(), None);
        assert_eq!(provider.api_url(), "http://localhost:7860");
    }
}
