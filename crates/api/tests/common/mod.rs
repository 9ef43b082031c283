#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use imagegen_api::config::ServerConfig;
use imagegen_api::relay::{WorkerClient, DEFAULT_WORKER_TIMEOUT};
use imagegen_api::router::build_app_router;
use imagegen_api::state::AppState;
use imagegen_core::generation::GenerationRequest;
use imagegen_provider::{ImageProvider, ProviderError};
use imagegen_worker::router::build_worker_router;
use imagegen_worker::state::WorkerState;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        request_timeout_secs: 30,
        worker_timeout_secs: 20,
        worker_url: None,
    }
}

/// Build the front API router pointed at `worker_url`, bounding the worker
/// hop by `timeout`.
pub fn build_test_app_with_timeout(worker_url: Option<String>, timeout: Duration) -> Router {
    let worker = WorkerClient::new(worker_url, timeout).unwrap();
    let state = AppState {
        worker: Arc::new(worker),
    };
    build_app_router(state, &test_config())
}

pub fn build_test_app(worker_url: Option<String>) -> Router {
    build_test_app_with_timeout(worker_url, DEFAULT_WORKER_TIMEOUT)
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Start a real worker backed by a provider stub that returns `image`.
pub async fn spawn_worker(image: Vec<u8>) -> String {
    let provider = Arc::new(FixedImageProvider { image });
    spawn(build_worker_router(WorkerState { provider })).await
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Bytes covering every value a naive text conversion would mangle.
pub fn sample_image() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend(0..=255u8);
    bytes
}

struct FixedImageProvider {
    image: Vec<u8>,
}

#[async_trait]
impl ImageProvider for FixedImageProvider {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Vec<u8>, ProviderError> {
        if self.image.is_empty() {
            return Err(ProviderError::EmptyImage);
        }
        Ok(self.image.clone())
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
