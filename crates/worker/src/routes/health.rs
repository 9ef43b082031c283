use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::WorkerState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "Image Generation Worker",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<WorkerState> {
    Router::new().route("/health", get(health_check))
}
