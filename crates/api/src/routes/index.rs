//! `GET /`: self-describing API summary and setup steps.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

async fn index(State(state): State<AppState>) -> Json<Value> {
    let worker_url = state.worker.base_url();

    Json(json!({
        "name": "Image Generation API",
        "version": env!("CARGO_PKG_VERSION"),
        "worker_configured": worker_url.is_some(),
        "worker_url": worker_url.unwrap_or("Not configured"),
        "endpoints": {
            "/health": {
                "method": "GET",
                "description": "Health check endpoint",
            },
            "/generate": {
                "method": "GET",
                "description": "Generate an image from a text prompt and get an image URL",
                "parameters": {
                    "prompt": {
                        "type": "string",
                        "required": true,
                        "description": "Text description of the image to generate",
                    },
                    "seed": {
                        "type": "integer",
                        "required": false,
                        "default": -1,
                        "description": "Random seed for reproducibility (-1 for random)",
                    },
                    "guidance_scale": {
                        "type": "float",
                        "required": false,
                        "default": 7.0,
                        "description": "How closely to follow the prompt (0-20)",
                    },
                    "shape": {
                        "type": "string",
                        "required": false,
                        "default": "square",
                        "description": "Image shape: 'portrait', 'landscape', or 'square'",
                    },
                    "negative_prompt": {
                        "type": "string",
                        "required": false,
                        "description": "What to avoid in the image (e.g. \"blurry, low quality\")",
                    },
                },
                "example": "/generate?prompt=sunset%20over%20mountains&guidance_scale=7.5&shape=landscape&negative_prompt=blurry",
                "response": {
                    "success": true,
                    "image_url": "data:image/png;base64,...",
                    "prompt": "...",
                    "seed": 123,
                    "shape": "square",
                    "guidance_scale": 7.0,
                    "negative_prompt": null,
                },
            },
            "/generate/image": {
                "method": "GET",
                "description": "Same parameters as /generate; responds with the raw image bytes",
            },
        },
        "setup_instructions": {
            "1": "Deploy the worker service (imagegen-worker)",
            "2": "Set PROVIDER_URL (and PROVIDER_API_KEY if required) on the worker",
            "3": "Note the worker's base URL, e.g. https://your-worker.example.com",
            "4": "Deploy this API service (imagegen-api)",
            "5": "Set PERCHANCE_WORKER_URL on this service to the worker's base URL",
            "6": "Call GET /generate?prompt=a%20cat",
        },
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
