//! ```text
//! GET /generate          generate        (JSON with image reference)
//! GET /generate/image    generate_image  (raw image bytes)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", get(generate::generate))
        .route("/generate/image", get(generate::generate_image))
}
