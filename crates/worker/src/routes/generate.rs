//! ```text
//! POST /generate      generate (JSON or image/png per Accept)
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::WorkerState;

pub fn router() -> Router<WorkerState> {
    Router::new().route("/generate", post(generate::generate))
}
