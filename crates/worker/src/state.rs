use std::sync::Arc;

use imagegen_provider::ImageProvider;

/// Shared worker state available to all Axum handlers via `State<WorkerState>`.
///
/// Read-only after startup; each request gets its own provider call.
#[derive(Clone)]
pub struct WorkerState {
    /// Backend that actually produces the image bytes.
    pub provider: Arc<dyn ImageProvider>,
}
