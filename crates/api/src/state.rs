use std::sync::Arc;

use crate::relay::WorkerClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; nothing in it changes after startup.
#[derive(Clone)]
pub struct AppState {
    /// Pooled client for the worker hop.
    pub worker: Arc<WorkerClient>,
}
