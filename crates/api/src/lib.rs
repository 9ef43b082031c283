//! Image generation front API library.
//!
//! Exposes config, state, error handling, the worker relay and the router
//! so integration tests and the binary entrypoint build the same service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod relay;
pub mod router;
pub mod routes;
pub mod state;
