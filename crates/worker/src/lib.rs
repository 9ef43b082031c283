//! Image generation worker library.
//!
//! Exposes the config, state, error handling and router so integration
//! tests (and the front API's relay tests) can run the same service the
//! binary serves.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
