//! Shared domain types for the image generation relay.
//!
//! Both the front API and the worker depend on this crate so that the
//! request model, the parameter validation rules, and the payload encoding
//! stay identical on each side of the hop.

pub mod encoding;
pub mod error;
pub mod generation;
pub mod validation;
