//! Request handlers for the front API.

pub mod generate;
