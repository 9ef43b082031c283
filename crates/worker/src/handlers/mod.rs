//! Request handlers for the worker service.

pub mod generate;
