//! Observability for parkwatch.
//! `tracing` with `EnvFilter`, per-crate log levels, span helpers.

pub mod setup;
pub mod spans;

pub use setup::{init_tracing, init_tracing_with};
