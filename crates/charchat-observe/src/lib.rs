//! Observability for Character Chat: log filtering and subscriber setup.

pub mod tracing_setup;
