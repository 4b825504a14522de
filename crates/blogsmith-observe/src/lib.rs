//! Observability setup for Blogsmith.
//!
//! Structured logging via `tracing` with optional OpenTelemetry trace
//! export for the request handlers and the generation pipeline.

pub mod tracing_setup;
