//! HTTP/REST API layer for Blogsmith.
//!
//! Axum-based REST API at `/api/v1/` with session-token authentication and
//! CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
