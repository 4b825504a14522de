//! REST API request handlers.

pub mod post;
