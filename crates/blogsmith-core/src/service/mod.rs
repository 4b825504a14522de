//! Service layer orchestrating the request flows.

pub mod post;
