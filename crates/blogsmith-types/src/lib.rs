//! Shared domain types for Blogsmith.
//!
//! This crate contains the core domain types used across the Blogsmith
//! backend: User, Post, the LLM message shapes, and their associated error
//! types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod error;
pub mod llm;
pub mod post;
pub mod user;
