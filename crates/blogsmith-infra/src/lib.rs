//! Infrastructure layer for Blogsmith.
//!
//! Contains implementations of the ports defined in `blogsmith-core`:
//! SQLite storage (users, posts, sessions) and the OpenAI-compatible
//! completion client, plus environment-driven configuration.

pub mod config;
pub mod llm;
pub mod sqlite;
