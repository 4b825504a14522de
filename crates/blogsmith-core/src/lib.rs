//! Business logic and repository trait definitions for Blogsmith.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the generation pipeline and the
//! post service orchestrating both request flows. It depends only on
//! `blogsmith-types` -- never on `blogsmith-infra` or any database/IO crate.

pub mod generation;
pub mod llm;
pub mod repository;
pub mod service;
