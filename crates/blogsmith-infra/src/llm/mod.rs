//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait defined
//! in `blogsmith-core`: an OpenAI-compatible chat completions client.
//!
//! [`LlmProvider`]: blogsmith_core::llm::LlmProvider

pub mod openai_compat;

pub use openai_compat::OpenAiCompatibleProvider;
