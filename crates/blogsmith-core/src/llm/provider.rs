//! LlmProvider trait definition.
//!
//! This is the abstraction the generation pipeline runs against. The
//! production implementation lives in blogsmith-infra
//! (`OpenAiCompatibleProvider`); tests substitute scripted providers.

use blogsmith_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-style completion provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The pipeline
/// issues strictly sequential, non-streaming completion calls; there is no
/// retry or timeout policy at this layer -- a failure is terminal for the
/// request.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
