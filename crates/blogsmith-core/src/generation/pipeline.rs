//! Three-step generation pipeline over an [`LlmProvider`].
//!
//! Step order is fixed: body first, then title and meta description, each of
//! which re-sends the body as an assistant message. Calls are strictly
//! sequential because the later prompts depend on the body. There is no
//! retry; the first failing step aborts the pipeline with the step attached.

use std::fmt;

use blogsmith_types::llm::{CompletionRequest, LlmError, Message};

use crate::llm::LlmProvider;

use super::prompt;

/// Sampling temperature for all three calls.
const TEMPERATURE: f64 = 0.5;

/// Output budgets per step. The body is long-form; title and meta
/// description are short fragments.
const BODY_MAX_TOKENS: u32 = 4096;
const TITLE_MAX_TOKENS: u32 = 80;
const META_MAX_TOKENS: u32 = 200;

/// Which pipeline step a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStep {
    Body,
    Title,
    MetaDescription,
}

impl fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStep::Body => write!(f, "body"),
            GenerationStep::Title => write!(f, "title"),
            GenerationStep::MetaDescription => write!(f, "meta description"),
        }
    }
}

/// A pipeline failure, attributed to the step it occurred in.
#[derive(Debug, thiserror::Error)]
#[error("{step} generation failed: {source}")]
pub struct GenerationError {
    pub step: GenerationStep,
    #[source]
    pub source: LlmError,
}

/// Typed intermediate: the generated post body, input to the title and
/// meta-description steps.
#[derive(Debug, Clone)]
pub struct DraftBody(pub String);

/// The assembled output of a full pipeline run.
#[derive(Debug, Clone)]
pub struct GeneratedPost {
    pub content: String,
    pub title: String,
    pub meta_description: String,
}

/// Runs the body -> title -> meta-description pipeline against a provider.
pub struct PostGenerator<P: LlmProvider> {
    provider: P,
    model: String,
}

impl<P: LlmProvider> PostGenerator<P> {
    /// Create a generator pinned to a provider and model.
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Model identifier used for all three calls.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run the full pipeline for one post.
    #[tracing::instrument(
        name = "generate_post_content",
        skip(self),
        fields(model = %self.model, provider = %self.provider.name())
    )]
    pub async fn generate(
        &self,
        topic: &str,
        keywords: &str,
    ) -> Result<GeneratedPost, GenerationError> {
        let body = self.draft_body(topic, keywords).await?;
        let title = self.draft_title(&body).await?;
        let meta_description = self.draft_meta_description(&body).await?;

        Ok(GeneratedPost {
            content: body.0,
            title,
            meta_description,
        })
    }

    /// Step 1: generate the post body from topic and keywords.
    pub async fn draft_body(
        &self,
        topic: &str,
        keywords: &str,
    ) -> Result<DraftBody, GenerationError> {
        let request = self.request(
            vec![Message::user(prompt::body_prompt(topic, keywords))],
            BODY_MAX_TOKENS,
        );
        let content = self.complete_step(GenerationStep::Body, &request).await?;
        Ok(DraftBody(content))
    }

    /// Step 2: generate title text, seeded with the drafted body.
    pub async fn draft_title(&self, body: &DraftBody) -> Result<String, GenerationError> {
        let request = self.request(
            vec![
                Message::assistant(body.0.clone()),
                Message::user(prompt::title_prompt()),
            ],
            TITLE_MAX_TOKENS,
        );
        self.complete_step(GenerationStep::Title, &request).await
    }

    /// Step 3: generate meta-description text, seeded with the drafted body.
    pub async fn draft_meta_description(
        &self,
        body: &DraftBody,
    ) -> Result<String, GenerationError> {
        let request = self.request(
            vec![
                Message::assistant(body.0.clone()),
                Message::user(prompt::meta_description_prompt()),
            ],
            META_MAX_TOKENS,
        );
        self.complete_step(GenerationStep::MetaDescription, &request)
            .await
    }

    fn request(&self, messages: Vec<Message>, max_tokens: u32) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages,
            system: Some(prompt::GENERATOR_SYSTEM_PROMPT.to_string()),
            max_tokens,
            temperature: Some(TEMPERATURE),
        }
    }

    async fn complete_step(
        &self,
        step: GenerationStep,
        request: &CompletionRequest,
    ) -> Result<String, GenerationError> {
        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|source| GenerationError { step, source })?;

        tracing::debug!(
            step = %step,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "completion step finished"
        );

        Ok(response.content)
    }
}
