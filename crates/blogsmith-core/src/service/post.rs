//! Post service.
//!
//! Orchestrates the two request flows: generating a post (validate, quota
//! check, three-step pipeline, transactional persist-and-debit) and deleting
//! a post (ownership-scoped delete with an explicit outcome).

use blogsmith_types::error::RepositoryError;
use blogsmith_types::post::{
    GeneratePostRequest, Post, PostId, MAX_FIELD_CHARS,
};
use crate::generation::{GenerationError, PostGenerator};
use crate::llm::LlmProvider;
use crate::repository::post::{PostRepository, QuotaDebit};
use crate::repository::user::UserRepository;

/// Errors from the generate flow, in rejection order.
#[derive(Debug, thiserror::Error)]
pub enum GeneratePostError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("no user record for the authenticated subject")]
    UnknownUser,

    #[error("generation quota exhausted")]
    QuotaExhausted,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from the delete flow.
#[derive(Debug, thiserror::Error)]
pub enum DeletePostError {
    #[error("invalid post id: {0}")]
    InvalidPostId(String),

    #[error("no user record for the authenticated subject")]
    UnknownUser,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service orchestrating post generation and deletion.
///
/// Generic over repository and provider traits to maintain clean
/// architecture -- blogsmith-core never depends on blogsmith-infra.
pub struct PostService<U: UserRepository, P: PostRepository, L: LlmProvider> {
    users: U,
    posts: P,
    generator: PostGenerator<L>,
}

impl<U: UserRepository, P: PostRepository, L: LlmProvider> PostService<U, P, L> {
    /// Create a new PostService.
    pub fn new(users: U, posts: P, generator: PostGenerator<L>) -> Self {
        Self {
            users,
            posts,
            generator,
        }
    }

    /// Generate a post for the authenticated subject.
    ///
    /// Rejection order: validation, user lookup, quota pre-check, pipeline,
    /// transactional insert-and-debit. The quota pre-check keeps exhausted
    /// users from spending provider calls; the guarded debit inside the
    /// insert transaction closes the race where quota hits zero mid-flight.
    #[tracing::instrument(skip(self, request), fields(topic = %request.topic))]
    pub async fn generate_post(
        &self,
        auth_subject: &str,
        request: GeneratePostRequest,
    ) -> Result<PostId, GeneratePostError> {
        validate_generate_request(&request)?;

        let user = self
            .users
            .find_by_auth_subject(auth_subject)
            .await?
            .ok_or(GeneratePostError::UnknownUser)?;

        if !user.has_quota() {
            return Err(GeneratePostError::QuotaExhausted);
        }

        let generated = self
            .generator
            .generate(&request.topic, &request.keywords)
            .await?;

        let post = Post {
            id: PostId::new(),
            user_id: user.id.clone(),
            topic: request.topic,
            keywords: request.keywords,
            title: generated.title,
            meta_description: generated.meta_description,
            content: generated.content,
            created_at: chrono::Utc::now(),
        };

        match self.posts.insert_with_quota_debit(&post).await? {
            QuotaDebit::Debited => {
                tracing::info!(post_id = %post.id, user_id = %post.user_id, "post generated");
                Ok(post.id)
            }
            QuotaDebit::Exhausted => Err(GeneratePostError::QuotaExhausted),
        }
    }

    /// Delete the given post if the authenticated subject owns it.
    ///
    /// Returns whether a row was actually removed. A missing post, or one
    /// owned by another user, yields `Ok(false)` -- repeating the same
    /// delete is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn delete_post(
        &self,
        auth_subject: &str,
        post_id: &str,
    ) -> Result<bool, DeletePostError> {
        let id: PostId = post_id
            .parse()
            .map_err(|_| DeletePostError::InvalidPostId(post_id.to_string()))?;

        let user = self
            .users
            .find_by_auth_subject(auth_subject)
            .await?
            .ok_or(DeletePostError::UnknownUser)?;

        let deleted = self.posts.delete_owned(&id, &user.id).await?;
        if deleted > 0 {
            tracing::info!(post_id = %id, user_id = %user.id, "post deleted");
        }
        Ok(deleted > 0)
    }
}

/// Both fields present and non-empty, each at most [`MAX_FIELD_CHARS`]
/// characters. Length is counted in characters, not bytes.
fn validate_generate_request(request: &GeneratePostRequest) -> Result<(), GeneratePostError> {
    if request.topic.is_empty() {
        return Err(GeneratePostError::Validation("topic is required".to_string()));
    }
    if request.keywords.is_empty() {
        return Err(GeneratePostError::Validation("keywords is required".to_string()));
    }
    if request.topic.chars().count() > MAX_FIELD_CHARS {
        return Err(GeneratePostError::Validation(format!(
            "topic exceeds {MAX_FIELD_CHARS} characters"
        )));
    }
    if request.keywords.chars().count() > MAX_FIELD_CHARS {
        return Err(GeneratePostError::Validation(format!(
            "keywords exceeds {MAX_FIELD_CHARS} characters"
        )));
    }
    Ok(())
}
