//! Post repository trait definition.

use blogsmith_types::error::RepositoryError;
use blogsmith_types::post::{Post, PostId};
use blogsmith_types::user::UserId;

/// Outcome of the combined insert-and-debit operation.
///
/// `Exhausted` means the owner's quota raced to zero between the service's
/// pre-check and the write; the insert is rolled back and nothing persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDebit {
    Debited,
    Exhausted,
}

/// Repository trait for post persistence.
///
/// Implementations live in blogsmith-infra (e.g., SqlitePostRepository).
pub trait PostRepository: Send + Sync {
    /// Insert a post and debit one quota token from its owner, atomically.
    ///
    /// The debit is guarded by `available_tokens > 0`; when the guard fails
    /// the whole operation rolls back and `Exhausted` is returned.
    fn insert_with_quota_debit(
        &self,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<QuotaDebit, RepositoryError>> + Send;

    /// Delete at most one post matching both the id and the owning user.
    ///
    /// Returns the number of rows deleted (0 or 1). Zero matches -- the post
    /// does not exist, or belongs to another user -- is not an error.
    fn delete_owned(
        &self,
        id: &PostId,
        owner: &UserId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Look up a post by id.
    fn find_by_id(
        &self,
        id: &PostId,
    ) -> impl std::future::Future<Output = Result<Option<Post>, RepositoryError>> + Send;
}
