//! User repository trait definition.

use blogsmith_types::error::RepositoryError;
use blogsmith_types::user::{User, UserId};

/// Repository trait for user persistence.
///
/// Implementations live in blogsmith-infra (e.g., SqliteUserRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
///
/// The request handlers never create users; `create` exists for the
/// identity-provisioning integration and for test fixtures.
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Look up a user by the stable subject from the identity provider.
    fn find_by_auth_subject(
        &self,
        auth_subject: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Look up a user by internal id.
    fn find_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
