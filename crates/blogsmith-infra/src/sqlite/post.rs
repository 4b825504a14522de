//! SQLite post repository implementation.
//!
//! Implements `PostRepository` from `blogsmith-core`. The insert-and-debit
//! operation runs on the writer pool inside a single transaction so the
//! quota decrement and the post row commit or roll back together.

use blogsmith_core::repository::post::{PostRepository, QuotaDebit};
use blogsmith_types::error::RepositoryError;
use blogsmith_types::post::{Post, PostId};
use blogsmith_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::user::{format_datetime, map_sqlx_error, parse_datetime};

/// SQLite-backed implementation of `PostRepository`.
pub struct SqlitePostRepository {
    pool: DatabasePool,
}

impl SqlitePostRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl PostRepository for SqlitePostRepository {
    #[tracing::instrument(skip_all, fields(post_id = %post.id, user_id = %post.user_id))]
    async fn insert_with_quota_debit(
        &self,
        post: &Post,
    ) -> Result<QuotaDebit, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;

        // Guarded debit first: zero rows means the owner's quota raced to
        // zero since the service's pre-check, and nothing must persist.
        let debit = sqlx::query(
            "UPDATE users SET available_tokens = available_tokens - 1
             WHERE id = ? AND available_tokens > 0",
        )
        .bind(post.user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if debit.rows_affected() == 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Ok(QuotaDebit::Exhausted);
        }

        sqlx::query(
            "INSERT INTO posts (id, user_id, topic, keywords, title, meta_description, content, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(post.id.to_string())
        .bind(post.user_id.to_string())
        .bind(&post.topic)
        .bind(&post.keywords)
        .bind(&post.title)
        .bind(&post.meta_description)
        .bind(&post.content)
        .bind(format_datetime(&post.created_at))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(QuotaDebit::Debited)
    }

    #[tracing::instrument(skip_all, fields(post_id = %id, user_id = %owner))]
    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(owner.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, user_id, topic, keywords, title, meta_description, content, created_at
             FROM posts WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|r| post_from_row(&r)).transpose()
    }
}

fn post_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Post, RepositoryError> {
    let get_text = |column: &str| -> Result<String, RepositoryError> {
        row.try_get(column)
            .map_err(|e| RepositoryError::Query(e.to_string()))
    };

    let id: String = get_text("id")?;
    let user_id: String = get_text("user_id")?;
    let created_at: String = get_text("created_at")?;

    Ok(Post {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid post id: {e}")))?,
        user_id: user_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        topic: get_text("topic")?,
        keywords: get_text("keywords")?,
        title: get_text("title")?,
        meta_description: get_text("meta_description")?,
        content: get_text("content")?,
        created_at: parse_datetime(&created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::user::SqliteUserRepository;
    use blogsmith_core::repository::user::UserRepository;
    use blogsmith_types::user::User;
    use chrono::Utc;

    async fn test_pool() -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    async fn seed_user(pool: &DatabasePool, tokens: i64) -> User {
        let user = User {
            id: UserId::new(),
            auth_subject: format!("auth0|{}", UserId::new()),
            available_tokens: tokens,
            created_at: Utc::now(),
        };
        SqliteUserRepository::new(pool.clone())
            .create(&user)
            .await
            .unwrap();
        user
    }

    fn sample_post(owner: &UserId) -> Post {
        Post {
            id: PostId::new(),
            user_id: owner.clone(),
            topic: "Cats".to_string(),
            keywords: "pets,animals".to_string(),
            title: "Everything About Cats".to_string(),
            meta_description: "A complete guide to cats.".to_string(),
            content: "<h1>Cats</h1><p>All about cats.</p>".to_string(),
            created_at: Utc::now(),
        }
    }

    async fn tokens_of(pool: &DatabasePool, user: &UserId) -> i64 {
        let (tokens,): (i64,) =
            sqlx::query_as("SELECT available_tokens FROM users WHERE id = ?")
                .bind(user.to_string())
                .fetch_one(&pool.reader)
                .await
                .unwrap();
        tokens
    }

    #[tokio::test]
    async fn test_insert_with_debit_persists_and_decrements() {
        let (_dir, pool) = test_pool().await;
        let user = seed_user(&pool, 5).await;
        let repo = SqlitePostRepository::new(pool.clone());
        let post = sample_post(&user.id);

        let outcome = repo.insert_with_quota_debit(&post).await.unwrap();
        assert_eq!(outcome, QuotaDebit::Debited);
        assert_eq!(tokens_of(&pool, &user.id).await, 4);

        let stored = repo.find_by_id(&post.id).await.unwrap().unwrap();
        assert_eq!(stored.title, post.title);
        assert_eq!(stored.meta_description, post.meta_description);
        assert_eq!(stored.content, post.content);
        assert_eq!(stored.user_id, user.id);
    }

    #[tokio::test]
    async fn test_insert_with_exhausted_quota_rolls_back() {
        let (_dir, pool) = test_pool().await;
        let user = seed_user(&pool, 0).await;
        let repo = SqlitePostRepository::new(pool.clone());
        let post = sample_post(&user.id);

        let outcome = repo.insert_with_quota_debit(&post).await.unwrap();
        assert_eq!(outcome, QuotaDebit::Exhausted);
        assert_eq!(tokens_of(&pool, &user.id).await, 0);
        assert!(repo.find_by_id(&post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_owned_removes_exactly_one_row() {
        let (_dir, pool) = test_pool().await;
        let user = seed_user(&pool, 2).await;
        let repo = SqlitePostRepository::new(pool.clone());
        let first = sample_post(&user.id);
        let second = sample_post(&user.id);
        repo.insert_with_quota_debit(&first).await.unwrap();
        repo.insert_with_quota_debit(&second).await.unwrap();

        assert_eq!(repo.delete_owned(&first.id, &user.id).await.unwrap(), 1);
        assert!(repo.find_by_id(&first.id).await.unwrap().is_none());
        assert!(repo.find_by_id(&second.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_owned_is_idempotent() {
        let (_dir, pool) = test_pool().await;
        let user = seed_user(&pool, 1).await;
        let repo = SqlitePostRepository::new(pool.clone());
        let post = sample_post(&user.id);
        repo.insert_with_quota_debit(&post).await.unwrap();

        assert_eq!(repo.delete_owned(&post.id, &user.id).await.unwrap(), 1);
        assert_eq!(repo.delete_owned(&post.id, &user.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_with_wrong_owner_matches_nothing() {
        let (_dir, pool) = test_pool().await;
        let alice = seed_user(&pool, 1).await;
        let bob = seed_user(&pool, 1).await;
        let repo = SqlitePostRepository::new(pool.clone());
        let post = sample_post(&alice.id);
        repo.insert_with_quota_debit(&post).await.unwrap();

        assert_eq!(repo.delete_owned(&post.id, &bob.id).await.unwrap(), 0);
        assert!(repo.find_by_id(&post.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_matches_nothing() {
        let (_dir, pool) = test_pool().await;
        let user = seed_user(&pool, 1).await;
        let repo = SqlitePostRepository::new(pool.clone());

        assert_eq!(
            repo.delete_owned(&PostId::new(), &user.id).await.unwrap(),
            0
        );
    }
}
