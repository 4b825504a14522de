//! SQLite user repository implementation.
//!
//! Implements `UserRepository` from `blogsmith-core` using sqlx with split
//! read/write pools.

use blogsmith_core::repository::user::UserRepository;
use blogsmith_types::error::RepositoryError;
use blogsmith_types::user::{User, UserId};
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_one(
        &self,
        query: &str,
        bind: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(query)
            .bind(bind)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        row.map(|r| user_from_row(&r)).transpose()
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (id, auth_subject, available_tokens, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.auth_subject)
        .bind(user.available_tokens)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "auth subject '{}' already exists",
                    user.auth_subject
                )))
            }
            Err(e) => Err(map_sqlx_error(e)),
        }
    }

    async fn find_by_auth_subject(
        &self,
        auth_subject: &str,
    ) -> Result<Option<User>, RepositoryError> {
        self.fetch_one(
            "SELECT id, auth_subject, available_tokens, created_at
             FROM users WHERE auth_subject = ?",
            auth_subject,
        )
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.fetch_one(
            "SELECT id, auth_subject, available_tokens, created_at
             FROM users WHERE id = ?",
            &id.to_string(),
        )
        .await
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let auth_subject: String = row
        .try_get("auth_subject")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let available_tokens: i64 = row
        .try_get("available_tokens")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(User {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        auth_subject,
        available_tokens,
        created_at: parse_datetime(&created_at)?,
    })
}

pub(super) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(super) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(super) fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepositoryError::Connection,
        other => RepositoryError::Query(other.to_string()),
    }
}
