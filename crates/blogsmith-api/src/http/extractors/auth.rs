//! Session-token authentication extractor.
//!
//! Extracts and resolves session tokens from:
//! - `Authorization: Bearer <token>` header
//! - `X-Session-Token: <token>` header
//!
//! Tokens are SHA-256 hashed and matched against the `sessions` table,
//! which the external identity integration populates. Extracting a
//! [`Session`] is the first thing every handler does, so an invalid token
//! rejects the request before any other database or provider work.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use sqlx::Row;

use crate::http::error::AppError;
use crate::state::AppState;

/// Resolved session identity. Extracting this validates the session token.
pub struct Session {
    /// Stable subject identifier from the identity provider.
    pub auth_subject: String,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let token_hash = hash_token(&token);

        let row = sqlx::query("SELECT auth_subject FROM sessions WHERE token_hash = ?")
            .bind(&token_hash)
            .fetch_optional(&state.db_pool.reader)
            .await
            .map_err(|e| AppError::Internal(format!("database error: {e}")))?;

        match row {
            Some(row) => Ok(Session {
                auth_subject: row.get("auth_subject"),
            }),
            None => Err(AppError::Unauthorized(
                "Invalid session token. Provide a valid token via 'Authorization: Bearer <token>' or 'X-Session-Token: <token>' header.".to_string(),
            )),
        }
    }
}

/// Extract the session token from request headers.
fn extract_token(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <token>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    // Try X-Session-Token header
    if let Some(token) = parts.headers.get("x-session-token") {
        let token_str = token.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-Session-Token header encoding".to_string())
        })?;
        return Ok(token_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing session token. Provide via 'Authorization: Bearer <token>' or 'X-Session-Token: <token>' header.".to_string(),
    ))
}

/// Compute the SHA-256 hash of a session token (lowercase hex).
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)
}

/// Store a session row for a token/subject pair.
///
/// Called by the identity-provisioning integration and test fixtures; the
/// request handlers themselves never create sessions.
pub async fn insert_session(
    pool: &blogsmith_infra::sqlite::pool::DatabasePool,
    token: &str,
    auth_subject: &str,
) -> anyhow::Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    sqlx::query("INSERT INTO sessions (token_hash, auth_subject, created_at) VALUES (?, ?, ?)")
        .bind(hash_token(token))
        .bind(auth_subject)
        .bind(&now)
        .execute(&pool.writer)
        .await?;
    Ok(())
}
