//! Post generation and deletion handlers.

use axum::extract::State;
use axum::Json;

use blogsmith_types::post::{
    DeletePostRequest, DeletePostResponse, GeneratePostRequest, GeneratePostResponse,
};

use crate::http::error::AppError;
use crate::http::extractors::auth::Session;
use crate::state::AppState;

/// POST /api/v1/posts/generate
///
/// Runs the full generation pipeline for the authenticated user and persists
/// the result, debiting one quota token.
pub async fn generate_post(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<GeneratePostRequest>,
) -> Result<Json<GeneratePostResponse>, AppError> {
    let post_id = state
        .post_service
        .generate_post(&session.auth_subject, body)
        .await?;
    Ok(Json(GeneratePostResponse { post_id }))
}

/// POST /api/v1/posts/delete
///
/// Deletes the given post if the authenticated user owns it. The response
/// reports whether a row was actually removed.
pub async fn delete_post(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<DeletePostRequest>,
) -> Result<Json<DeletePostResponse>, AppError> {
    let deleted = state
        .post_service
        .delete_post(&session.auth_subject, &body.post_id)
        .await?;
    Ok(Json(DeletePostResponse { deleted }))
}
