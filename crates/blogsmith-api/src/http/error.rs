//! REST API error types with HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use blogsmith_core::generation::GenerationError;
use blogsmith_core::service::post::{DeletePostError, GeneratePostError};
use blogsmith_types::error::RepositoryError;

/// API error with an HTTP status mapping and a stable machine-readable code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("post generation quota exhausted")]
    QuotaExhausted,

    #[error("no account found for the authenticated subject")]
    UnknownUser,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::QuotaExhausted | AppError::UnknownUser => StatusCode::FORBIDDEN,
            AppError::Generation(_) | AppError::Repository(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::QuotaExhausted => "QUOTA_EXHAUSTED",
            AppError::UnknownUser => "UNKNOWN_USER",
            AppError::Generation(_) => "GENERATION_FAILED",
            AppError::Repository(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(%status, code, error = %self, "request failed");
        } else {
            tracing::debug!(%status, code, error = %self, "request rejected");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<GeneratePostError> for AppError {
    fn from(err: GeneratePostError) -> Self {
        match err {
            GeneratePostError::Validation(msg) => AppError::Validation(msg),
            GeneratePostError::UnknownUser => AppError::UnknownUser,
            GeneratePostError::QuotaExhausted => AppError::QuotaExhausted,
            GeneratePostError::Generation(e) => AppError::Generation(e),
            GeneratePostError::Repository(e) => AppError::Repository(e),
        }
    }
}

impl From<DeletePostError> for AppError {
    fn from(err: DeletePostError) -> Self {
        match err {
            DeletePostError::InvalidPostId(id) => {
                AppError::Validation(format!("invalid post id: {id}"))
            }
            DeletePostError::UnknownUser => AppError::UnknownUser,
            DeletePostError::Repository(e) => AppError::Repository(e),
        }
    }
}
