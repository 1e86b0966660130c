use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::GenerationError;
use crate::storage::SnapshotError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Three user-facing kinds: validation failures (field-level, nothing
/// mutated), generation failures (transient, retryable, nothing mutated),
/// and persistence read failures (blocking "cannot display" state). Nothing
/// here is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("No published portfolio")]
    NotPublished,

    #[error("Stored portfolio is corrupted: {0}")]
    Corrupted(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Missing(_) => AppError::NotPublished,
            SnapshotError::Corrupt(msg) => AppError::Corrupted(msg),
            SnapshotError::Backend(msg) => AppError::Storage(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(e) => {
                // Uniform failure contract: callers only learn that
                // generation failed and that a retry is safe.
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "Content generation failed. Please try again.".to_string(),
                )
            }
            AppError::NotPublished => (
                StatusCode::NOT_FOUND,
                "NO_PORTFOLIO",
                "No portfolio data found. Please create your portfolio first.".to_string(),
            ),
            AppError::Corrupted(msg) => {
                tracing::error!("Corrupted published portfolio: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CORRUPTED_PORTFOLIO",
                    "Could not load portfolio data. It might be corrupted.".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_validation() {
        let err: AppError = StoreError::DuplicateSkill("Rust".to_string()).into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_snapshot_errors_keep_missing_and_corrupt_distinct() {
        let missing: AppError = SnapshotError::Missing("s".to_string()).into();
        assert!(matches!(missing, AppError::NotPublished));

        let corrupt: AppError =
            SnapshotError::Corrupt("expected value at line 1".to_string()).into();
        assert!(matches!(corrupt, AppError::Corrupted(_)));
    }
}
