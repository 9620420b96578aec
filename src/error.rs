//! Application error taxonomy shared by every handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Field name to human-readable problem, serialized under `details`.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("not authorized")]
    NotAuthorized,
    #[error("invalid input")]
    Validation(FieldErrors),
    #[error("not found")]
    NotFound,
    #[error("{0} already exists")]
    Conflict(&'static str),
    #[error("{0}")]
    UploadRejected(String),
    #[error("{0}")]
    Upstream(&'static str),
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("storage error")]
    Storage(#[from] std::io::Error),
    #[error("database not available")]
    Unavailable,
}

impl AppError {
    /// Single-field validation failure.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.into());
        AppError::Validation(errors)
    }
}

/// JSON error body. `details` carries per-field messages for
/// validation failures and is omitted otherwise.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("Not authenticated"),
            ),
            AppError::NotAuthorized => (StatusCode::FORBIDDEN, ErrorBody::new("Not authorized")),
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid input".to_string(),
                    details: Some(details),
                },
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, ErrorBody::new("Not found")),
            AppError::Conflict(what) => (
                StatusCode::CONFLICT,
                ErrorBody::new(format!("{} already exists", what)),
            ),
            AppError::UploadRejected(reason) => (StatusCode::BAD_REQUEST, ErrorBody::new(reason)),
            AppError::Upstream(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(message))
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal server error"),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal server error"),
                )
            }
            AppError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody::new("Database not available"),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Postgres reports unique violations through the error text; the slug
/// column is the only user-facing unique constraint.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    let text = e.to_string();
    text.contains("duplicate key") || text.contains("unique constraint")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validation_body_carries_details() {
        let err = AppError::validation("subject", "Subject must be at least 5 characters");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"], "Invalid input");
        assert_eq!(
            value["details"]["subject"],
            "Subject must be at least 5 characters"
        );
    }

    #[tokio::test]
    async fn test_not_authenticated_maps_to_401() {
        let response = AppError::NotAuthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let response = AppError::Conflict("Slug").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"], "Slug already exists");
    }

    #[tokio::test]
    async fn test_database_error_is_generic_to_clients() {
        let err = AppError::Database(sqlx::Error::PoolClosed);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"], "Internal server error");
        assert!(value.get("details").is_none());
    }
}
