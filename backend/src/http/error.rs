//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::db::repository::RepositoryError;

/// Message returned for any failure the client cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request field the error is about, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            details: None,
        }
    }

    pub fn with_field(mut self, field: Option<String>) -> Self {
        self.field = field;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Request body is not well-formed JSON
    BadRequest(String),
    /// Request body is not declared as JSON
    UnsupportedMediaType(String),
    /// Well-formed JSON that does not fit the expected shape
    Validation {
        field: Option<String>,
        message: String,
        /// Where in the body the problem was found, e.g. `line 1, column 14`
        location: Option<String>,
    },
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ApiError::new("UNSUPPORTED_MEDIA_TYPE", msg),
            ),
            AppError::Validation {
                field,
                message,
                location,
            } => {
                let mut body = ApiError::new("VALIDATION_ERROR", message).with_field(field);
                if let Some(location) = location {
                    body = body.with_details(location);
                }
                (StatusCode::UNPROCESSABLE_ENTITY, body)
            }
            AppError::Repository(e) => repository_error_response(e),
        };

        (status, Json(error)).into_response()
    }
}

fn repository_error_response(err: RepositoryError) -> (StatusCode, ApiError) {
    match err {
        RepositoryError::InvalidReference { field, message, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::new("INVALID_REFERENCE", message).with_field(field),
        ),
        RepositoryError::ValidationError { message, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::new("VALIDATION_ERROR", message),
        ),
        RepositoryError::NotFound { message, .. } => {
            (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
        }
        other => {
            error!(error = %other, "Repository failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("REPOSITORY_ERROR", INTERNAL_ERROR_MESSAGE),
            )
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;

    #[test]
    fn test_invalid_reference_is_unprocessable() {
        let err = RepositoryError::invalid_reference_with_context(
            "author_id",
            "author 9 does not exist",
            ErrorContext::new("create_book"),
        );
        let (status, body) = repository_error_response(err);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, "INVALID_REFERENCE");
        assert_eq!(body.field.as_deref(), Some("author_id"));
    }

    #[test]
    fn test_storage_failure_is_opaque() {
        let err = RepositoryError::connection_with_context(
            "database is locked at /secret/path",
            ErrorContext::new("list_authors"),
        );
        let (status, body) = repository_error_response(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
        assert!(body.details.is_none());
    }

    #[test]
    fn test_optional_parts_are_omitted_from_body() {
        let body = serde_json::to_value(ApiError::new("NOT_FOUND", "no route")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"code": "NOT_FOUND", "message": "no route"})
        );
    }
}
