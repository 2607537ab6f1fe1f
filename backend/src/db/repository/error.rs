//! Error types for repository operations.
//!
//! This module provides structured error handling for all repository
//! operations, with context describing where the failure happened.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
///
/// Provides additional information about where and why an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "insert_books", "list_authors")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "author", "book", "review")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Connection pool or database connection errors.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// SQL query execution errors.
    #[error("Query error: {message} {context}")]
    QueryError {
        message: String,
        context: ErrorContext,
    },

    /// Requested entity was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// A foreign key points at a row that does not exist.
    ///
    /// `field` names the referencing column (`author_id`, `book_id`) when known.
    #[error("Invalid reference: {message} {context}")]
    InvalidReference {
        field: Option<String>,
        message: String,
        context: ErrorContext,
    },

    /// Data validation failed before or after database operation.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create a connection error with full context.
    pub fn connection_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context,
        }
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::QueryError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an invalid reference error naming the referencing field.
    pub fn invalid_reference_with_context(
        field: impl Into<String>,
        message: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        Self::InvalidReference {
            field: Some(field.into()),
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an internal error with context.
    pub fn internal_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::InternalError {
            message: message.into(),
            context,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::NotFound { context, .. }
            | Self::InvalidReference { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::NotFound { context, .. }
            | Self::InvalidReference { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Name the referencing field of an [`RepositoryError::InvalidReference`].
    ///
    /// Other variants are returned unchanged.
    pub fn with_reference_field(mut self, name: impl Into<String>) -> Self {
        if let Self::InvalidReference { field, .. } = &mut self {
            *field = Some(name.into());
        }
        self
    }

    /// Whether the failure was caused by the caller's input rather than storage.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::InvalidReference { .. } | Self::ValidationError { .. }
        )
    }
}

#[cfg(feature = "sqlite-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;

        match err {
            diesel::result::Error::NotFound => RepositoryError::not_found("Record not found"),
            diesel::result::Error::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                let context =
                    ErrorContext::default().with_details(format!("db_error_kind={:?}", kind));

                match kind {
                    DatabaseErrorKind::ForeignKeyViolation => RepositoryError::InvalidReference {
                        field: None,
                        message,
                        context,
                    },
                    DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation => {
                        RepositoryError::ValidationError { message, context }
                    }
                    _ => RepositoryError::QueryError { message, context },
                }
            }
            diesel::result::Error::QueryBuilderError(e) => {
                RepositoryError::query(format!("Query builder error: {}", e))
            }
            diesel::result::Error::DeserializationError(e) => {
                RepositoryError::internal(format!("Deserialization error: {}", e))
            }
            diesel::result::Error::SerializationError(e) => {
                RepositoryError::internal(format!("Serialization error: {}", e))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "sqlite-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::connection_with_context(
            err.to_string(),
            ErrorContext::default().with_details("pool_error"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display_lists_present_parts() {
        let ctx = ErrorContext::new("insert_books")
            .with_entity("author")
            .with_entity_id(42);
        assert_eq!(ctx.to_string(), "[operation=insert_books, entity=author, id=42]");
    }

    #[test]
    fn test_with_reference_field_only_touches_invalid_reference() {
        let err = RepositoryError::InvalidReference {
            field: None,
            message: "FOREIGN KEY constraint failed".to_string(),
            context: ErrorContext::default(),
        }
        .with_reference_field("book_id");
        match err {
            RepositoryError::InvalidReference { field, .. } => {
                assert_eq!(field.as_deref(), Some("book_id"))
            }
            other => panic!("unexpected variant: {other:?}"),
        }

        let err = RepositoryError::query("boom").with_reference_field("book_id");
        assert!(matches!(err, RepositoryError::QueryError { .. }));
    }

    #[test]
    fn test_client_error_classification() {
        let dangling =
            RepositoryError::invalid_reference_with_context("book_id", "x", ErrorContext::default());
        let null = RepositoryError::ValidationError {
            message: "x".to_string(),
            context: ErrorContext::default(),
        };
        let offline = RepositoryError::connection_with_context("x", ErrorContext::default());

        assert!(dangling.is_client_error());
        assert!(null.is_client_error());
        assert!(!offline.is_client_error());
        assert!(!RepositoryError::internal("x").is_client_error());
    }

    #[test]
    fn test_with_operation_overrides_context() {
        let err = RepositoryError::internal("x").with_operation("clear_all");
        assert_eq!(err.context().operation.as_deref(), Some("clear_all"));
        assert!(err.to_string().contains("operation=clear_all"));
    }

    #[cfg(feature = "sqlite-repo")]
    #[test]
    fn test_diesel_not_found_maps_to_not_found() {
        let err: RepositoryError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
