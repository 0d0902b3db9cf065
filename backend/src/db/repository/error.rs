//! Error types for the call store.
//!
//! Every variant carries an [`ErrorContext`] naming the operation, the entity
//! and its id, so a failed lookup or batch store can be traced without a
//! backtrace.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a repository error happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// e.g. `store_call_batch`, `fetch_company_records`
    pub operation: Option<String>,
    /// e.g. `company`, `call_batch`
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    pub details: Option<String>,
    /// Set for unavailable stores; the same call may succeed later.
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("operation", self.operation.as_deref()),
            ("entity", self.entity.as_deref()),
            ("id", self.entity_id.as_deref()),
            ("details", self.details.as_deref()),
            ("retryable", self.retryable.then_some("true")),
        ];
        let parts: Vec<String> = fields
            .iter()
            .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Failure reported by a [`CallsRepository`](super::CallsRepository) or
/// [`CatalogRepository`](super::CatalogRepository).
#[derive(Debug, thiserror::Error)]
#[allow(clippy::result_large_err)]
pub enum RepositoryError {
    /// The store is unreachable or reports itself unhealthy.
    #[error("Call store unavailable: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// No rows for the requested company.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// A batch or row was rejected.
    #[error("Invalid call data: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Unknown repository type or unreadable seed file.
    #[error("Repository configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    #[error("Internal repository error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Unavailable store. Always retryable.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: ErrorContext {
                retryable: true,
                ..Default::default()
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Replace the context. Connection errors stay retryable.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        let retryable = matches!(self, Self::ConnectionError { .. });
        *self.context_mut() = ErrorContext {
            retryable: retryable || context.retryable,
            ..context
        };
        self
    }

    /// Set the operation, keeping the rest of the context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display_lists_set_fields() {
        let context = ErrorContext::new("fetch_company_records")
            .with_entity("company")
            .with_entity_id(42);
        assert_eq!(
            context.to_string(),
            "[operation=fetch_company_records, entity=company, id=42]"
        );
    }

    #[test]
    fn test_connection_errors_are_retryable() {
        assert!(RepositoryError::connection("store offline").is_retryable());
        assert!(!RepositoryError::not_found("company 3").is_retryable());
    }

    #[test]
    fn test_with_context_keeps_connection_retryable() {
        let err = RepositoryError::connection("store offline")
            .with_context(ErrorContext::new("list_company_ids"));
        assert!(err.is_retryable());
        assert_eq!(err.context().operation.as_deref(), Some("list_company_ids"));

        let err = RepositoryError::validation("month 13")
            .with_context(ErrorContext::new("store_call_batch").with_details("row 4"));
        assert!(!err.is_retryable());
        assert_eq!(err.context().details.as_deref(), Some("row 4"));
    }

    #[test]
    fn test_with_operation_overrides_context() {
        let err = RepositoryError::not_found("company 3").with_operation("get_company");
        assert_eq!(err.context().operation.as_deref(), Some("get_company"));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("operation=get_company"));
    }
}
