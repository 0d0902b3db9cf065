//! Errors surfaced by the service layer.

use crate::db::RepositoryError;
use crate::error::AnalysisError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a service call: either the analysis rejected its input or the
/// store failed.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_not_found())
    }

    /// Whether the caller's input was at fault.
    pub fn is_bad_request(&self) -> bool {
        match self {
            Self::Analysis(e) => e.is_input_error(),
            Self::Repository(RepositoryError::ValidationError { .. }) => true,
            Self::Repository(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let not_found: ServiceError = RepositoryError::not_found("company 1").into();
        assert!(not_found.is_not_found());
        assert!(!not_found.is_bad_request());

        let bad: ServiceError = AnalysisError::InvalidLength {
            actual: 3,
            expected: 12,
        }
        .into();
        assert!(bad.is_bad_request());
        assert!(!bad.is_not_found());
        assert_eq!(bad.to_string(), "Analysis error: series length was 3, expected 12");

        let internal: ServiceError = RepositoryError::internal("boom").into();
        assert!(!internal.is_bad_request());
    }
}
