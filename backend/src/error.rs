//! Error types for the analysis core.
//!
//! Only malformed input and broken preconditions are errors. Flat series,
//! clustered or non-alternating extrema are classification outcomes and are
//! reported through [`crate::algorithms::PatternDiagnosis`] instead.

use crate::models::ExtremumKind;

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Failure of an analysis precondition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// The series does not cover exactly one year of months.
    #[error("series length was {actual}, expected {expected}")]
    InvalidLength { actual: usize, expected: usize },

    /// A monthly value is NaN or infinite.
    #[error("value for month index {month} is not finite ({value})")]
    NonFiniteValue { month: usize, value: f64 },

    /// A monthly value is below zero.
    #[error("value for month index {month} is negative ({value})")]
    NegativeValue { month: usize, value: f64 },

    /// A strategy parameter is outside its allowed range.
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    /// Transition markers were requested for extrema that do not alternate.
    #[error("extrema do not alternate: consecutive {kind:?} at month indices {first} and {second}")]
    NonAlternating {
        kind: ExtremumKind,
        first: usize,
        second: usize,
    },
}

impl AnalysisError {
    /// Whether the error was caused by the caller's input rather than a
    /// broken internal precondition.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::NonAlternating { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_message_names_both_lengths() {
        let err = AnalysisError::InvalidLength {
            actual: 7,
            expected: 12,
        };
        assert_eq!(err.to_string(), "series length was 7, expected 12");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_non_alternating_is_not_input_error() {
        let err = AnalysisError::NonAlternating {
            kind: ExtremumKind::Peak,
            first: 2,
            second: 4,
        };
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("Peak"));
    }
}
