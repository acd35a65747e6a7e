//! Error types for subspectra

use thiserror::Error;

/// Result type alias for subspectra operations
pub type Result<T> = std::result::Result<T, SpectraError>;

/// Errors that can occur while sampling, decomposing or checking.
///
/// A theorem that fails to hold is *not* an error: checkers report it through
/// `passed = false` on their result types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectraError {
    /// Invalid parameter value (window, dimension, submatrix size)
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Dimension mismatch between inputs
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension received
        got: usize,
    },

    /// A basis construction produced the wrong number of vectors
    #[error("Rank deficient basis: expected {expected} vectors, found {found}")]
    RankDeficient {
        /// Expected basis size
        expected: usize,
        /// Number of vectors actually recovered
        found: usize,
    },

    /// Numerical instability detected
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the instability
        message: String,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

impl SpectraError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }

    /// Create a rank deficiency error
    pub fn rank_deficient(expected: usize, found: usize) -> Self {
        Self::RankDeficient { expected, found }
    }

    /// Create a numerical instability error
    pub fn numerical_instability(message: impl Into<String>) -> Self {
        Self::NumericalInstability {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpectraError::dimension_mismatch(6, 4);
        assert!(err.to_string().contains('6'));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_invalid_parameter() {
        let err = SpectraError::invalid_parameter("r", "must be <= n - 1");
        assert!(err.to_string().contains("'r'"));
        assert!(err.to_string().contains("n - 1"));
    }

    #[test]
    fn test_rank_deficient() {
        let err = SpectraError::rank_deficient(4, 3);
        assert_eq!(err, SpectraError::RankDeficient { expected: 4, found: 3 });
    }
}
