//! Error types for neuroreg operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Result type alias for neuroreg operations.
pub type Result<T> = std::result::Result<T, NeuroregError>;

/// Main error type for neuroreg operations.
///
/// # Examples
///
/// ```
/// use neuroreg::error::NeuroregError;
///
/// let err = NeuroregError::DimensionMismatch {
///     expected: "50 samples".to_string(),
///     actual: "49 samples".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Error, Debug)]
pub enum NeuroregError {
    /// Array shapes don't match for the operation.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// Operation requires at least one sample.
    #[error("empty input: at least one sample is required")]
    EmptyInput,

    /// Invalid hyperparameter value provided.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Estimator used before `fit`.
    #[error("estimator is not fitted, call fit() first")]
    NotFitted,

    /// Network trained before `compile`.
    #[error("model is not compiled, call compile() first")]
    NotCompiled,

    /// Layer backward pass requested without a cached training forward pass.
    #[error("no cached forward pass, run a training forward pass before backward")]
    MissingForwardPass,

    /// Metric name not recognised.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// Config (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NeuroregError {
    /// Shorthand for a length mismatch between two sample sequences.
    pub(crate) fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{expected} samples"),
            actual: format!("{actual} samples"),
        }
    }

    /// Shorthand for a 2-D shape mismatch.
    pub(crate) fn shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    pub(crate) fn invalid_hyperparameter(
        param: &str,
        value: impl ToString,
        constraint: &str,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}
