//! Estimation Error Types

use thiserror::Error;

/// Errors raised when configuring an estimation filter
///
/// A call that returns one of these leaves the filter exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// Window size must be at least one sample
    #[error("Invalid window size {0}: must be > 0")]
    InvalidWindowSize(usize),

    /// Coefficient array does not match the window
    #[error("Expected {expected} coefficients, got {actual}")]
    CoefficientCount { expected: usize, actual: usize },

    /// Coefficient is NaN or infinite
    #[error("Coefficient {index} is not finite: {value}")]
    NonFiniteCoefficient { index: usize, value: f64 },

    /// Coefficients cannot be normalized by their sum
    #[error("Cannot normalize coefficients with sum {sum}")]
    DegenerateNormalization { sum: f64 },

    /// Filter parameter out of its valid range
    #[error("Invalid value {value} for parameter {name}")]
    InvalidParameter { name: &'static str, value: f64 },
}
