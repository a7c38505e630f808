//! Error types for robust regime analysis
//!
//! Provides a unified error type for all workspace crates. Numeric
//! degeneracy (short windows, constant data) is never reported through this
//! type: the statistical routines return neutral values instead. Errors are
//! reserved for malformed configuration, malformed inputs such as an
//! unordered changepoint list, and execution failures.

use thiserror::Error;

/// Core error type for regime analysis
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a constructor or configuration
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Parameter that must lie strictly inside (0, 1)
    pub fn invalid_probability(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be in (0, 1), got {value}"))
    }

    /// Count parameter that must be at least `min`
    pub fn too_small(name: &str, min: usize, actual: usize) -> Self {
        Self::InvalidParameter(format!("{name} must be at least {min}, got {actual}"))
    }

    /// Changepoint list that does not describe a partition of the series
    pub fn invalid_changepoints(reason: &str) -> Self {
        Self::InvalidInput(format!("Invalid changepoints: {reason}"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }
}
