//! Error types for Beta-tree histogram construction
//!
//! Provides a unified error type for all betatree crates.

use thiserror::Error;

/// Core error type for Beta-tree operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
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

    /// The depth census holds no bounded region, so there is no
    /// significance budget to distribute.
    #[error("Invalid input: no depth contains a bounded region")]
    NoBoundedRegions,

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an out-of-range significance level
    pub fn invalid_alpha(alpha: f64) -> Self {
        Self::InvalidParameter(format!("Significance level {alpha} must be in (0, 1)"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Check that a significance level lies strictly inside (0, 1)
    pub fn check_alpha(alpha: f64) -> Result<()> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(Self::invalid_alpha(alpha));
        }
        Ok(())
    }

    /// True for the "nothing to allocate" condition
    pub fn is_no_bounded_regions(&self) -> bool {
        matches!(self, Self::NoBoundedRegions)
    }
}
