//! Error types for parameter validation.
//!
//! This module provides:
//! - `ParameterError`: Raised when a beam parameter record is constructed
//!   from values that would make sampling undefined (division by zero,
//!   imaginary momentum, NaN propagation)
//!
//! Helper functions (`require_positive`, `require_finite`, ...) are shared by
//! every constructor in [`crate::types`] so that all records report the same
//! wording for the same kind of failure.

use thiserror::Error;

/// Invalid beam parameter.
///
/// # Variants
/// - `NonPositive`: Value must be strictly greater than zero
/// - `NonFinite`: Value is NaN or infinite where a finite number is required
/// - `Negative`: Value must not be below zero
/// - `OutOfRange`: A derived quantity overflows or underflows `f64`
/// - `Missing`: A required value was never supplied
/// - `InvalidRank`: Process rank is not below the world size
///
/// # Examples
/// ```
/// use bunch_core::types::{ParameterError, TwissParameters};
///
/// let err = TwissParameters::new(0.0, -1.0, 1.0e-6, 3.0).unwrap_err();
/// assert_eq!(err, ParameterError::NonPositive { name: "beta", value: -1.0 });
/// assert_eq!(err.to_string(), "Invalid parameter 'beta': -1 must be positive");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// Value must be strictly positive.
    #[error("Invalid parameter '{name}': {value} must be positive")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Value must be finite.
    #[error("Invalid parameter '{name}': {value} is not finite")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Value must be zero or positive.
    #[error("Invalid parameter '{name}': {value} must not be negative")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Derived quantity is infinite, zero or subnormal.
    #[error("Invalid parameter '{name}': derived value {value} is outside the normal f64 range")]
    OutOfRange {
        /// Name of the derived quantity.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Required parameter was not provided.
    #[error("Missing parameter '{0}'")]
    Missing(&'static str),

    /// Rank outside `[0, size)`.
    #[error("Invalid rank {rank}: must be below world size {size}")]
    InvalidRank {
        /// Requested rank.
        rank: usize,
        /// World size.
        size: usize,
    },
}

/// Returns `value` if it is finite.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NonFinite { name, value })
    }
}

/// Returns `value` if it is a normal (finite, non-zero, not subnormal) float.
pub(crate) fn require_normal(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_normal() {
        Ok(value)
    } else {
        Err(ParameterError::OutOfRange { name, value })
    }
}

/// Returns `value` if it is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    let value = require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::NonPositive { name, value })
    }
}

/// Returns `value` if it is finite and not negative.
pub(crate) fn require_non_negative(
    name: &'static str,
    value: f64,
) -> Result<f64, ParameterError> {
    let value = require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::Negative { name, value })
    }
}
