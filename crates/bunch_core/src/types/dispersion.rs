//! Linear dispersion coupling.

use super::error::{require_finite, ParameterError};

/// Dispersion `D` (m) and its derivative `D′` (rad) in the horizontal plane.
///
/// A relative momentum deviation `dp/p0` shifts the horizontal position by
/// `D·dp/p0` and the horizontal angle by `D′·dp/p0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DispersionParameters {
    d: f64,
    d_prime: f64,
}

impl DispersionParameters {
    /// Creates validated dispersion coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFinite`] if either coefficient is NaN or infinite.
    pub fn new(d: f64, d_prime: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            d: require_finite("dispersion", d)?,
            d_prime: require_finite("dispersion_prime", d_prime)?,
        })
    }

    /// Zero dispersion.
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    /// Dispersion `D` in metres.
    #[inline]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Dispersion derivative `D′` in radians.
    #[inline]
    pub fn d_prime(&self) -> f64 {
        self.d_prime
    }

    /// Returns `true` if both coefficients are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.d == 0.0 && self.d_prime == 0.0
    }
}
