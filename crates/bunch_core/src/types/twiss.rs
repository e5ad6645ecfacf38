//! Courant-Snyder (Twiss) parameters of a transverse plane.

use super::error::{require_finite, require_normal, require_positive, ParameterError};

/// Twiss parameters, rms emittance and Hamiltonian cutoff of one plane.
///
/// The phase-space density described by these parameters is
///
/// ```text
/// ρ(u, u') ∝ exp(-(u² + (β·u' + α·u)²) / (2·β·ε))    for  u² + (β·u' + α·u)² < cutoff²
/// ```
///
/// where `ε` is the rms emittance. A cutoff of `f64::INFINITY` gives an
/// untruncated Gaussian.
///
/// # Units
///
/// - `alpha`: rad (dimensionless)
/// - `beta`: m
/// - `emittance`: m·rad
/// - `cutoff`: same scale as `u`, compared against the normalised Hamiltonian
///
/// # Examples
///
/// ```
/// use bunch_core::types::TwissParameters;
///
/// let twiss = TwissParameters::new(-1.0, 2.0, 4.0e-6, 3.0e-3).unwrap();
/// assert_eq!(twiss.gamma(), 1.0);
/// assert!((twiss.rms_size() - (8.0e-6_f64).sqrt()).abs() < 1e-15);
///
/// assert!(TwissParameters::new(0.0, 0.0, 1.0e-6, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwissParameters {
    alpha: f64,
    beta: f64,
    emittance: f64,
    cutoff: f64,
}

impl TwissParameters {
    /// Creates validated Twiss parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if `alpha` is not finite, `beta` or
    /// `emittance` is not finite and positive, or `cutoff` is NaN or not
    /// positive. `cutoff` may be `f64::INFINITY`.
    ///
    /// Returns [`ParameterError::OutOfRange`] if `2·β·ε`, `β²` or `β/(2ε)`
    /// overflows or underflows, since the sampler scales its draws by them.
    pub fn new(
        alpha: f64,
        beta: f64,
        emittance: f64,
        cutoff: f64,
    ) -> Result<Self, ParameterError> {
        let alpha = require_finite("alpha", alpha)?;
        let beta = require_positive("beta", beta)?;
        let emittance = require_positive("emittance", emittance)?;
        let two_beta_emittance = require_normal("beta*emittance", 2.0 * beta * emittance)?;
        let beta_squared = require_normal("beta^2", beta * beta)?;
        require_normal("beta/emittance", beta_squared / two_beta_emittance)?;
        if cutoff.is_nan() {
            return Err(ParameterError::NonFinite {
                name: "cutoff",
                value: cutoff,
            });
        }
        if cutoff <= 0.0 {
            return Err(ParameterError::NonPositive {
                name: "cutoff",
                value: cutoff,
            });
        }
        Ok(Self {
            alpha,
            beta,
            emittance,
            cutoff,
        })
    }

    /// Creates Twiss parameters without a Hamiltonian cutoff.
    ///
    /// # Errors
    ///
    /// Same as [`TwissParameters::new`].
    pub fn untruncated(alpha: f64, beta: f64, emittance: f64) -> Result<Self, ParameterError> {
        Self::new(alpha, beta, emittance, f64::INFINITY)
    }

    /// Alpha (correlation) parameter.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Beta function in metres.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Gamma parameter `(1 + α²)/β`.
    #[inline]
    pub fn gamma(&self) -> f64 {
        (1.0 + self.alpha * self.alpha) / self.beta
    }

    /// RMS emittance in m·rad.
    #[inline]
    pub fn emittance(&self) -> f64 {
        self.emittance
    }

    /// Cutoff on the normalised Hamiltonian.
    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Returns `true` if a finite cutoff truncates the distribution.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.cutoff.is_finite()
    }

    /// RMS beam size `sqrt(ε·β)` of the untruncated distribution.
    #[inline]
    pub fn rms_size(&self) -> f64 {
        (self.emittance * self.beta).sqrt()
    }

    /// RMS divergence `sqrt(ε·γ)` of the untruncated distribution.
    #[inline]
    pub fn rms_divergence(&self) -> f64 {
        (self.emittance * self.gamma()).sqrt()
    }

    /// Normalised Hamiltonian `u² + (β·u' + α·u)²` of a physical coordinate pair.
    ///
    /// Accepted samples always satisfy `hamiltonian(u, u') < cutoff²`.
    #[inline]
    pub fn hamiltonian(&self, position: f64, angle: f64) -> f64 {
        let w = self.beta * angle + self.alpha * position;
        position * position + w * w
    }
}
