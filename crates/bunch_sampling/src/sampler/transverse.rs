//! Truncated Gaussian sampling of one transverse plane.
//!
//! # Algorithm
//!
//! With `par_u = sqrt(1/(2βε))` and `par_up = sqrt(β²/(2βε))` each attempt
//! draws
//!
//! ```text
//! u  = N(0, sqrt(0.5)) / par_u
//! u0 = N(0, sqrt(0.5)) / par_up
//! ```
//!
//! and accepts when `u² + β²·u0² < cutoff²`. The accepted angle is then
//! sheared onto the tilted ellipse, `u′ = u0 − (α/β)·u`.
//!
//! The loop has no upper bound unless a diagnostic attempt cap is set. The
//! expected number of attempts is `1/P(accept)`, with
//! `P(accept) = 1 − exp(−cutoff²/(2βε))`. The cap only decides when to give
//! up; accepted samples are identical with or without it.

use super::{Plane, RAW_DRAW_SIGMA};
use crate::error::SamplingError;
use crate::rng::BunchRng;
use bunch_core::{TransverseCoordinates, TwissParameters};

/// Sampler of `(u, u′)` pairs for one transverse plane.
///
/// # Examples
///
/// ```rust
/// use bunch_core::TwissParameters;
/// use bunch_sampling::rng::BunchRng;
/// use bunch_sampling::sampler::{Plane, TransverseCoordinateSampler};
///
/// let twiss = TwissParameters::new(-0.5, 2.0, 1.0e-6, 3.0e-3).unwrap();
/// let mut sampler = TransverseCoordinateSampler::new(Plane::X, twiss);
/// let mut rng = BunchRng::from_seed(42);
///
/// let coords = sampler.sample(&mut rng).unwrap();
/// assert!(twiss.hamiltonian(coords.position, coords.angle) < 9.0e-6);
/// ```
#[derive(Clone, Debug)]
pub struct TransverseCoordinateSampler {
    plane: Plane,
    twiss: TwissParameters,
    par_u: f64,
    par_up: f64,
    hamilton_max: f64,
    max_attempts: Option<u64>,
    attempts: u64,
    accepted: u64,
}

impl TransverseCoordinateSampler {
    /// Creates a sampler with unbounded retries.
    pub fn new(plane: Plane, twiss: TwissParameters) -> Self {
        let beta = twiss.beta();
        let two_beta_emittance = 2.0 * beta * twiss.emittance();
        Self {
            plane,
            twiss,
            par_u: (1.0 / two_beta_emittance).sqrt(),
            par_up: (beta * beta / two_beta_emittance).sqrt(),
            hamilton_max: twiss.cutoff() * twiss.cutoff(),
            max_attempts: None,
            attempts: 0,
            accepted: 0,
        }
    }

    /// Caps the number of attempts per [`sample`](Self::sample) call.
    ///
    /// `None` restores unbounded retries.
    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Plane this sampler draws for.
    #[inline]
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Twiss parameters the sampler was built from.
    #[inline]
    pub fn twiss(&self) -> &TwissParameters {
        &self.twiss
    }

    /// Upper bound on the normalised Hamiltonian, `cutoff²`.
    #[inline]
    pub fn hamilton_max(&self) -> f64 {
        self.hamilton_max
    }

    /// Attempt cap per call, if any.
    #[inline]
    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Total attempts made so far.
    #[inline]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Total accepted samples so far.
    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Fraction of attempts accepted so far, or `None` before the first attempt.
    pub fn acceptance_rate(&self) -> Option<f64> {
        (self.attempts > 0).then(|| self.accepted as f64 / self.attempts as f64)
    }

    /// Draws one coordinate pair.
    ///
    /// Each attempt consumes two normal draws, position first.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::RejectionLimit`] only when an attempt cap is
    /// set and exhausted. Without a cap this never fails but may take
    /// arbitrarily long for a cutoff that is tiny relative to `sqrt(βε)`.
    pub fn sample(&mut self, rng: &mut BunchRng) -> Result<TransverseCoordinates, SamplingError> {
        let beta = self.twiss.beta();
        let mut attempts = 0_u64;

        loop {
            let u = rng.gen_gauss(RAW_DRAW_SIGMA) / self.par_u;
            let up = rng.gen_gauss(RAW_DRAW_SIGMA) / self.par_up;
            attempts += 1;
            self.attempts += 1;

            if u * u + beta * beta * up * up < self.hamilton_max {
                self.accepted += 1;
                let angle = up - self.twiss.alpha() * u / beta;
                return Ok(TransverseCoordinates::new(u, angle));
            }

            if let Some(limit) = self.max_attempts {
                if attempts >= limit {
                    return Err(SamplingError::RejectionLimit {
                        plane: self.plane,
                        attempts,
                        cutoff: self.twiss.cutoff(),
                    });
                }
            }
        }
    }
}
