//! Phase-space samplers.
//!
//! Three components make up one particle draw:
//! - [`TransverseCoordinateSampler`]: `(u, u′)` in one transverse plane by
//!   rejection sampling under a Hamiltonian cutoff
//! - [`EnergyMomentumSampler`]: longitudinal momentum around `p0`
//! - [`PhaseSpaceComposer`]: both planes plus momentum, coupled through
//!   dispersion, as a [`bunch_core::PhaseSpaceSample`]
//!
//! Every draw consumes standard normals scaled to variance 1/2, so the
//! sampled coordinates follow `exp(−H/(2βε))` for the normalised
//! Hamiltonian `H`.

mod composer;
mod energy;
mod transverse;

pub use composer::PhaseSpaceComposer;
pub use energy::EnergyMomentumSampler;
pub use transverse::TransverseCoordinateSampler;

use serde::Serialize;
use std::fmt;

/// Standard deviation of every raw normal draw, `sqrt(0.5)`.
pub(crate) const RAW_DRAW_SIGMA: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Transverse plane label, used in diagnostics and errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::X => write!(f, "x"),
            Plane::Y => write!(f, "y"),
        }
    }
}
