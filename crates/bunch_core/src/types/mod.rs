//! Beam parameter and phase-space record types.
//!
//! This module provides:
//! - `twiss`: Courant-Snyder (Twiss) parameters of one transverse plane
//! - `energy`: Kinetic energy, momentum spread and rest mass of the beam
//! - `dispersion`: Linear dispersion coefficients (D, D′)
//! - `sample`: Plain records returned by the samplers
//! - `error`: Structured validation errors
//!
//! All parameter records validate eagerly at construction, so any value of
//! these types is safe to sample from.

pub mod dispersion;
pub mod energy;
pub mod error;
pub mod sample;
pub mod twiss;

pub use dispersion::DispersionParameters;
pub use energy::EnergyParameters;
pub use error::ParameterError;
pub use sample::{PhaseSpaceSample, TransverseCoordinates};
pub use twiss::TwissParameters;
