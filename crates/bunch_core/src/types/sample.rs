//! Records produced by the samplers.

use serde::{Deserialize, Serialize};

/// One transverse coordinate pair `(u, u′)` in m and rad.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransverseCoordinates {
    /// Position `u` in metres.
    pub position: f64,
    /// Angle `u′` in radians.
    pub angle: f64,
}

impl TransverseCoordinates {
    /// Creates a coordinate pair.
    #[inline]
    pub fn new(position: f64, angle: f64) -> Self {
        Self { position, angle }
    }
}

/// Full 6D phase-space coordinates of one macro-particle.
///
/// Positions are in metres and momenta in GeV/c. The generator never models
/// a longitudinal position spread, so `z` is always `0.0`.
///
/// The field order matches the column order of particle files:
/// `x, px, y, py, z, pz`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpaceSample {
    /// Horizontal position.
    pub x: f64,
    /// Horizontal momentum.
    pub px: f64,
    /// Vertical position.
    pub y: f64,
    /// Vertical momentum.
    pub py: f64,
    /// Longitudinal position.
    pub z: f64,
    /// Longitudinal momentum.
    pub pz: f64,
}

impl PhaseSpaceSample {
    /// Returns the coordinates as `[x, px, y, py, z, pz]`.
    #[inline]
    pub fn to_array(&self) -> [f64; 6] {
        [self.x, self.px, self.y, self.py, self.z, self.pz]
    }
}
