//! Longitudinal beam parameters.

use super::error::{require_non_negative, require_positive, ParameterError};

/// Kinetic energy, relative momentum spread and rest mass of a beam.
///
/// All energies are in GeV and momenta in GeV/c. Construction derives the
/// reference momentum
///
/// ```text
/// p0 = sqrt((m + T)² − m²)
/// ```
///
/// and the absolute momentum spread `(m + T)²/p0 · δ` used by the energy
/// sampler.
///
/// # Examples
///
/// ```
/// use bunch_core::types::EnergyParameters;
///
/// // 2.5 MeV protons
/// let energy = EnergyParameters::new(0.0025, 1.0e-3, 0.938272).unwrap();
/// assert!(energy.reference_momentum() > 0.0);
/// assert!(energy.beta() < 0.1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyParameters {
    kinetic_energy: f64,
    relative_spread: f64,
    mass: f64,
    p0: f64,
    spread_p: f64,
}

impl EnergyParameters {
    /// Creates validated energy parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if `kinetic_energy` or `mass` is not finite
    /// and positive, or `relative_spread` is negative or not finite.
    pub fn new(
        kinetic_energy: f64,
        relative_spread: f64,
        mass: f64,
    ) -> Result<Self, ParameterError> {
        let kinetic_energy = require_positive("kinetic_energy", kinetic_energy)?;
        let relative_spread = require_non_negative("relative_spread", relative_spread)?;
        let mass = require_positive("mass", mass)?;

        let total = mass + kinetic_energy;
        let p0 = (total * total - mass * mass).sqrt();
        // Underflow for kinetic energies far below the mass resolution.
        let p0 = require_positive("reference_momentum", p0)?;
        let spread_p = relative_spread * total * total / p0;

        Ok(Self {
            kinetic_energy,
            relative_spread,
            mass,
            p0,
            spread_p,
        })
    }

    /// Kinetic energy in GeV.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        self.kinetic_energy
    }

    /// Relative momentum spread (dimensionless).
    #[inline]
    pub fn relative_spread(&self) -> f64 {
        self.relative_spread
    }

    /// Rest mass in GeV.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Total energy `m + T` in GeV.
    #[inline]
    pub fn total_energy(&self) -> f64 {
        self.mass + self.kinetic_energy
    }

    /// Reference momentum `p0` in GeV/c.
    #[inline]
    pub fn reference_momentum(&self) -> f64 {
        self.p0
    }

    /// Absolute momentum spread scale in GeV/c.
    #[inline]
    pub fn momentum_spread(&self) -> f64 {
        self.spread_p
    }

    /// Relativistic Lorentz factor.
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.total_energy() / self.mass
    }

    /// Relativistic velocity `v/c`.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.p0 / self.total_energy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_momentum() {
        let energy = EnergyParameters::new(1.0, 0.0, 0.938).unwrap();
        let expected = ((0.938_f64 + 1.0) * (0.938 + 1.0) - 0.938 * 0.938).sqrt();
        assert_eq!(energy.reference_momentum(), expected);
        assert_eq!(energy.momentum_spread(), 0.0);
    }

    #[test]
    fn test_momentum_spread() {
        let energy = EnergyParameters::new(0.5, 0.01, 1.0).unwrap();
        let p0 = energy.reference_momentum();
        assert_relative_eq!(energy.momentum_spread(), 0.01 * 2.25 / p0, max_relative = 1e-14);
    }

    #[test]
    fn test_relativistic_factors() {
        let energy = EnergyParameters::new(0.938272, 0.0, 0.938272).unwrap();
        assert_relative_eq!(energy.gamma(), 2.0, max_relative = 1e-14);
        assert_relative_eq!(energy.beta(), (3.0_f64).sqrt() / 2.0, max_relative = 1e-12);
        assert_relative_eq!(
            energy.reference_momentum(),
            energy.gamma() * energy.beta() * energy.mass(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_invalid_energy_parameters() {
        assert!(matches!(
            EnergyParameters::new(0.0, 0.0, 0.938),
            Err(ParameterError::NonPositive {
                name: "kinetic_energy",
                ..
            })
        ));
        assert!(matches!(
            EnergyParameters::new(1.0, -0.1, 0.938),
            Err(ParameterError::Negative {
                name: "relative_spread",
                ..
            })
        ));
        assert!(matches!(
            EnergyParameters::new(1.0, 0.0, 0.0),
            Err(ParameterError::NonPositive { name: "mass", .. })
        ));
        assert!(matches!(
            EnergyParameters::new(1.0, f64::NAN, 0.938),
            Err(ParameterError::NonFinite { .. })
        ));
    }
}
