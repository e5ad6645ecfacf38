//! Bunch generation configuration.
//!
//! This module provides the immutable [`BunchConfiguration`] read by the
//! assembler, its validating builder, and the TOML beam-file schema:
//!
//! ```toml
//! particles = 10000
//! charge = 1.0
//!
//! [energy]
//! kinetic_energy = 0.0025   # GeV
//! relative_spread = 0.001   # default 0
//! mass = 0.938272           # GeV
//!
//! [twiss.x]
//! alpha = -1.2              # default 0
//! beta = 0.9
//! emittance = 2.0e-6
//! cutoff = 3.0e-3           # default: untruncated
//!
//! [twiss.y]
//! beta = 0.5
//! emittance = 2.0e-6
//!
//! [dispersion]              # default: none
//! d = 0.0
//! d_prime = 0.0
//!
//! [sampling]
//! max_attempts = 1000000    # default: unbounded
//! ```

use crate::error::ConfigError;
use bunch_core::{DispersionParameters, EnergyParameters, ParameterError, TwissParameters};
use serde::Deserialize;
use std::path::Path;

/// Complete parameter set for one bunch.
///
/// Use [`BunchConfiguration::builder`] or [`BunchConfiguration::from_toml_str`]
/// to construct instances. The bunch mass is the rest mass of the energy
/// parameters.
///
/// # Examples
///
/// ```rust
/// use bunch_core::{EnergyParameters, TwissParameters};
/// use bunch_sampling::config::BunchConfiguration;
///
/// let twiss = TwissParameters::untruncated(0.0, 1.0, 1.0e-6).unwrap();
/// let config = BunchConfiguration::builder()
///     .twiss_x(twiss)
///     .twiss_y(twiss)
///     .energy(EnergyParameters::new(0.0025, 0.0, 0.938272).unwrap())
///     .particles(1_000)
///     .charge(1.0)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.particles(), 1_000);
/// assert_eq!(config.mass(), 0.938272);
/// assert!(config.dispersion().is_zero());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BunchConfiguration {
    twiss_x: TwissParameters,
    twiss_y: TwissParameters,
    energy: EnergyParameters,
    dispersion: DispersionParameters,
    particles: usize,
    charge: f64,
    max_attempts: Option<u64>,
}

impl BunchConfiguration {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> BunchConfigurationBuilder {
        BunchConfigurationBuilder::default()
    }

    /// Parses and validates a TOML beam description.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Parameter`] for values that fail validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: BeamFile = toml::from_str(content)?;
        file.into_configuration()
    }

    /// Loads a TOML beam file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`BunchConfiguration::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Horizontal Twiss parameters.
    #[inline]
    pub fn twiss_x(&self) -> &TwissParameters {
        &self.twiss_x
    }

    /// Vertical Twiss parameters.
    #[inline]
    pub fn twiss_y(&self) -> &TwissParameters {
        &self.twiss_y
    }

    /// Energy parameters.
    #[inline]
    pub fn energy(&self) -> &EnergyParameters {
        &self.energy
    }

    /// Horizontal dispersion.
    #[inline]
    pub fn dispersion(&self) -> &DispersionParameters {
        &self.dispersion
    }

    /// Number of macro-particles per bunch.
    #[inline]
    pub fn particles(&self) -> usize {
        self.particles
    }

    /// Particle rest mass in GeV.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.energy.mass()
    }

    /// Particle charge in units of the elementary charge.
    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// Diagnostic attempt cap for rejection sampling, if any.
    #[inline]
    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Returns a copy with a different particle count.
    pub fn with_particles(mut self, particles: usize) -> Self {
        self.particles = particles;
        self
    }
}

/// Builder for [`BunchConfiguration`].
///
/// Every field except dispersion and the attempt cap must be set.
#[derive(Clone, Debug, Default)]
pub struct BunchConfigurationBuilder {
    twiss_x: Option<TwissParameters>,
    twiss_y: Option<TwissParameters>,
    energy: Option<EnergyParameters>,
    dispersion: DispersionParameters,
    particles: Option<usize>,
    charge: Option<f64>,
    max_attempts: Option<u64>,
}

impl BunchConfigurationBuilder {
    /// Sets the horizontal Twiss parameters.
    #[inline]
    pub fn twiss_x(mut self, twiss: TwissParameters) -> Self {
        self.twiss_x = Some(twiss);
        self
    }

    /// Sets the vertical Twiss parameters.
    #[inline]
    pub fn twiss_y(mut self, twiss: TwissParameters) -> Self {
        self.twiss_y = Some(twiss);
        self
    }

    /// Sets the energy parameters (and with them the bunch mass).
    #[inline]
    pub fn energy(mut self, energy: EnergyParameters) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Sets the horizontal dispersion.
    #[inline]
    pub fn dispersion(mut self, dispersion: DispersionParameters) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// Sets the number of macro-particles. Zero is allowed.
    #[inline]
    pub fn particles(mut self, particles: usize) -> Self {
        self.particles = Some(particles);
        self
    }

    /// Sets the particle charge.
    #[inline]
    pub fn charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    /// Sets a diagnostic cap on rejection-sampling attempts per draw.
    #[inline]
    pub fn max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Missing`] for unset fields,
    /// [`ParameterError::NonFinite`] for a NaN or infinite charge and
    /// [`ParameterError::NonPositive`] for a zero attempt cap.
    pub fn build(self) -> Result<BunchConfiguration, ParameterError> {
        let twiss_x = self.twiss_x.ok_or(ParameterError::Missing("twiss.x"))?;
        let twiss_y = self.twiss_y.ok_or(ParameterError::Missing("twiss.y"))?;
        let energy = self.energy.ok_or(ParameterError::Missing("energy"))?;
        let particles = self.particles.ok_or(ParameterError::Missing("particles"))?;
        let charge = self.charge.ok_or(ParameterError::Missing("charge"))?;

        if !charge.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "charge",
                value: charge,
            });
        }
        if self.max_attempts == Some(0) {
            return Err(ParameterError::NonPositive {
                name: "max_attempts",
                value: 0.0,
            });
        }

        Ok(BunchConfiguration {
            twiss_x,
            twiss_y,
            energy,
            dispersion: self.dispersion,
            particles,
            charge,
            max_attempts: self.max_attempts,
        })
    }
}

// ============================================================================
// TOML beam-file schema
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BeamFile {
    particles: usize,
    charge: f64,
    energy: EnergySection,
    twiss: TwissSection,
    #[serde(default)]
    dispersion: DispersionSection,
    #[serde(default)]
    sampling: SamplingSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnergySection {
    kinetic_energy: f64,
    #[serde(default)]
    relative_spread: f64,
    mass: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TwissSection {
    x: PlaneSection,
    y: PlaneSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaneSection {
    #[serde(default)]
    alpha: f64,
    beta: f64,
    emittance: f64,
    cutoff: Option<f64>,
}

impl PlaneSection {
    fn into_twiss(self) -> Result<TwissParameters, ParameterError> {
        TwissParameters::new(
            self.alpha,
            self.beta,
            self.emittance,
            self.cutoff.unwrap_or(f64::INFINITY),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DispersionSection {
    #[serde(default)]
    d: f64,
    #[serde(default)]
    d_prime: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SamplingSection {
    max_attempts: Option<u64>,
}

impl BeamFile {
    fn into_configuration(self) -> Result<BunchConfiguration, ConfigError> {
        let mut builder = BunchConfiguration::builder()
            .twiss_x(self.twiss.x.into_twiss()?)
            .twiss_y(self.twiss.y.into_twiss()?)
            .energy(EnergyParameters::new(
                self.energy.kinetic_energy,
                self.energy.relative_spread,
                self.energy.mass,
            )?)
            .dispersion(DispersionParameters::new(
                self.dispersion.d,
                self.dispersion.d_prime,
            )?)
            .particles(self.particles)
            .charge(self.charge);
        if let Some(max_attempts) = self.sampling.max_attempts {
            builder = builder.max_attempts(max_attempts);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BEAM: &str = r#"
particles = 500
charge = -1.0

[energy]
kinetic_energy = 0.0025
relative_spread = 0.001
mass = 0.938272

[twiss.x]
alpha = -1.2
beta = 0.9
emittance = 2.0e-6
cutoff = 3.0e-3

[twiss.y]
alpha = 0.8
beta = 0.5
emittance = 1.5e-6

[dispersion]
d = 1.1
d_prime = -0.05

[sampling]
max_attempts = 1000
"#;

    const MINIMAL_BEAM: &str = r#"
particles = 0
charge = 1.0

[energy]
kinetic_energy = 1.0
mass = 0.938

[twiss.x]
beta = 1.0
emittance = 1.0e-6

[twiss.y]
beta = 2.0
emittance = 1.0e-6
"#;

    fn twiss() -> TwissParameters {
        TwissParameters::untruncated(0.0, 1.0, 1.0e-6).unwrap()
    }

    fn energy() -> EnergyParameters {
        EnergyParameters::new(0.0025, 0.0, 0.938272).unwrap()
    }

    #[test]
    fn test_builder_valid() {
        let config = BunchConfiguration::builder()
            .twiss_x(twiss())
            .twiss_y(twiss())
            .energy(energy())
            .particles(10)
            .charge(1.0)
            .build()
            .unwrap();

        assert_eq!(config.particles(), 10);
        assert_eq!(config.charge(), 1.0);
        assert_eq!(config.mass(), 0.938272);
        assert_eq!(config.max_attempts(), None);
        assert!(config.dispersion().is_zero());
    }

    #[test]
    fn test_builder_missing_fields() {
        let result = BunchConfiguration::builder()
            .twiss_y(twiss())
            .energy(energy())
            .particles(1)
            .charge(1.0)
            .build();
        assert_eq!(result, Err(ParameterError::Missing("twiss.x")));

        let result = BunchConfiguration::builder()
            .twiss_x(twiss())
            .twiss_y(twiss())
            .energy(energy())
            .charge(1.0)
            .build();
        assert_eq!(result, Err(ParameterError::Missing("particles")));

        let result = BunchConfiguration::builder()
            .twiss_x(twiss())
            .twiss_y(twiss())
            .energy(energy())
            .particles(1)
            .build();
        assert_eq!(result, Err(ParameterError::Missing("charge")));
    }

    #[test]
    fn test_builder_invalid_values() {
        let base = BunchConfiguration::builder()
            .twiss_x(twiss())
            .twiss_y(twiss())
            .energy(energy())
            .particles(1);

        assert!(matches!(
            base.clone().charge(f64::NAN).build(),
            Err(ParameterError::NonFinite { name: "charge", .. })
        ));
        assert!(matches!(
            base.charge(1.0).max_attempts(0).build(),
            Err(ParameterError::NonPositive {
                name: "max_attempts",
                ..
            })
        ));
    }

    #[test]
    fn test_with_particles() {
        let config = BunchConfiguration::from_toml_str(MINIMAL_BEAM)
            .unwrap()
            .with_particles(42);
        assert_eq!(config.particles(), 42);
    }

    #[test]
    fn test_full_beam_file() {
        let config = BunchConfiguration::from_toml_str(FULL_BEAM).unwrap();

        assert_eq!(config.particles(), 500);
        assert_eq!(config.charge(), -1.0);
        assert_eq!(config.twiss_x().alpha(), -1.2);
        assert_eq!(config.twiss_x().cutoff(), 3.0e-3);
        assert_eq!(config.twiss_y().emittance(), 1.5e-6);
        assert_eq!(config.energy().relative_spread(), 0.001);
        assert_eq!(config.dispersion().d(), 1.1);
        assert_eq!(config.dispersion().d_prime(), -0.05);
        assert_eq!(config.max_attempts(), Some(1000));
    }

    #[test]
    fn test_minimal_beam_file_defaults() {
        let config = BunchConfiguration::from_toml_str(MINIMAL_BEAM).unwrap();

        assert_eq!(config.particles(), 0);
        assert_eq!(config.twiss_x().alpha(), 0.0);
        assert!(!config.twiss_x().is_truncated());
        assert!(!config.twiss_y().is_truncated());
        assert_eq!(config.energy().relative_spread(), 0.0);
        assert!(config.dispersion().is_zero());
        assert_eq!(config.max_attempts(), None);
    }

    #[test]
    fn test_beam_file_rejects_unknown_keys() {
        let content = MINIMAL_BEAM.replace("charge = 1.0", "charge = 1.0\ncolour = \"blue\"");
        assert!(matches!(
            BunchConfiguration::from_toml_str(&content),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_beam_file_validates_values() {
        let content = MINIMAL_BEAM.replace("beta = 2.0", "beta = -2.0");
        assert!(matches!(
            BunchConfiguration::from_toml_str(&content),
            Err(ConfigError::Parameter(ParameterError::NonPositive {
                name: "beta",
                ..
            }))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = BunchConfiguration::load("/nonexistent/beam.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beam.toml");
        std::fs::write(&path, FULL_BEAM).unwrap();

        let config = BunchConfiguration::load(&path).unwrap();
        assert_eq!(config, BunchConfiguration::from_toml_str(FULL_BEAM).unwrap());
    }
}
