//! In-memory particle bunch.
//!
//! This module provides:
//! - [`Bunch`]: a plain `Vec`-backed [`ParticleSink`]
//! - [`BunchMoments`]: second-order statistics of a populated bunch
//!
//! A tracking engine normally supplies its own container; `Bunch` exists so
//! the generators can be exercised and their output written to files without
//! one.

mod moments;

pub use moments::{BunchMoments, PlaneMoments};

use crate::traits::ParticleSink;
use crate::types::PhaseSpaceSample;
use std::convert::Infallible;

/// Macro-particle collection with bunch-level mass and charge.
///
/// Mass and charge start unset and are recorded by the generator before any
/// particle is appended.
///
/// # Examples
///
/// ```
/// use bunch_core::{Bunch, ParticleSink, PhaseSpaceSample};
///
/// let mut bunch = Bunch::new();
/// bunch.set_mass(0.938272);
/// bunch.set_charge(1.0);
/// bunch.append_particle(PhaseSpaceSample::default()).unwrap();
///
/// assert_eq!(bunch.mass(), Some(0.938272));
/// assert_eq!(bunch.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bunch {
    mass: Option<f64>,
    charge: Option<f64>,
    particles: Vec<PhaseSpaceSample>,
}

impl Bunch {
    /// Creates an empty bunch with unset mass and charge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty bunch with room for `capacity` particles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Particle rest mass in GeV, if set.
    #[inline]
    pub fn mass(&self) -> Option<f64> {
        self.mass
    }

    /// Particle charge, if set.
    #[inline]
    pub fn charge(&self) -> Option<f64> {
        self.charge
    }

    /// Number of macro-particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` if the bunch holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles in insertion order.
    #[inline]
    pub fn particles(&self) -> &[PhaseSpaceSample] {
        &self.particles
    }

    /// Iterates over the particles in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PhaseSpaceSample> {
        self.particles.iter()
    }

    /// Consumes the bunch, returning its particles.
    pub fn into_particles(self) -> Vec<PhaseSpaceSample> {
        self.particles
    }
}

impl ParticleSink for Bunch {
    type Error = Infallible;

    #[inline]
    fn set_mass(&mut self, mass: f64) {
        self.mass = Some(mass);
    }

    #[inline]
    fn set_charge(&mut self, charge: f64) {
        self.charge = Some(charge);
    }

    #[inline]
    fn append_particle(&mut self, particle: PhaseSpaceSample) -> Result<(), Self::Error> {
        self.particles.push(particle);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Bunch {
    type Item = &'a PhaseSpaceSample;
    type IntoIter = std::slice::Iter<'a, PhaseSpaceSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
