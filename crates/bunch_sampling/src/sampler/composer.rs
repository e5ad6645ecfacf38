//! Composition of transverse and longitudinal draws into 6D samples.

use super::{EnergyMomentumSampler, TransverseCoordinateSampler};
use crate::error::SamplingError;
use crate::rng::BunchRng;
use bunch_core::{DispersionParameters, PhaseSpaceSample};

/// Combines two transverse samplers and an energy sampler into full
/// phase-space samples.
///
/// Per particle, the momentum is drawn first, then the x plane, then the y
/// plane. The momentum deviation `dp = pz − p0` shifts the horizontal plane
/// through dispersion before angles become momenta (`p_u = u′·p0`):
///
/// ```text
/// x  = x_β + D·dp/p0
/// px = (x′_β − D′·dp/p0)·p0
/// y  = y_β,   py = y′_β·p0,   z = 0
/// ```
#[derive(Clone, Debug)]
pub struct PhaseSpaceComposer {
    dispersion: DispersionParameters,
    x_sampler: TransverseCoordinateSampler,
    y_sampler: TransverseCoordinateSampler,
    energy_sampler: EnergyMomentumSampler,
}

impl PhaseSpaceComposer {
    /// Creates a composer from its three samplers and the dispersion.
    pub fn new(
        dispersion: DispersionParameters,
        x_sampler: TransverseCoordinateSampler,
        y_sampler: TransverseCoordinateSampler,
        energy_sampler: EnergyMomentumSampler,
    ) -> Self {
        Self {
            dispersion,
            x_sampler,
            y_sampler,
            energy_sampler,
        }
    }

    /// Dispersion applied to the horizontal plane.
    #[inline]
    pub fn dispersion(&self) -> &DispersionParameters {
        &self.dispersion
    }

    /// Horizontal sampler, including its attempt counters.
    #[inline]
    pub fn x_sampler(&self) -> &TransverseCoordinateSampler {
        &self.x_sampler
    }

    /// Vertical sampler, including its attempt counters.
    #[inline]
    pub fn y_sampler(&self) -> &TransverseCoordinateSampler {
        &self.y_sampler
    }

    /// Longitudinal sampler.
    #[inline]
    pub fn energy_sampler(&self) -> &EnergyMomentumSampler {
        &self.energy_sampler
    }

    /// Draws one macro-particle.
    ///
    /// # Errors
    ///
    /// Propagates [`SamplingError::RejectionLimit`] from either transverse
    /// sampler.
    pub fn sample(&mut self, rng: &mut BunchRng) -> Result<PhaseSpaceSample, SamplingError> {
        let p0 = self.energy_sampler.reference_momentum();
        let pz = self.energy_sampler.sample_momentum(rng);
        let dp = pz - p0;
        let dx = self.dispersion.d() * dp / p0;
        let dpx = self.dispersion.d_prime() * dp / p0;

        let x = self.x_sampler.sample(rng)?;
        let y = self.y_sampler.sample(rng)?;

        Ok(PhaseSpaceSample {
            x: x.position + dx,
            px: (x.angle - dpx) * p0,
            y: y.position,
            py: y.angle * p0,
            z: 0.0,
            pz,
        })
    }
}
