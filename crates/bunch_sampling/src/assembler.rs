//! Bunch assembly: seeding, sampler construction and population.
//!
//! [`BunchAssembler::generate_bunch`] is the single entry point a tracking
//! engine calls per process. It
//!
//! 1. seeds a fresh [`BunchRng`] from (rank, variant, wall-clock second),
//! 2. builds the x/y transverse samplers and the energy sampler,
//! 3. wires them into a [`PhaseSpaceComposer`] with the dispersion,
//! 4. sets the sink's mass and charge once,
//! 5. appends exactly `particles` samples.
//!
//! Population is not transactional: on error the sink keeps what was
//! appended so far and the caller starts again from scratch.

use crate::config::BunchConfiguration;
use crate::error::SamplingError;
use crate::rng::{BunchRng, SeedSpec};
use crate::sampler::{EnergyMomentumSampler, PhaseSpaceComposer, Plane, TransverseCoordinateSampler};
use bunch_core::{ParticleSink, RankSource};
use serde::Serialize;
use tracing::{debug, info};

/// Summary of one bunch assembly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Seed of the random stream, or `None` when the caller supplied the stream.
    pub seed: Option<u64>,
    /// Rank the bunch was generated for.
    pub rank: usize,
    /// Number of cooperating ranks the rank belongs to.
    pub world_size: usize,
    /// Particles appended.
    pub particles: usize,
    /// Reference momentum `p0` in GeV/c.
    pub reference_momentum: f64,
    /// Rejection-sampling attempts in the horizontal plane.
    pub attempts_x: u64,
    /// Rejection-sampling attempts in the vertical plane.
    pub attempts_y: u64,
}

impl GenerationReport {
    /// Fraction of horizontal attempts accepted.
    pub fn acceptance_x(&self) -> Option<f64> {
        acceptance(self.particles, self.attempts_x)
    }

    /// Fraction of vertical attempts accepted.
    pub fn acceptance_y(&self) -> Option<f64> {
        acceptance(self.particles, self.attempts_y)
    }
}

fn acceptance(accepted: usize, attempts: u64) -> Option<f64> {
    (attempts > 0).then(|| accepted as f64 / attempts as f64)
}

/// Generates rank-local bunches from a [`BunchConfiguration`].
///
/// # Examples
///
/// ```rust
/// use bunch_core::{Bunch, FixedRank};
/// use bunch_sampling::assembler::BunchAssembler;
/// use bunch_sampling::config::BunchConfiguration;
///
/// let config = BunchConfiguration::from_toml_str(r#"
///     particles = 100
///     charge = 1.0
///     [energy]
///     kinetic_energy = 0.0025
///     relative_spread = 0.001
///     mass = 0.938272
///     [twiss.x]
///     beta = 0.9
///     emittance = 2.0e-6
///     cutoff = 5.0e-3
///     [twiss.y]
///     beta = 0.5
///     emittance = 2.0e-6
/// "#).unwrap();
///
/// let assembler = BunchAssembler::with_rank_source(config, &FixedRank::new(1, 4).unwrap());
/// let mut bunch = Bunch::new();
/// let report = assembler.generate_bunch_at(7, 1_700_000_000, &mut bunch).unwrap();
///
/// assert_eq!(bunch.len(), 100);
/// assert_eq!(bunch.mass(), Some(0.938272));
/// assert_eq!(report.rank, 1);
/// assert_eq!(report.world_size, 4);
/// ```
#[derive(Clone, Debug)]
pub struct BunchAssembler {
    config: BunchConfiguration,
    rank: usize,
    world_size: usize,
}

impl BunchAssembler {
    /// Creates an assembler for rank 0.
    pub fn new(config: BunchConfiguration) -> Self {
        Self {
            config,
            rank: 0,
            world_size: 1,
        }
    }

    /// Creates an assembler for the rank and world size reported by `source`.
    pub fn with_rank_source<R: RankSource + ?Sized>(config: BunchConfiguration, source: &R) -> Self {
        Self {
            config,
            rank: source.rank(),
            world_size: source.size().max(source.rank().saturating_add(1)),
        }
    }

    /// Returns the assembler for another rank.
    ///
    /// The world size is widened to cover `rank` if needed.
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = rank;
        self.world_size = self.world_size.max(rank.saturating_add(1));
        self
    }

    /// Configuration the assembler draws from.
    #[inline]
    pub fn config(&self) -> &BunchConfiguration {
        &self.config
    }

    /// Rank used for seeding.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of cooperating ranks.
    #[inline]
    pub fn world_size(&self) -> usize {
        self.world_size
    }

    /// Seed specification for `seed_variant` at `epoch_secs`.
    #[inline]
    pub fn seed_spec(&self, seed_variant: u64, epoch_secs: u64) -> SeedSpec {
        SeedSpec::new(self.rank, seed_variant, epoch_secs)
    }

    /// Builds a fresh composer with zeroed attempt counters.
    pub fn composer(&self) -> PhaseSpaceComposer {
        let max_attempts = self.config.max_attempts();
        let x = TransverseCoordinateSampler::new(Plane::X, *self.config.twiss_x())
            .with_max_attempts(max_attempts);
        let y = TransverseCoordinateSampler::new(Plane::Y, *self.config.twiss_y())
            .with_max_attempts(max_attempts);
        let energy = EnergyMomentumSampler::new(*self.config.energy());
        PhaseSpaceComposer::new(*self.config.dispersion(), x, y, energy)
    }

    /// Populates `sink` with a bunch seeded from the current wall-clock second.
    ///
    /// Two calls within the same second with the same variant and rank
    /// produce identical bunches.
    ///
    /// # Errors
    ///
    /// See [`BunchAssembler::populate`].
    pub fn generate_bunch<S: ParticleSink>(
        &self,
        seed_variant: u64,
        sink: &mut S,
    ) -> Result<GenerationReport, SamplingError> {
        let spec = SeedSpec::now(self.rank, seed_variant);
        self.generate_bunch_at(spec.variant, spec.epoch_secs, sink)
    }

    /// Populates `sink` with a bunch seeded from an explicit instant.
    ///
    /// # Errors
    ///
    /// See [`BunchAssembler::populate`].
    pub fn generate_bunch_at<S: ParticleSink>(
        &self,
        seed_variant: u64,
        epoch_secs: u64,
        sink: &mut S,
    ) -> Result<GenerationReport, SamplingError> {
        let spec = self.seed_spec(seed_variant, epoch_secs);
        let mut rng = BunchRng::from_spec(&spec);
        info!(
            "Generating bunch: rank={}/{} variant={} epoch={} seed={} particles={}",
            spec.rank,
            self.world_size,
            spec.variant,
            spec.epoch_secs,
            rng.seed(),
            self.config.particles()
        );

        let mut report = self.populate(&mut rng, sink)?;
        report.seed = Some(rng.seed());
        Ok(report)
    }

    /// Populates `sink` from a caller-owned random stream.
    ///
    /// Sets mass and charge once, then appends exactly
    /// [`BunchConfiguration::particles`] samples.
    ///
    /// # Errors
    ///
    /// - [`SamplingError::RejectionLimit`] if an attempt cap is configured and hit
    /// - [`SamplingError::Sink`] if the sink rejects a particle
    ///
    /// In both cases the sink keeps the particles appended before the failure.
    pub fn populate<S: ParticleSink>(
        &self,
        rng: &mut BunchRng,
        sink: &mut S,
    ) -> Result<GenerationReport, SamplingError> {
        let mut composer = self.composer();
        log_beam_parameters(&composer);

        sink.set_mass(self.config.mass());
        sink.set_charge(self.config.charge());

        for _ in 0..self.config.particles() {
            let particle = composer.sample(rng)?;
            sink.append_particle(particle).map_err(|e| SamplingError::Sink(Box::new(e)))?;
        }

        let report = GenerationReport {
            seed: None,
            rank: self.rank,
            world_size: self.world_size,
            particles: self.config.particles(),
            reference_momentum: composer.energy_sampler().reference_momentum(),
            attempts_x: composer.x_sampler().attempts(),
            attempts_y: composer.y_sampler().attempts(),
        };
        info!(
            "Bunch complete: rank={} particles={} acceptance x={:.4} y={:.4}",
            report.rank,
            report.particles,
            report.acceptance_x().unwrap_or(1.0),
            report.acceptance_y().unwrap_or(1.0)
        );
        Ok(report)
    }
}

fn log_beam_parameters(composer: &PhaseSpaceComposer) {
    let energy = composer.energy_sampler();
    debug!(
        "Energy: Ek={} GeV mass={} GeV p0={} GeV/c spreadP={} GeV/c",
        energy.reference_kinetic_energy(),
        energy.mass(),
        energy.reference_momentum(),
        energy.momentum_spread()
    );
    for sampler in [composer.x_sampler(), composer.y_sampler()] {
        let twiss = sampler.twiss();
        debug!(
            "Plane {}: alpha={} beta={} gamma={} emittance={} cutoff={} rms size={} rms divergence={}",
            sampler.plane(),
            twiss.alpha(),
            twiss.beta(),
            twiss.gamma(),
            twiss.emittance(),
            twiss.cutoff(),
            twiss.rms_size(),
            twiss.rms_divergence()
        );
    }
}
