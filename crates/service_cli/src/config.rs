//! Run options for the generation commands.
//!
//! Values are layered: built-in defaults, then environment variables, then
//! command-line flags. Beam parameters themselves come from the TOML beam
//! file; only the run-level knobs live here.

use bunch_core::EnvironmentRank;
use bunch_sampling::rng::seed::current_epoch_secs;
use bunch_sampling::{BunchAssembler, BunchConfiguration};
use std::path::Path;

use crate::{CliError, Result};

/// Environment variable overriding the seed variant.
pub const SEED_VARIANT_VAR: &str = "BUNCHGEN_SEED_VARIANT";

/// Environment variable overriding the particle count.
pub const PARTICLES_VAR: &str = "BUNCHGEN_PARTICLES";

/// Run-level options shared by `generate` and `stats`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Seed variant; 0 makes the seed independent of the clock.
    pub seed_variant: u64,
    /// Instant used for seeding; `None` means now.
    pub epoch_secs: Option<u64>,
    /// Rank to generate for; `None` means detect from the environment.
    pub rank: Option<usize>,
    /// Number of ranks to emulate in this process.
    pub ranks: usize,
    /// Particle count overriding the beam file.
    pub particles: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed_variant: 1,
            epoch_secs: None,
            rank: None,
            ranks: 1,
            particles: None,
        }
    }
}

impl RunOptions {
    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparsable values are ignored.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(variant) = lookup(SEED_VARIANT_VAR).and_then(|v| v.trim().parse().ok()) {
            self.seed_variant = variant;
        }

        if let Some(particles) = lookup(PARTICLES_VAR).and_then(|v| v.trim().parse().ok()) {
            self.particles = Some(particles);
        }

        self
    }

    /// Apply command-line flags; any flag given wins over earlier layers.
    pub fn with_flags(
        mut self,
        seed_variant: Option<u64>,
        epoch_secs: Option<u64>,
        rank: Option<usize>,
        ranks: Option<usize>,
        particles: Option<usize>,
    ) -> Self {
        if let Some(variant) = seed_variant {
            self.seed_variant = variant;
        }
        if epoch_secs.is_some() {
            self.epoch_secs = epoch_secs;
        }
        if rank.is_some() {
            self.rank = rank;
        }
        if let Some(ranks) = ranks {
            self.ranks = ranks;
        }
        if particles.is_some() {
            self.particles = particles;
        }
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.ranks == 0 {
            return Err(CliError::invalid_argument("--ranks must be at least 1"));
        }
        if self.ranks > 1 && self.rank.is_some() {
            return Err(CliError::invalid_argument(
                "--rank cannot be combined with --ranks greater than 1",
            ));
        }
        Ok(())
    }

    /// Seeding instant, reading the clock when none was given.
    pub fn resolve_epoch(&self) -> u64 {
        self.epoch_secs.unwrap_or_else(current_epoch_secs)
    }

    /// Assembler for single-rank runs.
    ///
    /// Uses the explicit rank when given, otherwise the rank and world size
    /// detected from the launcher environment.
    pub fn assembler(&self, beam: &BunchConfiguration) -> BunchAssembler {
        match self.rank {
            Some(rank) => BunchAssembler::new(beam.clone()).with_rank(rank),
            None => BunchAssembler::with_rank_source(beam.clone(), &EnvironmentRank::detect()),
        }
    }
}

/// Load a beam file and apply the particle override.
pub fn load_beam(path: &Path, options: &RunOptions) -> Result<BunchConfiguration> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let config = BunchConfiguration::load(path)?;
    Ok(match options.particles {
        Some(particles) => config.with_particles(particles),
        None => config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{beam, beam_file};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = RunOptions::default();
        assert_eq!(options.seed_variant, 1);
        assert_eq!(options.ranks, 1);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_env_override() {
        let options = RunOptions::default()
            .with_env_lookup(lookup(&[(SEED_VARIANT_VAR, "9"), (PARTICLES_VAR, " 250 ")]));
        assert_eq!(options.seed_variant, 9);
        assert_eq!(options.particles, Some(250));
    }

    #[test]
    fn test_env_override_ignores_garbage() {
        let options = RunOptions::default()
            .with_env_lookup(lookup(&[(SEED_VARIANT_VAR, "many"), (PARTICLES_VAR, "-1")]));
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn test_flags_win_over_env() {
        let options = RunOptions::default()
            .with_env_lookup(lookup(&[(SEED_VARIANT_VAR, "9"), (PARTICLES_VAR, "250")]))
            .with_flags(Some(3), Some(1_000), Some(2), None, None);

        assert_eq!(options.seed_variant, 3);
        assert_eq!(options.epoch_secs, Some(1_000));
        assert_eq!(options.rank, Some(2));
        assert_eq!(options.particles, Some(250));
        assert_eq!(options.resolve_epoch(), 1_000);

        let assembler = options.assembler(&beam());
        assert_eq!(assembler.rank(), 2);
        assert_eq!(assembler.world_size(), 3);
    }

    #[test]
    fn test_validate() {
        let zero = RunOptions::default().with_flags(None, None, None, Some(0), None);
        assert!(matches!(zero.validate(), Err(CliError::InvalidArgument(_))));

        let both = RunOptions::default().with_flags(None, None, Some(1), Some(4), None);
        assert!(matches!(both.validate(), Err(CliError::InvalidArgument(_))));

        let many = RunOptions::default().with_flags(None, None, None, Some(4), None);
        assert!(many.validate().is_ok());
    }

    #[test]
    fn test_load_beam_with_particle_override() {
        let file = beam_file();

        let config = load_beam(file.path(), &RunOptions::default()).unwrap();
        assert_eq!(config.particles(), 100);

        let options = RunOptions::default().with_flags(None, None, None, None, Some(7));
        let config = load_beam(file.path(), &options).unwrap();
        assert_eq!(config.particles(), 7);
    }

    #[test]
    fn test_load_beam_missing_file() {
        let result = load_beam(Path::new("/nonexistent/beam.toml"), &RunOptions::default());
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
