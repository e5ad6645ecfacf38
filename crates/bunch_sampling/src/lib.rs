//! # bunch_sampling: Seeded Bunch Generation (Kernel Layer)
//!
//! ## Kernel Layer Role
//!
//! bunch_sampling turns beam parameters from `bunch_core` into populated
//! macro-particle bunches:
//! - Rank-aware seeding and the random stream (`rng`)
//! - Transverse rejection sampling, momentum sampling and dispersion
//!   coupling (`sampler`)
//! - Validated run configuration and TOML beam files (`config`)
//! - Per-process assembly into an external container (`assembler`)
//! - Single-machine emulation of a multi-rank run (`partition`)
//!
//! ## Usage Example
//!
//! ```rust
//! use bunch_core::{Bunch, BunchMoments, EnergyParameters, TwissParameters};
//! use bunch_sampling::{BunchAssembler, BunchConfiguration};
//!
//! let twiss = TwissParameters::untruncated(0.0, 2.0, 1.0e-6).unwrap();
//! let config = BunchConfiguration::builder()
//!     .twiss_x(twiss)
//!     .twiss_y(twiss)
//!     .energy(EnergyParameters::new(0.0025, 1.0e-3, 0.938272).unwrap())
//!     .particles(500)
//!     .charge(1.0)
//!     .build()
//!     .unwrap();
//!
//! let p0 = config.energy().reference_momentum();
//! let mut bunch = Bunch::new();
//! BunchAssembler::new(config).generate_bunch(1, &mut bunch).unwrap();
//!
//! let moments = BunchMoments::compute(&bunch, p0).unwrap();
//! assert_eq!(moments.count, 500);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (start and completion at `info`, derived
//! beam quantities at `debug`) and never installs a subscriber.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod partition;
pub mod rng;
pub mod sampler;

// Re-export commonly used items for convenience
pub use assembler::{BunchAssembler, GenerationReport};
pub use config::{BunchConfiguration, BunchConfigurationBuilder};
pub use error::{ConfigError, SamplingError};
pub use partition::{generate_partitioned, RankBunch};
pub use rng::{BunchRng, SeedSpec};
pub use sampler::{EnergyMomentumSampler, PhaseSpaceComposer, Plane, TransverseCoordinateSampler};
