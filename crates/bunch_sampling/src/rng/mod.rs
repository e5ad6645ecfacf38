//! # Random Number Generation Infrastructure
//!
//! This module provides the random stream used by every sampler in the
//! crate. There is no process-global generator: a [`BunchRng`] is created
//! from a [`SeedSpec`] by the assembler and passed down by `&mut`.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: a fixed (rank, variant, instant) triple always
//!   reproduces the same particle sequence
//! - **Independence across processes**: the rank enters the seed, so
//!   cooperating processes draw statistically independent bunches
//! - **Static dispatch**: samplers take `&mut BunchRng` directly
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper with seed management
//! - [`seed`]: Seed derivation from rank, variant and wall-clock time
//!
//! ## Usage Example
//!
//! ```rust
//! use bunch_sampling::rng::{BunchRng, SeedSpec};
//!
//! let spec = SeedSpec::new(0, 1, 1_700_000_000);
//! let mut rng = BunchRng::from_spec(&spec);
//!
//! let normal_value = rng.gen_normal();
//! let half_variance = rng.gen_gauss(std::f64::consts::FRAC_1_SQRT_2);
//! # let _ = (normal_value, half_variance);
//! ```

pub mod prng;
pub mod seed;

// Public re-exports
pub use prng::BunchRng;
pub use seed::{SeedSpec, RANK_SEED_STRIDE};
