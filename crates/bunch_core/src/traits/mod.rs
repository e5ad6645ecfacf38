//! Collaborator traits for the generation pipeline.
//!
//! This module defines the two narrow interfaces through which the
//! generators talk to the outside world:
//! - [`ParticleSink`]: the external bunch container (mass, charge, particles)
//! - [`RankSource`]: the 0-based identity of the current process
//!
//! Both are implemented by plain structs in this crate so that tests and the
//! command-line front end need no external simulation engine.

pub mod rank;
pub mod sink;

pub use rank::{EnvironmentRank, FixedRank, RankSource, SingleProcess};
pub use sink::ParticleSink;
