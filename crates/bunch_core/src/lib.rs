//! # bunch_core: Foundation Types for Particle-Bunch Generation
//!
//! ## Foundation Layer Role
//!
//! bunch_core is the bottom layer of the bunchgen workspace, providing:
//! - Beam parameter records: [`TwissParameters`], [`EnergyParameters`],
//!   [`DispersionParameters`] (`types`)
//! - Sample records: [`TransverseCoordinates`], [`PhaseSpaceSample`] (`types::sample`)
//! - Error types: [`ParameterError`] (`types::error`)
//! - Collaborator traits: [`ParticleSink`] for the external bunch container and
//!   [`RankSource`] for the process rank (`traits`)
//! - An in-memory [`Bunch`] and its statistical [`BunchMoments`] (`bunch`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other bunch_* crates and no randomness.
//! Sampling lives in `bunch_sampling`.
//!
//! ## Usage Examples
//!
//! ```rust
//! use bunch_core::types::{EnergyParameters, TwissParameters};
//!
//! let twiss = TwissParameters::new(0.0, 2.0, 1.0e-6, 3.0).unwrap();
//! assert!((twiss.gamma() - 0.5).abs() < 1e-12);
//!
//! let energy = EnergyParameters::new(1.0, 0.0, 0.938).unwrap();
//! let expected = ((0.938_f64 + 1.0).powi(2) - 0.938_f64.powi(2)).sqrt();
//! assert!((energy.reference_momentum() - expected).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bunch;
pub mod traits;
pub mod types;

pub use bunch::{Bunch, BunchMoments, PlaneMoments};
pub use traits::{EnvironmentRank, FixedRank, ParticleSink, RankSource, SingleProcess};
pub use types::{
    DispersionParameters, EnergyParameters, ParameterError, PhaseSpaceSample,
    TransverseCoordinates, TwissParameters,
};
