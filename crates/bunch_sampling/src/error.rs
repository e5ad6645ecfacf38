//! Error types for bunch sampling.
//!
//! This module defines structured error types for configuration loading and
//! runtime failures of the generation pipeline.

use crate::sampler::Plane;
use bunch_core::ParameterError;
use std::path::PathBuf;
use thiserror::Error;

/// Runtime error of the generation pipeline.
///
/// Nothing is recovered locally; every variant reaches the caller of the
/// assembler unchanged.
#[derive(Debug, Error)]
pub enum SamplingError {
    /// Invalid beam parameter.
    #[error("Invalid parameter: {0}")]
    Parameter(#[from] ParameterError),

    /// The diagnostic attempt cap of a transverse sampler was exhausted.
    #[error(
        "Rejection sampling in plane {plane} gave up after {attempts} attempts (cutoff {cutoff})"
    )]
    RejectionLimit {
        /// Plane whose sampler gave up.
        plane: Plane,
        /// Attempts made in the failing call.
        attempts: u64,
        /// Hamiltonian cutoff of that plane.
        cutoff: f64,
    },

    /// The external particle container rejected a particle.
    #[error("Particle sink failed: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error loading or validating a bunch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Beam file could not be read.
    #[error("Failed to read beam file {path}: {source}")]
    Io {
        /// Path of the beam file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Beam file is not valid TOML or does not match the schema.
    #[error("Failed to parse beam file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but failed validation.
    #[error("Invalid configuration: {0}")]
    Parameter(#[from] ParameterError),
}
