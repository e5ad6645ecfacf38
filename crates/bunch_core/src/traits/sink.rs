//! External bunch container interface.

use crate::types::PhaseSpaceSample;

/// Write-only view of a particle bunch owned by a tracking engine.
///
/// The generators set the two bunch-level scalars once and then append
/// particles. They never read anything back, so implementations are free to
/// stream particles elsewhere instead of storing them.
///
/// # Errors
///
/// `append_particle` may fail (allocation limits, closed output stream).
/// Generators propagate the error unmodified and stop; the container is left
/// with whatever was appended before the failure.
///
/// # Examples
///
/// ```
/// use bunch_core::traits::ParticleSink;
/// use bunch_core::types::PhaseSpaceSample;
///
/// #[derive(Default)]
/// struct Counter {
///     mass: f64,
///     count: usize,
/// }
///
/// impl ParticleSink for Counter {
///     type Error = std::convert::Infallible;
///
///     fn set_mass(&mut self, mass: f64) {
///         self.mass = mass;
///     }
///
///     fn set_charge(&mut self, _charge: f64) {}
///
///     fn append_particle(&mut self, _particle: PhaseSpaceSample) -> Result<(), Self::Error> {
///         self.count += 1;
///         Ok(())
///     }
/// }
///
/// let mut counter = Counter::default();
/// counter.append_particle(PhaseSpaceSample::default()).unwrap();
/// assert_eq!(counter.count, 1);
/// ```
pub trait ParticleSink {
    /// Failure reported by [`ParticleSink::append_particle`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sets the particle rest mass in GeV.
    fn set_mass(&mut self, mass: f64);

    /// Sets the particle charge in units of the elementary charge.
    fn set_charge(&mut self, charge: f64);

    /// Appends one macro-particle.
    fn append_particle(&mut self, particle: PhaseSpaceSample) -> Result<(), Self::Error>;
}
