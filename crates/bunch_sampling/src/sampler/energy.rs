//! Longitudinal momentum sampling.

use super::RAW_DRAW_SIGMA;
use crate::rng::BunchRng;
use bunch_core::EnergyParameters;

/// Sampler of the longitudinal momentum `pz` around the reference momentum.
///
/// `pz = p0 + N(0, sqrt(0.5))·spreadP`, one draw per call, so the
/// perturbation has standard deviation `spreadP/sqrt(2)`.
///
/// # Examples
///
/// ```rust
/// use bunch_core::EnergyParameters;
/// use bunch_sampling::rng::BunchRng;
/// use bunch_sampling::sampler::EnergyMomentumSampler;
///
/// let params = EnergyParameters::new(1.0, 0.0, 0.938).unwrap();
/// let sampler = EnergyMomentumSampler::new(params);
/// let mut rng = BunchRng::from_seed(1);
///
/// // Zero spread: every draw is exactly p0.
/// assert_eq!(sampler.sample_momentum(&mut rng), sampler.reference_momentum());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EnergyMomentumSampler {
    params: EnergyParameters,
}

impl EnergyMomentumSampler {
    /// Creates a sampler from validated energy parameters.
    pub fn new(params: EnergyParameters) -> Self {
        Self { params }
    }

    /// Parameters the sampler was built from.
    #[inline]
    pub fn parameters(&self) -> &EnergyParameters {
        &self.params
    }

    /// Reference momentum `p0` in GeV/c.
    #[inline]
    pub fn reference_momentum(&self) -> f64 {
        self.params.reference_momentum()
    }

    /// Reference kinetic energy in GeV.
    #[inline]
    pub fn reference_kinetic_energy(&self) -> f64 {
        self.params.kinetic_energy()
    }

    /// Rest mass in GeV.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.params.mass()
    }

    /// Absolute momentum spread scale `spreadP` in GeV/c.
    #[inline]
    pub fn momentum_spread(&self) -> f64 {
        self.params.momentum_spread()
    }

    /// Draws one longitudinal momentum in GeV/c.
    #[inline]
    pub fn sample_momentum(&self, rng: &mut BunchRng) -> f64 {
        self.params.reference_momentum() + rng.gen_gauss(RAW_DRAW_SIGMA) * self.momentum_spread()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accessors() {
        let params = EnergyParameters::new(0.0025, 1.0e-3, 0.938272).unwrap();
        let sampler = EnergyMomentumSampler::new(params);
        assert_eq!(sampler.reference_kinetic_energy(), 0.0025);
        assert_eq!(sampler.mass(), 0.938272);
        assert_eq!(sampler.reference_momentum(), params.reference_momentum());
        assert_eq!(sampler.momentum_spread(), params.momentum_spread());
        assert_eq!(sampler.parameters(), &params);
    }

    #[test]
    fn test_reference_momentum_formula() {
        let sampler = EnergyMomentumSampler::new(EnergyParameters::new(1.0, 0.0, 0.938).unwrap());
        let total: f64 = 0.938 + 1.0;
        assert_relative_eq!(
            sampler.reference_momentum(),
            (total * total - 0.938 * 0.938).sqrt(),
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_zero_spread_is_deterministic() {
        let sampler = EnergyMomentumSampler::new(EnergyParameters::new(1.0, 0.0, 0.938).unwrap());
        let mut rng = BunchRng::from_seed(8);
        for _ in 0..1_000 {
            assert_eq!(sampler.sample_momentum(&mut rng), sampler.reference_momentum());
        }
    }

    #[test]
    fn test_single_draw_per_call() {
        let sampler = EnergyMomentumSampler::new(EnergyParameters::new(0.2, 0.01, 0.938).unwrap());
        let mut rng = BunchRng::from_seed(21);
        let mut reference = BunchRng::from_seed(21);

        for _ in 0..100 {
            let expected = sampler.reference_momentum()
                + reference.gen_gauss(RAW_DRAW_SIGMA) * sampler.momentum_spread();
            assert_eq!(sampler.sample_momentum(&mut rng), expected);
        }
    }

    #[test]
    fn test_momentum_spread_statistics() {
        let sampler = EnergyMomentumSampler::new(EnergyParameters::new(0.2, 0.01, 0.938).unwrap());
        let mut rng = BunchRng::from_seed(4);
        let n = 100_000;
        let draws: Vec<f64> = (0..n).map(|_| sampler.sample_momentum(&mut rng)).collect();

        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n as f64;
        let expected_std = sampler.momentum_spread() * RAW_DRAW_SIGMA;

        assert_relative_eq!(mean, sampler.reference_momentum(), max_relative = 1e-3);
        assert_relative_eq!(var.sqrt(), expected_std, max_relative = 0.02);
    }
}
