//! Second-order moments of a populated bunch.
//!
//! Angles are recovered from transverse momenta with the same small-angle
//! approximation the composer uses: `u′ = p_u / p0`.

use super::Bunch;
use serde::Serialize;

/// Statistics of one transverse plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlaneMoments {
    /// Mean position in m.
    pub mean_position: f64,
    /// Mean angle in rad.
    pub mean_angle: f64,
    /// RMS size about the mean in m.
    pub rms_size: f64,
    /// RMS divergence about the mean in rad.
    pub rms_divergence: f64,
    /// RMS emittance `sqrt(<u²><u′²> − <uu′>²)` in m·rad.
    pub emittance: f64,
    /// Twiss alpha reconstructed as `−<uu′>/ε`.
    pub alpha: f64,
    /// Twiss beta reconstructed as `<u²>/ε` in m.
    pub beta: f64,
}

impl PlaneMoments {
    fn from_pairs<I>(pairs: I, count: f64) -> Self
    where
        I: Iterator<Item = (f64, f64)> + Clone,
    {
        let (sum_u, sum_up) = pairs
            .clone()
            .fold((0.0, 0.0), |(su, sup), (u, up)| (su + u, sup + up));
        let mean_u = sum_u / count;
        let mean_up = sum_up / count;

        let (uu, upup, uup) = pairs.fold((0.0, 0.0, 0.0), |(uu, upup, uup), (u, up)| {
            let du = u - mean_u;
            let dup = up - mean_up;
            (uu + du * du, upup + dup * dup, uup + du * dup)
        });
        let uu = uu / count;
        let upup = upup / count;
        let uup = uup / count;

        let emittance = (uu * upup - uup * uup).max(0.0).sqrt();
        let (alpha, beta) = if emittance > 0.0 {
            (-uup / emittance, uu / emittance)
        } else {
            (0.0, 0.0)
        };

        Self {
            mean_position: mean_u,
            mean_angle: mean_up,
            rms_size: uu.sqrt(),
            rms_divergence: upup.sqrt(),
            emittance,
            alpha,
            beta,
        }
    }
}

/// Second-order statistics of a bunch.
///
/// # Examples
///
/// ```
/// use bunch_core::{Bunch, BunchMoments, ParticleSink, PhaseSpaceSample};
///
/// let mut bunch = Bunch::new();
/// for x in [-1.0e-3, 1.0e-3] {
///     let p = PhaseSpaceSample { x, pz: 0.07, ..Default::default() };
///     bunch.append_particle(p).unwrap();
/// }
///
/// let moments = BunchMoments::compute(&bunch, 0.07).unwrap();
/// assert_eq!(moments.count, 2);
/// assert!((moments.x.rms_size - 1.0e-3).abs() < 1e-15);
/// assert!(BunchMoments::compute(&Bunch::new(), 0.07).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BunchMoments {
    /// Number of particles.
    pub count: usize,
    /// Horizontal plane.
    pub x: PlaneMoments,
    /// Vertical plane.
    pub y: PlaneMoments,
    /// Mean longitudinal momentum in GeV/c.
    pub mean_pz: f64,
    /// RMS longitudinal momentum spread in GeV/c.
    pub rms_pz: f64,
}

impl BunchMoments {
    /// Computes the moments of `bunch`, converting transverse momenta to
    /// angles with `reference_momentum`.
    ///
    /// Returns `None` for an empty bunch or a non-positive reference momentum.
    pub fn compute(bunch: &Bunch, reference_momentum: f64) -> Option<Self> {
        if bunch.is_empty() || reference_momentum.is_nan() || reference_momentum <= 0.0 {
            return None;
        }
        let count = bunch.len() as f64;
        let p0 = reference_momentum;

        let x = PlaneMoments::from_pairs(bunch.iter().map(|p| (p.x, p.px / p0)), count);
        let y = PlaneMoments::from_pairs(bunch.iter().map(|p| (p.y, p.py / p0)), count);

        let mean_pz = bunch.iter().map(|p| p.pz).sum::<f64>() / count;
        let var_pz = bunch
            .iter()
            .map(|p| (p.pz - mean_pz).powi(2))
            .sum::<f64>()
            / count;

        Some(Self {
            count: bunch.len(),
            x,
            y,
            mean_pz,
            rms_pz: var_pz.sqrt(),
        })
    }
}
