//! Statistical properties of sampled bunches.
//!
//! These tests check the sampled distributions against their closed forms.
//!
//! # Test Categories
//!
//! 1. **Truncation**: every accepted pair lies strictly inside the cutoff
//! 2. **Untruncated moments**: `<u²> = εβ`, `<u′²> = εγ`, `<uu′> = −εα`
//! 3. **Longitudinal**: `pz` centred on `p0` with RMS `spreadP/√2`
//! 4. **Bunch moments**: Twiss parameters recovered from an assembled bunch

use approx::assert_relative_eq;
use bunch_core::{
    Bunch, BunchMoments, DispersionParameters, EnergyParameters, TransverseCoordinates,
    TwissParameters,
};
use bunch_sampling::rng::BunchRng;
use bunch_sampling::sampler::{EnergyMomentumSampler, Plane, TransverseCoordinateSampler};
use bunch_sampling::{BunchAssembler, BunchConfiguration};

fn draw(twiss: TwissParameters, n: usize, seed: u64) -> Vec<TransverseCoordinates> {
    let mut sampler = TransverseCoordinateSampler::new(Plane::X, twiss);
    let mut rng = BunchRng::from_seed(seed);
    (0..n).map(|_| sampler.sample(&mut rng).unwrap()).collect()
}

/// Returns `(<u²>, <u′²>, <uu′>)` about zero.
fn second_moments(coords: &[TransverseCoordinates]) -> (f64, f64, f64) {
    let n = coords.len() as f64;
    let (uu, upup, uup) = coords.iter().fold((0.0, 0.0, 0.0), |(a, b, c), p| {
        (
            a + p.position * p.position,
            b + p.angle * p.angle,
            c + p.position * p.angle,
        )
    });
    (uu / n, upup / n, uup / n)
}

// ============================================================================
// Truncation
// ============================================================================

#[test]
fn test_accepted_pairs_inside_cutoff() {
    let cutoff = 2.0e-3;
    let twiss = TwissParameters::new(-1.5, 3.0, 1.0e-6, cutoff).unwrap();

    for p in draw(twiss, 10_000, 11) {
        let h = twiss.hamiltonian(p.position, p.angle);
        assert!(h < cutoff * cutoff, "H = {} exceeds cutoff² = {}", h, cutoff * cutoff);
    }
}

#[test]
fn test_tight_cutoff_shrinks_distribution() {
    let wide = TwissParameters::untruncated(0.0, 1.0, 1.0e-6).unwrap();
    // cutoff² equals the mean Hamiltonian 2βε: about 63% acceptance
    let tight = TwissParameters::new(0.0, 1.0, 1.0e-6, (2.0e-6_f64).sqrt()).unwrap();

    let (wide_uu, _, _) = second_moments(&draw(wide, 20_000, 3));
    let (tight_uu, _, _) = second_moments(&draw(tight, 20_000, 3));
    assert!(tight_uu < 0.8 * wide_uu);
}

#[test]
fn test_acceptance_rate_matches_closed_form() {
    let (beta, emittance): (f64, f64) = (2.0, 1.0e-6);
    let cutoff = (2.0 * beta * emittance).sqrt();
    let twiss = TwissParameters::new(0.3, beta, emittance, cutoff).unwrap();
    let mut sampler = TransverseCoordinateSampler::new(Plane::Y, twiss);
    let mut rng = BunchRng::from_seed(8);

    for _ in 0..20_000 {
        sampler.sample(&mut rng).unwrap();
    }

    // P(accept) = 1 − exp(−cutoff²/(2βε)) = 1 − 1/e
    let expected = 1.0 - (-1.0_f64).exp();
    let rate = sampler.acceptance_rate().unwrap();
    assert!(
        (rate - expected).abs() < 0.02,
        "acceptance {:.4} vs {:.4}",
        rate,
        expected
    );
}

// ============================================================================
// Untruncated Moments
// ============================================================================

#[test]
fn test_unit_twiss_with_huge_cutoff() {
    let twiss = TwissParameters::new(0.0, 1.0, 1.0, 1.0e6).unwrap();
    let (uu, upup, _) = second_moments(&draw(twiss, 100_000, 2024));
    assert_relative_eq!(uu, 1.0, max_relative = 0.05);
    assert_relative_eq!(upup, 1.0, max_relative = 0.05);
}

#[test]
fn test_untruncated_position_variance_is_beta_emittance() {
    let twiss = TwissParameters::untruncated(0.0, 4.0, 2.5e-6).unwrap();
    let (uu, _, _) = second_moments(&draw(twiss, 100_000, 42));
    assert_relative_eq!(uu, 4.0 * 2.5e-6, max_relative = 0.05);
}

#[test]
fn test_untruncated_twiss_moments_with_alpha() {
    let (alpha, beta, emittance) = (-1.2, 0.9, 2.0e-6);
    let twiss = TwissParameters::untruncated(alpha, beta, emittance).unwrap();
    let (uu, upup, uup) = second_moments(&draw(twiss, 100_000, 7));

    assert_relative_eq!(uu, emittance * beta, max_relative = 0.05);
    assert_relative_eq!(upup, emittance * twiss.gamma(), max_relative = 0.05);
    assert_relative_eq!(uup, -emittance * alpha, max_relative = 0.05);
}

// ============================================================================
// Longitudinal
// ============================================================================

#[test]
fn test_momentum_distribution() {
    let energy = EnergyParameters::new(0.0025, 1.0e-2, 0.938272).unwrap();
    let sampler = EnergyMomentumSampler::new(energy);
    let mut rng = BunchRng::from_seed(21);

    let n = 100_000;
    let samples: Vec<f64> = (0..n).map(|_| sampler.sample_momentum(&mut rng)).collect();
    let mean = samples.iter().sum::<f64>() / n as f64;
    let var = samples.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n as f64;

    let p0 = energy.reference_momentum();
    let sigma = energy.momentum_spread() * std::f64::consts::FRAC_1_SQRT_2;
    assert!((mean - p0).abs() < 5.0 * sigma / (n as f64).sqrt());
    assert_relative_eq!(var.sqrt(), sigma, max_relative = 0.02);
}

// ============================================================================
// Bunch Moments
// ============================================================================

#[test]
fn test_assembled_bunch_recovers_twiss() {
    let twiss_x = TwissParameters::untruncated(-1.2, 0.9, 2.0e-6).unwrap();
    let twiss_y = TwissParameters::untruncated(0.8, 0.5, 1.0e-6).unwrap();
    let config = BunchConfiguration::builder()
        .twiss_x(twiss_x)
        .twiss_y(twiss_y)
        .energy(EnergyParameters::new(0.0025, 1.0e-3, 0.938272).unwrap())
        .dispersion(DispersionParameters::none())
        .particles(100_000)
        .charge(1.0)
        .build()
        .unwrap();
    let p0 = config.energy().reference_momentum();

    let mut bunch = Bunch::new();
    BunchAssembler::new(config)
        .generate_bunch_at(1, 1_700_000_000, &mut bunch)
        .unwrap();
    let moments = BunchMoments::compute(&bunch, p0).unwrap();

    assert_eq!(moments.count, 100_000);
    assert_relative_eq!(moments.x.emittance, 2.0e-6, max_relative = 0.05);
    assert_relative_eq!(moments.x.beta, 0.9, max_relative = 0.05);
    assert_relative_eq!(moments.x.alpha, -1.2, max_relative = 0.05);
    assert_relative_eq!(moments.y.emittance, 1.0e-6, max_relative = 0.05);
    assert_relative_eq!(moments.y.beta, 0.5, max_relative = 0.05);
    assert_relative_eq!(moments.y.alpha, 0.8, max_relative = 0.05);
    assert_relative_eq!(moments.mean_pz, p0, max_relative = 5e-3);
}
