//! Statistical properties of the binomial samplers.
//!
//! Covers:
//! - goodness of fit for the integer fast path and both complement branches
//! - support containment across a parameter grid and many seeds
//! - normalization and CDF shape of the real-trial masses
//! - moment convergence
//! - fallback escalation with a starved rejection budget
//! - concurrent sampling with per-task RNG streams

use ec_prob::{
    Binomial, CountDistribution, GeneralizedBinomial, SamplerConfig, make_binomial, sample,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;
use rayon::prelude::*;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::function::beta::beta_reg;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Draw `draws` samples and histogram them over `0..=m`.
fn histogram<D: Distribution<u64>>(d: &D, m: u64, draws: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = vec![0usize; m as usize + 1];
    for _ in 0..draws {
        let k = d.sample(&mut rng);
        assert!(k <= m, "sample {} outside 0..={}", k, m);
        counts[k as usize] += 1;
    }
    counts
}

/// Pearson chi-square test; bins with expected count < 5 are pooled.
/// Returns `(statistic, critical value at alpha = 0.01)`.
fn chi_square(counts: &[usize], probs: &[f64]) -> (f64, f64) {
    let total: usize = counts.iter().sum();
    let mut stat = 0.0;
    let mut bins = 0usize;
    let (mut pooled_obs, mut pooled_exp) = (0.0, 0.0);
    for (&c, &p) in counts.iter().zip(probs) {
        let expected = p * total as f64;
        if expected < 5.0 {
            pooled_obs += c as f64;
            pooled_exp += expected;
            continue;
        }
        stat += (c as f64 - expected).powi(2) / expected;
        bins += 1;
    }
    if pooled_exp > 0.0 {
        stat += (pooled_obs - pooled_exp).powi(2) / pooled_exp;
        bins += 1;
    }
    let df = (bins - 1) as f64;
    let crit = ChiSquared::new(df).unwrap().inverse_cdf(0.99);
    (stat, crit)
}

/// Target masses renormalized over the truncated support.
fn normalized_masses<D: CountDistribution>(d: &D) -> Vec<f64> {
    let raw: Vec<f64> = (0..=d.support_max() as i64).map(|k| d.pmf(k)).collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|p| p / total).collect()
}

fn empirical_moments(d: &Binomial, draws: usize, seed: u64) -> (f64, f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (mut s1, mut s2) = (0.0, 0.0);
    for _ in 0..draws {
        let x = d.sample(&mut rng) as f64;
        s1 += x;
        s2 += x * x;
    }
    let n = draws as f64;
    let mean = s1 / n;
    (mean, s2 / n - mean * mean)
}

// ---------------------------------------------------------------------------
// Goodness of fit
// ---------------------------------------------------------------------------

#[test]
fn integer_trials_fit_standard_binomial() {
    let d = make_binomial(10.0, 0.5).unwrap();
    assert!(!d.is_generalized());
    let counts = histogram(&d, 10, 100_000, 2024);
    let probs: Vec<f64> = (0..=10).map(|k| d.pmf(k)).collect();
    let (stat, crit) = chi_square(&counts, &probs);
    assert!(stat < crit, "chi2={} crit={}", stat, crit);
}

#[test]
fn both_complement_branches_fit_their_targets() {
    for (p, seed) in [(0.3, 41u64), (0.7, 43u64)] {
        let d = make_binomial(10.4, p).unwrap();
        assert!(d.is_generalized());
        let counts = histogram(&d, 10, 100_000, seed);
        let (stat, crit) = chi_square(&counts, &normalized_masses(&d));
        assert!(stat < crit, "p={} chi2={} crit={}", p, stat, crit);
    }
}

#[test]
fn integer_complement_symmetry_is_exact() {
    let lo = make_binomial(10.0, 0.3).unwrap();
    let hi = make_binomial(10.0, 0.7).unwrap();
    for k in 0..=10 {
        let a = lo.pmf(k);
        let b = hi.pmf(10 - k);
        assert!((a - b).abs() < 1e-12, "k={} {} vs {}", k, a, b);
    }
}

// ---------------------------------------------------------------------------
// Support, normalization, CDF
// ---------------------------------------------------------------------------

#[test]
fn samples_stay_in_support() {
    let ns = [0.0, 0.3, 1.0, 2.5, 5.7, 10.4, 99.9, 1000.5, 5000.5];
    let ps = [0.0, 0.001, 0.05, 0.3, 0.5, 0.7, 0.95, 0.999, 1.0];
    for &n in &ns {
        for &p in &ps {
            let d = make_binomial(n, p).unwrap();
            let m = d.support_max();
            for seed in 0..20u64 {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..10 {
                    let k = sample(&mut rng, &d);
                    assert!(k <= m, "n={} p={} sample={}", n, p, k);
                }
            }
        }
    }
}

#[test]
fn masses_sum_to_one() {
    let grid = [
        (0.0, 0.5),
        (1.0, 0.2),
        (10.0, 0.5),
        (37.0, 0.91),
        (20.5, 0.1),
        (33.3, 0.25),
        (40.25, 0.2),
        (100.7, 0.05),
    ];
    for (n, p) in grid {
        let d = make_binomial(n, p).unwrap();
        let total: f64 = (0..=d.support_max() as i64).map(|k| d.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-9, "n={} p={} total={}", n, p, total);
    }
}

#[test]
fn fractional_masses_sum_to_incomplete_beta() {
    // Below one trial the support is {0} and the mass is (1-p)^n.
    let d = make_binomial(0.8, 0.4).unwrap();
    let total: f64 = (0..=d.support_max() as i64).map(|k| d.pmf(k)).sum();
    assert!((total - 0.6f64.powf(0.8)).abs() < 1e-14);
    assert_eq!(d.cdf(0), 1.0);

    for (n, p) in [(5.7, 0.3), (10.4, 0.7), (3.2, 0.95)] {
        let d = make_binomial(n, p).unwrap();
        let m = d.support_max();
        let total: f64 = (0..=m as i64).map(|k| d.pmf(k)).sum();
        let expected = beta_reg(n - m as f64, m as f64 + 1.0, 1.0 - p);
        assert!((total - expected).abs() < 1e-10, "n={} p={} {} vs {}", n, p, total, expected);
        assert!(total < 1.0);
    }
}

#[test]
fn scenario_fractional_support_edge() {
    let d = make_binomial(5.7, 0.3).unwrap();
    assert_eq!(d.log_pmf(6), f64::NEG_INFINITY);
    assert!((0..=5).all(|k| d.log_pmf(k).is_finite()));
    let total: f64 = (0..=5).map(|k| d.pmf(k)).sum();
    assert!((total - 1.0).abs() < 1e-3, "total={}", total);
}

#[test]
fn cdf_is_monotone_with_fixed_ends() {
    for (n, p) in [(5.7, 0.3), (10.4, 0.7), (12.0, 0.45), (64.9, 0.02), (3.2, 0.999)] {
        let d = make_binomial(n, p).unwrap();
        let m = d.support_max() as i64;
        assert_eq!(d.cdf(-1), 0.0);
        assert_eq!(d.cdf(m), 1.0);
        let mut prev = 0.0;
        for k in 0..=m {
            let c = d.cdf(k);
            assert!(c + 1e-12 >= prev, "n={} p={} k={} {} < {}", n, p, k, c, prev);
            assert!((0.0..=1.0 + 1e-12).contains(&c));
            prev = c;
        }
    }
}

// ---------------------------------------------------------------------------
// Moments
// ---------------------------------------------------------------------------

#[test]
fn moments_converge() {
    let d = make_binomial(10.4, 0.3).unwrap();
    let (mean, var) = empirical_moments(&d, 200_000, 7);
    assert!((mean - d.mean()).abs() < 0.02, "mean={} expected={}", mean, d.mean());
    assert!((var - d.variance()).abs() < 0.05, "var={} expected={}", var, d.variance());
}

#[test]
fn large_fractional_mean_within_a_tenth_of_a_percent() {
    let d = make_binomial(1000.5, 0.05).unwrap();
    assert!(d.is_generalized());
    let (mean, _) = empirical_moments(&d, 1_000_000, 1000);
    let expected = 50.025;
    assert!(((mean - expected) / expected).abs() < 1e-3, "mean={}", mean);
}

// ---------------------------------------------------------------------------
// Degenerate cases and escalation
// ---------------------------------------------------------------------------

#[test]
fn zero_trials_only_sample_zero() {
    let d = make_binomial(0.0, 0.5).unwrap();
    let counts = histogram(&d, 0, 1000, 3);
    assert_eq!(counts, vec![1000]);
}

#[test]
fn certain_success_consumes_no_randomness() {
    let d = make_binomial(3.0, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    let mut untouched = rng.clone();
    for _ in 0..1000 {
        assert_eq!(d.sample(&mut rng), 3);
    }
    assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
}

#[test]
fn starved_budget_still_returns_in_support() {
    let cases = [(3.01, 0.999), (7.2, 0.9), (10.4, 0.3), (2000.5, 0.01), (2000.5, 0.4)];
    for max_iters in [0usize, 1] {
        let cfg = SamplerConfig::with_max_iters(max_iters);
        for (n, p) in cases {
            let d = GeneralizedBinomial::new(n, p).unwrap();
            let m = d.support_max();
            let mut rng = StdRng::seed_from_u64(max_iters as u64 + 13);
            for _ in 0..500 {
                let k = d.sample_with(&mut rng, &cfg);
                assert!(k <= m, "max_iters={} n={} p={} k={}", max_iters, n, p, k);
            }
        }
    }
}

#[test]
fn rejection_budget_does_not_change_the_target() {
    // The truncated masses sum to roughly 0.29 and 0.40 here.
    for (n, p, seed) in [(2.95, 0.9, 51u64), (1.9, 0.8, 53u64)] {
        let d = GeneralizedBinomial::new(n, p).unwrap();
        let m = d.support_max();
        let target = normalized_masses(&d);
        for max_iters in [0usize, SamplerConfig::DEFAULT_MAX_ITERS] {
            let cfg = SamplerConfig::with_max_iters(max_iters);
            let mut rng = StdRng::seed_from_u64(seed + max_iters as u64);
            let mut counts = vec![0usize; m as usize + 1];
            for _ in 0..200_000 {
                counts[d.sample_with(&mut rng, &cfg) as usize] += 1;
            }
            let (stat, crit) = chi_square(&counts, &target);
            assert!(
                stat < crit,
                "n={} p={} max_iters={} chi2={} crit={}",
                n,
                p,
                max_iters,
                stat,
                crit
            );
        }
    }
}

#[test]
fn trials_beyond_u64_sample_near_the_mean() {
    let d = make_binomial(1e20, 0.5).unwrap();
    assert!(d.is_generalized());
    assert_eq!(d.support_max(), u64::MAX);
    let mut rng = StdRng::seed_from_u64(1);
    let draws: Vec<f64> = (0..1000).map(|_| d.sample(&mut rng) as f64).collect();
    let mean = draws.iter().sum::<f64>() / draws.len() as f64;
    // sd of the mean = 5e9 / sqrt(1000)
    assert!((mean - d.mean()).abs() < 1e9, "mean={}", mean);
}

#[test]
fn config_from_json_drives_sampler() {
    let cfg = SamplerConfig::from_json_str(r#"{"max_iters": 1, "small_support_max": 0}"#).unwrap();
    let d = make_binomial(4.5, 0.5).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
        assert!(d.sample_with(&mut rng, &cfg) <= 4);
    }
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn parallel_streams_match_serial_streams() {
    let d = make_binomial(57.3, 0.42).unwrap();
    let draw = |seed: u64| -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..200).map(|_| d.sample(&mut rng)).collect()
    };
    let serial: Vec<Vec<u64>> = (0..64u64).map(draw).collect();
    let parallel: Vec<Vec<u64>> = (0..64u64).into_par_iter().map(draw).collect();
    assert_eq!(serial, parallel);
}
