//! Approximate samplers used once the rejection budget is exhausted.
//!
//! Tiers are tried in a fixed order and the first one whose entry condition
//! holds is used. None of them loops without bound, so a draw always
//! terminates, at the cost of exactness for the two approximate tiers.

use ec_core::{CountDistribution, SamplerConfig};
use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};

use crate::generalized::GeneralizedBinomial;

/// Fallback sampler, in escalation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTier {
    /// `floor(n) <= small_support_max`: inverse CDF over the exact masses,
    /// renormalized like the rejection stage.
    SmallSupportInversion,
    /// Large support, `p < poisson_max_p`, `n p < poisson_max_lambda`: `Poisson(n p)`.
    PoissonApprox,
    /// Everything else: `Normal(n p, sqrt(n p (1 - p)))`.
    NormalApprox,
}

impl FallbackTier {
    /// Pick the first tier whose entry condition holds for `d`.
    pub fn select(d: &GeneralizedBinomial, config: &SamplerConfig) -> Self {
        let p = d.succ_prob();
        if d.support_max() <= config.small_support_max {
            FallbackTier::SmallSupportInversion
        } else if p < config.poisson_max_p && d.mean() < config.poisson_max_lambda {
            FallbackTier::PoissonApprox
        } else {
            FallbackTier::NormalApprox
        }
    }

    /// Draw one count in `0..=floor(n)` with this tier.
    pub fn sample<R: Rng + ?Sized>(self, d: &GeneralizedBinomial, rng: &mut R) -> u64 {
        let m = d.support_max();
        let lambda = d.mean();
        let approx: f64 = match self {
            FallbackTier::SmallSupportInversion => return invert(d, rng),
            FallbackTier::PoissonApprox => match Poisson::new(lambda) {
                Ok(pois) => Distribution::<f64>::sample(&pois, rng),
                Err(_) => lambda,
            },
            FallbackTier::NormalApprox => match Normal::new(lambda, d.std_dev()) {
                Ok(norm) => norm.sample(rng),
                Err(_) => lambda,
            },
        };
        clamp_count(approx, m)
    }
}

/// Single-uniform inverse CDF over the masses renormalized on `0..=m`.
fn invert<R: Rng + ?Sized>(d: &GeneralizedBinomial, rng: &mut R) -> u64 {
    let m = d.support_max();
    let masses: Vec<f64> = (0..=m).map(|k| d.pmf(k as i64)).collect();
    let total: f64 = masses.iter().sum();
    let u = rng.random::<f64>() * total;
    let mut acc = 0.0;
    for (k, &w) in masses.iter().enumerate() {
        acc += w;
        if acc > u {
            return k as u64;
        }
    }
    m
}

#[inline]
fn clamp_count(x: f64, m: u64) -> u64 {
    x.round().clamp(0.0, m as f64) as u64
}
