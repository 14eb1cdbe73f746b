//! Binomial distribution over a real-valued number of trials.
//!
//! For `n >= 0` and `0 <= p <= 1` the mass function is the Gamma-function
//! extension of the binomial coefficient,
//!
//! `P(X = k) = Γ(n+1) / (Γ(k+1) Γ(n-k+1)) * p^k * (1-p)^(n-k)`,
//!
//! supported on `k = 0..=floor(n)`. Integer `n` gives back `Binom(n, p)`.
//!
//! For fractional `n` the masses are truncated at `floor(n)`, and their partial
//! sums satisfy `sum_{j <= k} P(X = j) = I_{1-p}(n - k, k + 1)` for every
//! `k < n`. The full sum is therefore `I_{1-p}(n - floor(n), floor(n) + 1)`,
//! slightly below one. [`GeneralizedBinomial::cdf`] agrees with the partial
//! sums below `floor(n)` and assigns the missing mass to `floor(n)`.
//!
//! Sampling targets the renormalized masses `P(X = k) / sum_j P(X = j)`, so
//! below `floor(n)` the sampled CDF is `cdf(k)` divided by that total. Every
//! sampling path (rejection and each fallback tier) uses the same target.

use ec_core::{CountDistribution, Error, Result, SamplerConfig};
use rand::Rng;
use rand_distr::Distribution;
use statrs::function::beta::beta_reg;

use crate::binomial::check_prob;
use crate::math::{SUPPORT_LIMIT, ln_choose, xlog1py, xlogy};
use crate::sampler;

/// Binomial-like count distribution with real `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralizedBinomial {
    n: f64,
    p: f64,
}

impl GeneralizedBinomial {
    /// Create the distribution, rejecting `n < 0`, non-finite `n`, and `p` outside `[0, 1]`.
    pub fn new(n: f64, p: f64) -> Result<Self> {
        if !n.is_finite() || n < 0.0 {
            return Err(Error::Validation(format!("n must be finite and >= 0, got {}", n)));
        }
        check_prob(p)?;
        Ok(Self { n, p })
    }

    /// Create the distribution without validation, for callers that check once outside a hot loop.
    pub fn new_unchecked(n: f64, p: f64) -> Self {
        Self { n, p }
    }

    /// Validate only when `check_args` is set.
    pub fn with_check(n: f64, p: f64, check_args: bool) -> Result<Self> {
        if check_args { Self::new(n, p) } else { Ok(Self::new_unchecked(n, p)) }
    }

    /// `(n, p)`.
    pub fn params(&self) -> (f64, f64) {
        (self.n, self.p)
    }

    /// Draw one count using a custom sampler configuration.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R, config: &SamplerConfig) -> u64 {
        sampler::sample_generalized(self, rng, config)
    }
}

impl CountDistribution for GeneralizedBinomial {
    fn num_trials(&self) -> f64 {
        self.n
    }

    fn succ_prob(&self) -> f64 {
        self.p
    }

    /// `floor(n)`, saturating at `u64::MAX` for `n >= 2^64`.
    fn support_max(&self) -> u64 {
        if self.n >= SUPPORT_LIMIT { u64::MAX } else { self.n.floor() as u64 }
    }

    fn log_pmf(&self, k: i64) -> f64 {
        let m = self.support_max();
        if k < 0 || k as u64 > m {
            return f64::NEG_INFINITY;
        }
        // All mass sits on one end of the support.
        if self.p == 0.0 {
            return if k == 0 { 0.0 } else { f64::NEG_INFINITY };
        }
        if self.p == 1.0 {
            return if k as u64 == m { 0.0 } else { f64::NEG_INFINITY };
        }
        let kf = k as f64;
        ln_choose(self.n, kf) + xlogy(kf, self.p) + xlog1py(self.n - kf, -self.p)
    }

    fn cdf(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        if k as u64 >= self.support_max() || self.p == 0.0 {
            return 1.0;
        }
        if self.p == 1.0 {
            return 0.0;
        }
        // 1 - I_p(k+1, n-k) == I_{1-p}(n-k, k+1)
        let kf = k as f64;
        beta_reg(self.n - kf, kf + 1.0, 1.0 - self.p)
    }
}

impl Distribution<u64> for GeneralizedBinomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        sampler::sample_generalized(self, rng, &SamplerConfig::default())
    }
}
