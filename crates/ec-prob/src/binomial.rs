//! Integer-trial binomial distribution `Binom(n, p)`.

use ec_core::{CountDistribution, Error, Result};
use rand::Rng;
use rand_distr::Distribution;
use statrs::function::beta::beta_reg;

use crate::math::{ln_choose, xlog1py, xlogy};

pub(crate) fn check_prob(p: f64) -> Result<()> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(Error::Validation(format!("p must be finite and in [0,1], got {}", p)));
    }
    Ok(())
}

/// Binomial distribution with an integer number of trials.
///
/// Sampling delegates to [`rand_distr::Binomial`]; density and CDF are
/// computed in closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardBinomial {
    n: u64,
    p: f64,
}

impl StandardBinomial {
    /// Create `Binom(n, p)`. Requires `0 <= p <= 1`.
    pub fn new(n: u64, p: f64) -> Result<Self> {
        check_prob(p)?;
        Ok(Self { n, p })
    }

    /// Create `Binom(n, p)` without validating `p`.
    pub fn new_unchecked(n: u64, p: f64) -> Self {
        Self { n, p }
    }

    /// Integer trial count.
    pub fn trials(&self) -> u64 {
        self.n
    }
}

impl CountDistribution for StandardBinomial {
    fn num_trials(&self) -> f64 {
        self.n as f64
    }

    fn succ_prob(&self) -> f64 {
        self.p
    }

    fn support_max(&self) -> u64 {
        self.n
    }

    fn log_pmf(&self, k: i64) -> f64 {
        if k < 0 || k as u64 > self.n {
            return f64::NEG_INFINITY;
        }
        let kf = k as f64;
        let nf = self.n as f64;
        ln_choose(nf, kf) + xlogy(kf, self.p) + xlog1py(nf - kf, -self.p)
    }

    fn cdf(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        if k as u64 >= self.n || self.p == 0.0 {
            return 1.0;
        }
        if self.p == 1.0 {
            return 0.0;
        }
        // P(X <= k) = I_{1-p}(n-k, k+1)
        let a = (self.n - k as u64) as f64;
        let b = k as f64 + 1.0;
        beta_reg(a, b, 1.0 - self.p)
    }
}

impl Distribution<u64> for StandardBinomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.p <= 0.0 {
            return 0;
        }
        if self.p >= 1.0 {
            return self.n;
        }
        match rand_distr::Binomial::new(self.n, self.p) {
            Ok(b) => b.sample(rng),
            // Only reachable with a NaN `p` from unchecked construction.
            Err(_) => 0,
        }
    }
}
