//! Core traits for epicount
//!
//! Both the integer-trial and the real-trial binomial implement
//! [`CountDistribution`], so likelihood code can be written once against the
//! trait and never branch on which variant it was handed.

/// Discrete distribution over the counts `0..=support_max()`.
///
/// Density queries take signed `k` so that impossible outcomes (negative
/// counts, counts above the support) answer with zero probability instead of
/// failing.
pub trait CountDistribution: Send + Sync {
    /// Number of trials `n` (possibly non-integer).
    fn num_trials(&self) -> f64;

    /// Success probability `p`.
    fn succ_prob(&self) -> f64;

    /// Failure probability `1 - p`.
    fn fail_prob(&self) -> f64 {
        1.0 - self.succ_prob()
    }

    /// Largest count with non-zero probability, `floor(n)`.
    fn support_max(&self) -> u64;

    /// Expected value `n * p`.
    fn mean(&self) -> f64 {
        self.num_trials() * self.succ_prob()
    }

    /// Variance `n * p * (1 - p)`.
    fn variance(&self) -> f64 {
        self.num_trials() * self.succ_prob() * self.fail_prob()
    }

    /// Standard deviation.
    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Whether `k` lies in `0..=support_max()`.
    fn insupport(&self, k: i64) -> bool {
        k >= 0 && (k as u64) <= self.support_max()
    }

    /// Natural log of the probability mass at `k` (`-inf` outside the support).
    fn log_pmf(&self, k: i64) -> f64;

    /// Probability mass at `k`.
    fn pmf(&self, k: i64) -> f64 {
        self.log_pmf(k).exp()
    }

    /// Cumulative distribution function `P(X <= k)`.
    fn cdf(&self, k: i64) -> f64;

    /// Survival function `P(X > k)`.
    fn sf(&self, k: i64) -> f64 {
        1.0 - self.cdf(k)
    }

    /// Negative log-likelihood of a single observation.
    fn nll(&self, k: i64) -> f64 {
        -self.log_pmf(k)
    }

    /// Sum of `log_pmf` over a batch of observations.
    fn log_likelihood(&self, ks: &[i64]) -> f64 {
        ks.iter().map(|&k| self.log_pmf(k)).sum()
    }
}
