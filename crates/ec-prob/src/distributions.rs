//! Binomial entry point for model code.
//!
//! [`make_binomial`] (or equivalently [`Binomial::new`]) takes a real trial
//! count and picks the variant once: integral `n` gets the standard
//! integer-trial binomial, anything else the real-trial generalization. Call
//! sites never branch on which one they hold.
//!
//! The scalar helpers at the bottom are one-liners over the same dispatch for
//! likelihood code that works on bare `(k, n, p)` triples.

use ec_core::{CountDistribution, Result, SamplerConfig};
use rand::Rng;
use rand_distr::Distribution;

use crate::binomial::StandardBinomial;
use crate::generalized::GeneralizedBinomial;
use crate::math::is_integral;

/// Binomial distribution over an integer or real number of trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binomial {
    /// Integer `n`.
    Standard(StandardBinomial),
    /// Non-integer `n`.
    Generalized(GeneralizedBinomial),
}

impl Binomial {
    /// Validate `(n, p)` and dispatch on whether `n` is integral.
    ///
    /// A non-integer `n` is not an error: it yields [`Binomial::Generalized`].
    pub fn new(n: f64, p: f64) -> Result<Self> {
        if is_integral(n) {
            Ok(Binomial::Standard(StandardBinomial::new(n as u64, p)?))
        } else {
            Ok(Binomial::Generalized(GeneralizedBinomial::new(n, p)?))
        }
    }

    /// Dispatch without validation.
    pub fn new_unchecked(n: f64, p: f64) -> Self {
        if is_integral(n) {
            Binomial::Standard(StandardBinomial::new_unchecked(n as u64, p))
        } else {
            Binomial::Generalized(GeneralizedBinomial::new_unchecked(n, p))
        }
    }

    /// Whether the real-trial variant was selected.
    pub fn is_generalized(&self) -> bool {
        matches!(self, Binomial::Generalized(_))
    }

    /// Draw one count; the config only affects the real-trial variant.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R, config: &SamplerConfig) -> u64 {
        match self {
            Binomial::Standard(d) => d.sample(rng),
            Binomial::Generalized(d) => d.sample_with(rng, config),
        }
    }
}

/// Build a binomial for `n` trials with success probability `p`.
pub fn make_binomial(n: f64, p: f64) -> Result<Binomial> {
    Binomial::new(n, p)
}

/// [`make_binomial`] with validation under caller control.
pub fn make_binomial_with(n: f64, p: f64, check_args: bool) -> Result<Binomial> {
    if check_args { Binomial::new(n, p) } else { Ok(Binomial::new_unchecked(n, p)) }
}

impl CountDistribution for Binomial {
    fn num_trials(&self) -> f64 {
        match self {
            Binomial::Standard(d) => d.num_trials(),
            Binomial::Generalized(d) => d.num_trials(),
        }
    }

    fn succ_prob(&self) -> f64 {
        match self {
            Binomial::Standard(d) => d.succ_prob(),
            Binomial::Generalized(d) => d.succ_prob(),
        }
    }

    fn support_max(&self) -> u64 {
        match self {
            Binomial::Standard(d) => d.support_max(),
            Binomial::Generalized(d) => d.support_max(),
        }
    }

    fn log_pmf(&self, k: i64) -> f64 {
        match self {
            Binomial::Standard(d) => d.log_pmf(k),
            Binomial::Generalized(d) => d.log_pmf(k),
        }
    }

    fn cdf(&self, k: i64) -> f64 {
        match self {
            Binomial::Standard(d) => d.cdf(k),
            Binomial::Generalized(d) => d.cdf(k),
        }
    }
}

impl Distribution<u64> for Binomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match self {
            Binomial::Standard(d) => d.sample(rng),
            Binomial::Generalized(d) => d.sample(rng),
        }
    }
}

/// Log-PMF of `Binom(n, p)` at `k`, for real `n`.
pub fn binomial_logpmf(k: i64, n: f64, p: f64) -> Result<f64> {
    Ok(Binomial::new(n, p)?.log_pmf(k))
}

/// CDF of `Binom(n, p)` at `k`, for real `n`.
pub fn binomial_cdf(k: i64, n: f64, p: f64) -> Result<f64> {
    Ok(Binomial::new(n, p)?.cdf(k))
}

/// Negative log-likelihood of `Binom(n, p)` at `k`, for real `n`.
pub fn binomial_nll(k: i64, n: f64, p: f64) -> Result<f64> {
    Ok(-binomial_logpmf(k, n, p)?)
}
