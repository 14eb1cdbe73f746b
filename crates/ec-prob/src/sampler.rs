//! Sampling engine for [`GeneralizedBinomial`].
//!
//! Each draw goes through one [`SampleStage`]:
//!
//! - `FastPath`: integral `n`, delegated to [`StandardBinomial`].
//! - `Degenerate`: `p == 0` or `p == 1`, answered without touching the RNG.
//! - `Rejection`: accept/reject against the integer-trial envelope
//!   `Binom(floor(n) + 1, p')`, escalating to a [`FallbackTier`] once the
//!   attempt budget in [`SamplerConfig::max_iters`] is spent.
//!
//! With `g` the envelope mass mapped back onto the target count `k`, the
//! ratio `f(k) / g(k)` falls strictly in `k` (consecutive ratios are
//! `(n - k) / (floor(n) + 1 - k) < 1`), so the bound `M = f(0) / g(0) =
//! (1 - p)^(n - floor(n) - 1)` holds on the whole support and acceptance uses
//! `u < f(k) / (M g(k))`.
//!
//! Trial counts of `2^64` and beyond have no integer envelope and go straight
//! to the fallback ladder.

use ec_core::{CountDistribution, SamplerConfig};
use rand::Rng;
use rand_distr::Distribution;

use crate::binomial::StandardBinomial;
use crate::fallback::FallbackTier;
use crate::generalized::GeneralizedBinomial;
use crate::math::is_integral;

/// Path taken by a single draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStage {
    /// Integral `n`: exact integer-trial binomial.
    FastPath,
    /// `p` is `0` or `1`: the answer is fixed.
    Degenerate,
    /// Accept/reject against the integer-trial envelope.
    Rejection,
}

impl SampleStage {
    /// Pick the stage for `d`.
    pub fn select(d: &GeneralizedBinomial) -> Self {
        let (n, p) = d.params();
        if is_integral(n) {
            SampleStage::FastPath
        } else if p == 0.0 || p == 1.0 {
            SampleStage::Degenerate
        } else {
            SampleStage::Rejection
        }
    }
}

/// Integer-trial proposal for the rejection stage.
#[derive(Debug, Clone, Copy)]
struct Envelope {
    dist: StandardBinomial,
    /// Proposals are drawn on the complement side and mirrored back.
    flip: bool,
    /// `ln M`, the bound on `f(k) / g(k)`.
    log_bound: f64,
}

impl Envelope {
    /// `None` when `floor(n) + 1` does not fit a `u64` trial count.
    fn new(target: &GeneralizedBinomial) -> Option<Self> {
        let (n, p) = target.params();
        let trials = target.support_max().checked_add(1)?;
        let flip = p > 0.5;
        let p_prop = if flip { 1.0 - p } else { p };
        Some(Self {
            dist: StandardBinomial::new_unchecked(trials, p_prop),
            flip,
            log_bound: (n - trials as f64) * (-p).ln_1p(),
        })
    }

    fn trials(&self) -> u64 {
        self.dist.trials()
    }
}

/// Draw from `d` following its [`SampleStage`].
pub(crate) fn sample_generalized<R: Rng + ?Sized>(
    d: &GeneralizedBinomial,
    rng: &mut R,
    config: &SamplerConfig,
) -> u64 {
    let (n, p) = d.params();
    match SampleStage::select(d) {
        SampleStage::FastPath => StandardBinomial::new_unchecked(n as u64, p).sample(rng),
        SampleStage::Degenerate => {
            if p == 0.0 { 0 } else { d.support_max() }
        }
        SampleStage::Rejection => {
            let Some(env) = Envelope::new(d) else {
                let tier = FallbackTier::select(d, config);
                log::debug!("generalized binomial: n={} exceeds u64 support; using {:?}", n, tier);
                return tier.sample(d, rng);
            };
            match rejection(d, &env, rng, config.max_iters) {
                Some(k) => k,
                None => {
                    let tier = FallbackTier::select(d, config);
                    log::debug!(
                        "generalized binomial: no acceptance in {} attempts for n={} p={}; using {:?}",
                        config.max_iters,
                        n,
                        p,
                        tier
                    );
                    tier.sample(d, rng)
                }
            }
        }
    }
}

/// Run up to `max_iters` accept/reject attempts; `None` if all were rejected.
fn rejection<R: Rng + ?Sized>(
    d: &GeneralizedBinomial,
    env: &Envelope,
    rng: &mut R,
    max_iters: usize,
) -> Option<u64> {
    let m = d.support_max();

    for _ in 0..max_iters {
        let k_prop = env.dist.sample(rng);
        let k = if env.flip { env.trials() - k_prop } else { k_prop };
        if k > m {
            continue;
        }
        let logf = d.log_pmf(k as i64);
        let logg = env.dist.log_pmf(k_prop as i64);
        let u: f64 = rng.random();
        if u.ln() < logf - logg - env.log_bound {
            return Some(k);
        }
    }
    None
}

/// Draw one count from `d` with the caller's RNG.
pub fn sample<R, D>(rng: &mut R, d: &D) -> u64
where
    R: Rng + ?Sized,
    D: Distribution<u64>,
{
    d.sample(rng)
}
