//! Binomial count distributions for epicount.
//!
//! This crate hosts the count-noise model used by continuous-state epidemic
//! simulations and their likelihoods:
//! - integer-trial binomial ([`StandardBinomial`])
//! - real-trial generalization ([`GeneralizedBinomial`]) with an exact
//!   rejection sampler and an approximate fallback ladder
//! - a dispatching constructor ([`make_binomial`]) over both
//!
//! Every sampler takes the RNG as an explicit argument; no state is shared
//! between calls, so one distribution value can be sampled from any number of
//! threads as long as each owns its RNG.
//!
//! ```
//! use ec_prob::{CountDistribution, make_binomial};
//! use rand::SeedableRng;
//! use rand_distr::Distribution;
//!
//! let d = make_binomial(5.7, 0.3).unwrap();
//! assert!(d.is_generalized());
//! assert_eq!(d.log_pmf(6), f64::NEG_INFINITY);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! assert!(d.sample(&mut rng) <= 5);
//! ```

pub mod binomial;
pub mod distributions;
pub mod fallback;
pub mod generalized;
pub mod math;
pub mod sampler;

pub use binomial::StandardBinomial;
pub use distributions::{
    Binomial, binomial_cdf, binomial_logpmf, binomial_nll, make_binomial, make_binomial_with,
};
pub use ec_core::{CountDistribution, Error, Result, SamplerConfig};
pub use fallback::FallbackTier;
pub use generalized::GeneralizedBinomial;
pub use sampler::{SampleStage, sample};
