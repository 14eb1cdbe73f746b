//! Common data types for epicount

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tuning for the real-trial binomial sampler.
///
/// Controls the rejection budget and the thresholds that pick an approximate
/// fallback tier once that budget is spent. Missing JSON fields take their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Rejection attempts before escalating to a fallback tier.
    pub max_iters: usize,

    /// Largest `floor(n)` sampled by direct CDF inversion in the fallback.
    pub small_support_max: u64,

    /// Poisson fallback requires `p` strictly below this value.
    pub poisson_max_p: f64,

    /// Poisson fallback requires `n * p` strictly below this value.
    pub poisson_max_lambda: f64,
}

impl SamplerConfig {
    /// Rejection attempts used by [`SamplerConfig::default`].
    pub const DEFAULT_MAX_ITERS: usize = 128;

    /// Create a config with a custom rejection budget and default thresholds.
    pub fn with_max_iters(max_iters: usize) -> Self {
        Self { max_iters, ..Self::default() }
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.poisson_max_p.is_finite() || !(0.0..=1.0).contains(&self.poisson_max_p) {
            return Err(Error::Validation(format!(
                "poisson_max_p must be finite and in [0,1], got {}",
                self.poisson_max_p
            )));
        }
        if self.poisson_max_lambda.is_nan() || self.poisson_max_lambda < 0.0 {
            return Err(Error::Validation(format!(
                "poisson_max_lambda must be >= 0, got {}",
                self.poisson_max_lambda
            )));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_iters: Self::DEFAULT_MAX_ITERS,
            small_support_max: 1000,
            poisson_max_p: 0.10,
            poisson_max_lambda: 30.0,
        }
    }
}
