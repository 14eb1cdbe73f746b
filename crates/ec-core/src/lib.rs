//! # ec-core
//!
//! Core types, traits, and error handling for epicount.
//!
//! This crate provides:
//! - Common error types
//! - The [`CountDistribution`] trait shared by every binomial variant
//! - Sampler configuration ([`SamplerConfig`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::CountDistribution;
pub use types::SamplerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
