//! Small numerically-stable math utilities used across the binomial code.

use statrs::function::gamma::ln_gamma;

/// `2^64`: trial counts at or above this have no `u64` support bound.
pub const SUPPORT_LIMIT: f64 = u64::MAX as f64;

/// Whether `x` is a finite whole number that fits a `u64` trial count.
#[inline]
pub fn is_integral(x: f64) -> bool {
    x.is_finite() && x >= 0.0 && x.trunc() == x && x < SUPPORT_LIMIT
}

/// `ln C(n, k)` for real `n >= k >= 0`, via `ln Γ`.
///
/// The two boundary coefficients are exactly `1`, so `k == 0` and `k == n`
/// return `0.0` without going through the Lanczos approximation.
#[inline]
pub fn ln_choose(n: f64, k: f64) -> f64 {
    if k == 0.0 || k == n {
        return 0.0;
    }
    ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0)
}

/// `x * ln(y)` with the convention `0 * ln(0) = 0`.
#[inline]
pub fn xlogy(x: f64, y: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x * y.ln() }
}

/// `x * ln(1 + y)` with the convention `0 * ln(0) = 0`.
#[inline]
pub fn xlog1py(x: f64, y: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x * y.ln_1p() }
}
