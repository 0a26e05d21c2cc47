//! Scalar helpers shared by the air, meter and solver crates.
//!
//! Flow rates of a few litres per second and pressures of a few bar meet in
//! the same expressions, so comparisons take a combined absolute and relative
//! bound instead of a single epsilon.

use crate::{OmError, OmResult};

/// Scalar type of every quantity and sample.
pub type Real = f64;

/// Absolute and relative bounds for [`nearly_equal`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Relative bound only; values near zero must then match exactly.
    pub fn relative(rel: Real) -> Self {
        Self { abs: 0.0, rel }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True when `a` and `b` differ by at most `tol.abs`, or by at most `tol.rel`
/// of the larger magnitude. NaN never compares equal.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Passes finite values through and names the offending input otherwise.
pub fn ensure_finite(v: Real, what: &'static str) -> OmResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(OmError::NonFinite { what, value: v })
    }
}

/// Sign of `v`. Unlike `f64::signum`, zero maps to zero; NaN passes through.
#[inline]
pub fn sign(v: Real) -> Real {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        v
    }
}
