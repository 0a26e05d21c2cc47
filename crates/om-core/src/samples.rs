//! Scalar-or-array numeric inputs.
//!
//! Every measured quantity is carried as a column vector of samples. A scalar
//! is a one-element vector and broadcasts against longer inputs; all other
//! length combinations must agree exactly.

use nalgebra::DVector;

use crate::error::{OmError, OmResult};
use crate::numeric::Real;

/// Element-wise sample vector.
pub type Samples = DVector<Real>;

/// One-element sample vector.
#[inline]
pub fn scalar(v: Real) -> Samples {
    DVector::from_element(1, v)
}

/// Sample vector copied from a slice.
#[inline]
pub fn samples(values: &[Real]) -> Samples {
    DVector::from_column_slice(values)
}

/// Arithmetic mean. NaN for an empty vector.
pub fn mean(s: &Samples) -> Real {
    if s.is_empty() {
        return Real::NAN;
    }
    s.sum() / s.len() as Real
}

/// Arithmetic mean ignoring NaN entries. NaN when nothing is left.
pub fn nan_mean(s: &Samples) -> Real {
    let (sum, n) = s
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { Real::NAN } else { sum / n as Real }
}

/// Common length of a set of inputs under scalar broadcasting.
pub fn broadcast_len(what: &'static str, lens: &[usize]) -> OmResult<usize> {
    let target = lens.iter().copied().find(|&n| n != 1).unwrap_or(1);
    match lens.iter().copied().find(|&n| n != 1 && n != target) {
        Some(found) => Err(OmError::ShapeMismatch {
            what,
            expected: target,
            found,
        }),
        None => Ok(target),
    }
}

/// Stretch `s` to `len` entries. Only one-element vectors are stretched.
pub fn broadcast(what: &'static str, s: &Samples, len: usize) -> OmResult<Samples> {
    if s.len() == len {
        Ok(s.clone())
    } else if s.len() == 1 {
        Ok(DVector::from_element(len, s[0]))
    } else {
        Err(OmError::ShapeMismatch {
            what,
            expected: len,
            found: s.len(),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mean_of_broadcast_scalar_is_scalar(v in -1e6_f64..1e6_f64, n in 1usize..32) {
            let s = broadcast("v", &scalar(v), n).unwrap();
            prop_assert!(nearly_equal(mean(&s), v, Tolerances::default()));
        }
    }
}
