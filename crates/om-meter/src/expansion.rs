//! Expansibility (expansion) factor for compressible flow.

use om_core::{OmError, OmResult, Samples, broadcast, broadcast_len};

/// Expansion number `eps` and its relative uncertainty, per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionNumber {
    pub value: Samples,
    pub uncertainty: Samples,
}

/// ISO 5167-2 expansion number for upstream pressure `p1`, downstream
/// pressure `p2` [Pa] and isentropic exponent `kappa`.
///
/// `eps = 1 - (0.351 + 0.256·β⁴ + 0.93·β⁸)·(1 - (p2/p1)^(1/κ))`
///
/// The relative uncertainty is `3.5·(p2 - p1)/(κ·p1)` percent. A negative
/// pressure ratio produces NaN, which is passed on unchanged.
pub fn expansion_number(
    beta: f64,
    p1: &Samples,
    p2: &Samples,
    kappa: f64,
) -> OmResult<ExpansionNumber> {
    if kappa.is_nan() || kappa <= 0.0 {
        return Err(OmError::InvalidArg {
            what: "isentropic exponent must be positive",
        });
    }
    let n = broadcast_len("expansion inputs", &[p1.len(), p2.len()])?;
    let p1 = broadcast("p1", p1, n)?;
    let p2 = broadcast("p2", p2, n)?;

    let shape = 0.351 + 0.256 * beta.powi(4) + 0.93 * beta.powi(8);
    let value = p1.zip_map(&p2, |p1, p2| 1.0 - shape * (1.0 - (p2 / p1).powf(1.0 / kappa)));
    let uncertainty = p1.zip_map(&p2, |p1, p2| 3.5 * (p2 - p1) / kappa / p1 / 100.0);

    Ok(ExpansionNumber { value, uncertainty })
}
