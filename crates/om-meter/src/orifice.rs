//! Orifice flow equation and permanent pressure loss.

use std::f64::consts::PI;

use crate::error::MeterResult;
use crate::geometry::OrificeGeometry;
use om_core::{Samples, broadcast, broadcast_len, sign};

/// Volume flow rate [m³/s] through the orifice (ISO 5167-2 eq. 1).
///
/// `qv = C/√(1-β⁴) · ε · π/4 · d² · √(2·|Δp|/ρ) · sign(Δp)`
///
/// The absolute value of `dp` is used and its sign is carried into the flow
/// rate, so reverse flow comes out negative. For non-negative `dp` this is the
/// plain square-root form.
pub fn volume_flow_rate(
    geometry: &OrificeGeometry,
    c: &Samples,
    eps: &Samples,
    dp: &Samples,
    rho: &Samples,
) -> MeterResult<Samples> {
    let n = broadcast_len("flow rate inputs", &[c.len(), eps.len(), dp.len(), rho.len()])?;
    let c = broadcast("flow coefficient", c, n)?;
    let eps = broadcast("expansion number", eps, n)?;
    let dp = broadcast("differential pressure", dp, n)?;
    let rho = broadcast("density", rho, n)?;

    let beta = geometry.beta();
    let d = geometry.d_orifice().value;
    let scale = 1.0 / (1.0 - beta.powi(4)).sqrt() * PI / 4.0 * d * d;

    let head = dp.zip_map(&rho, |dp, rho| (2.0 * dp.abs() / rho).sqrt() * sign(dp));
    Ok(c.component_mul(&eps).component_mul(&head) * scale)
}

/// Permanent pressure loss [Pa] across the plate for converged coefficient
/// `c` and differential pressure `dp`.
///
/// `Δϖ = (√(1-β⁴(1-C²)) - Cβ²) / (√(1-β⁴(1-C²)) + Cβ²) · Δp`
pub fn pressure_loss(
    geometry: &OrificeGeometry,
    c: &Samples,
    dp: &Samples,
) -> MeterResult<Samples> {
    let n = broadcast_len("pressure loss inputs", &[c.len(), dp.len()])?;
    let c = broadcast("flow coefficient", c, n)?;
    let dp = broadcast("differential pressure", dp, n)?;

    let beta = geometry.beta();
    let beta2 = beta * beta;
    let beta4 = beta2 * beta2;
    Ok(c.zip_map(&dp, |c, dp| {
        let root = (1.0 - beta4 * (1.0 - c * c)).sqrt();
        (root - c * beta2) / (root + c * beta2) * dp
    }))
}
