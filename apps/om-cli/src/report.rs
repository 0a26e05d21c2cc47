//! Text and JSON rendering of solver results.

use om_core::{in_m3ph, mean};
use om_solver::FlowRateSolution;
use serde::Serialize;
use std::fmt;

/// Flat view of a [`FlowRateSolution`] for printing.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub qv_m3s: Vec<f64>,
    pub qv_min_m3s: Vec<f64>,
    pub qv_max_m3s: Vec<f64>,
    pub dp_loss_pa: Vec<f64>,
    pub qm_kgs: Vec<f64>,
    pub beta: f64,
    pub velocity_ms: f64,
    pub reynolds: Vec<f64>,
    pub coefficient: Vec<f64>,
    pub coefficient_uncertainty: f64,
    pub expansion: Vec<f64>,
    pub expansion_uncertainty: Vec<f64>,
    pub density_kgm3: Vec<f64>,
    pub kinematic_viscosity_m2s: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub advisories: Vec<String>,
}

impl SolutionReport {
    pub fn new(id: Option<&str>, s: &FlowRateSolution) -> Self {
        let v = |x: &om_core::Samples| x.iter().copied().collect::<Vec<_>>();
        Self {
            id: id.map(str::to_string),
            qv_m3s: v(&s.qv),
            qv_min_m3s: v(&s.qv_min),
            qv_max_m3s: v(&s.qv_max),
            dp_loss_pa: v(&s.dp_loss),
            qm_kgs: v(&s.mass_flow()),
            beta: s.beta,
            velocity_ms: s.orifice_velocity().value,
            reynolds: v(&s.reynolds),
            coefficient: v(&s.coefficient.value),
            coefficient_uncertainty: s.coefficient.uncertainty,
            expansion: v(&s.expansion.value),
            expansion_uncertainty: v(&s.expansion.uncertainty),
            density_kgm3: v(&s.air.density),
            kinematic_viscosity_m2s: v(&s.air.kinematic_viscosity),
            iterations: s.iterations,
            converged: s.converged(),
            advisories: s.advisories.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Human-readable summary; array results are shown as means.
pub struct TextReport<'a>(pub &'a FlowRateSolution);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let qv = s.mean_flow();
        let qm = s.mean_mass_flow().value;

        writeln!(f, "  beta:               {:.4}", s.beta)?;
        writeln!(f, "  density:            {:.4} kg/m³", s.air.mean_density().value)?;
        writeln!(
            f,
            "  kinematic visc.:    {:.4e} m²/s",
            s.air.mean_kinematic_viscosity().value
        )?;
        writeln!(f, "  velocity:           {:.3} m/s", s.orifice_velocity().value)?;
        writeln!(
            f,
            "  C:                  {:.5} ± {:.5} ({} iterations{})",
            mean(&s.coefficient.value),
            s.coefficient.uncertainty,
            s.iterations,
            if s.converged() { "" } else { ", not converged" }
        )?;
        writeln!(f, "  Re:                 {:.0}", mean(&s.reynolds))?;
        writeln!(f, "  eps:                {:.5}", mean(&s.expansion.value))?;
        writeln!(
            f,
            "  qv:                 {:.6} m³/s ({:.3} m³/h)",
            qv.value,
            in_m3ph(qv)
        )?;
        writeln!(
            f,
            "  qv range:           [{:.6}, {:.6}] m³/s",
            mean(&s.qv_min),
            mean(&s.qv_max)
        )?;
        writeln!(f, "  qm:                 {qm:.6} kg/s ({:.3} kg/h)", qm * 3600.0)?;
        write!(
            f,
            "  pressure loss:      {:.1} Pa",
            s.mean_pressure_loss().value
        )?;
        if s.qv.len() > 1 {
            write!(f, "\n  samples:            {} (means shown)", s.qv.len())?;
        }
        for advisory in &s.advisories {
            write!(f, "\n  ! {advisory}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use om_core::scalar;
    use om_meter::LengthUnit;
    use om_solver::{FlowRateInput, compute_volume_flow_rate};

    fn solution() -> FlowRateSolution {
        compute_volume_flow_rate(&FlowRateInput::new(
            scalar(5000.0),
            50.0,
            100.0,
            LengthUnit::Millimeter,
            scalar(200_000.0),
            scalar(293.15),
        ))
        .unwrap()
    }

    #[test]
    fn text_report_lists_flow_units() {
        let text = TextReport(&solution()).to_string();
        assert!(text.contains("m³/h"));
        assert!(text.contains("kg/h"));
        assert!(!text.contains("not converged"));
    }

    #[test]
    fn json_report_has_flat_fields() {
        let report = SolutionReport::new(Some("case-1"), &solution());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["id"], "case-1");
        assert_eq!(json["qv_m3s"].as_array().unwrap().len(), 1);
        assert_eq!(json["converged"], true);
    }
}
