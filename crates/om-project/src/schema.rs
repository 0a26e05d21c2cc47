//! Case file schema definitions.

use om_air::{AirConstants, AirModel};
use om_core::samples;
use om_meter::{LengthUnit, Mounting};
use om_solver::{
    FlowRateInput, FlowRateSolution, IterationConfig, OrificeFlowSolver, SolveOptions,
    SolverResult,
};
use serde::{Deserialize, Serialize};

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    pub version: u32,
    #[serde(default)]
    pub cases: Vec<CaseDef>,
}

impl CaseFile {
    pub fn case(&self, id: &str) -> Option<&CaseDef> {
        self.cases.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDef {
    pub id: String,
    pub name: String,
    pub geometry: GeometryDef,
    pub measurement: MeasurementDef,
    /// Relative humidity (0..1)
    #[serde(default)]
    pub humidity: f64,
    #[serde(default = "default_kappa")]
    pub kappa: f64,
    #[serde(default, skip_serializing_if = "SolverDef::is_empty")]
    pub solver: SolverDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air: Option<AirConstants>,
}

fn default_kappa() -> f64 {
    1.4
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryDef {
    pub d_orifice: f64,
    pub d_pipe: f64,
    #[serde(default)]
    pub unit: LengthUnit,
    #[serde(default)]
    pub mounting: Mounting,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasurementDef {
    pub dp_pa: Vec<f64>,
    pub p1_pa: Vec<f64>,
    /// Kelvin, or Celsius when the mean is below 100
    pub temperature: Vec<f64>,
}

/// Overrides for [`IterationConfig`]; unset fields keep the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_residual: Option<f64>,
}

impl SolverDef {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: IterationConfig) -> IterationConfig {
        IterationConfig {
            tolerance: self.tolerance.unwrap_or(base.tolerance),
            max_iterations: self.max_iterations.unwrap_or(base.max_iterations),
            initial_coefficient: self
                .initial_coefficient
                .unwrap_or(base.initial_coefficient),
            initial_residual: self.initial_residual.unwrap_or(base.initial_residual),
        }
    }
}

impl CaseDef {
    pub fn input(&self) -> FlowRateInput {
        let m = &self.measurement;
        FlowRateInput::new(
            samples(&m.dp_pa),
            self.geometry.d_orifice,
            self.geometry.d_pipe,
            self.geometry.unit,
            samples(&m.p1_pa),
            samples(&m.temperature),
        )
        .with_mounting(self.geometry.mounting)
        .with_humidity(self.humidity)
        .with_kappa(self.kappa)
    }

    pub fn solver(&self) -> OrificeFlowSolver {
        OrificeFlowSolver::new()
            .with_air(AirModel::new(self.air.unwrap_or_default()))
            .with_config(self.solver.apply(IterationConfig::default()))
    }

    pub fn solve(&self, options: SolveOptions) -> SolverResult<FlowRateSolution> {
        self.solver().solve(&self.input(), options)
    }
}

/// Case file with two cases, used as a starting template.
pub fn example_case_file() -> CaseFile {
    CaseFile {
        version: CURRENT_VERSION,
        cases: vec![
            CaseDef {
                id: "dry-200kpa".to_string(),
                name: "Dry air, 50 mm plate".to_string(),
                geometry: GeometryDef {
                    d_orifice: 50.0,
                    d_pipe: 100.0,
                    unit: LengthUnit::Millimeter,
                    mounting: Mounting::Flange,
                },
                measurement: MeasurementDef {
                    dp_pa: vec![5000.0],
                    p1_pa: vec![200_000.0],
                    temperature: vec![293.15],
                },
                humidity: 0.0,
                kappa: default_kappa(),
                solver: SolverDef::default(),
                air: None,
            },
            CaseDef {
                id: "humid-series".to_string(),
                name: "Humid air, 20 mm plate, three readings".to_string(),
                geometry: GeometryDef {
                    d_orifice: 20.0,
                    d_pipe: 100.0,
                    unit: LengthUnit::Millimeter,
                    mounting: Mounting::Flange,
                },
                measurement: MeasurementDef {
                    dp_pa: vec![400.0, 500.0, 600.0],
                    p1_pa: vec![101_325.0],
                    temperature: vec![20.0],
                },
                humidity: 0.5,
                kappa: default_kappa(),
                solver: SolverDef {
                    tolerance: Some(1e-6),
                    ..SolverDef::default()
                },
                air: None,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_fields() {
        let yaml = r#"
version: 1
cases:
  - id: a
    name: A
    geometry: { d_orifice: 50.0, d_pipe: 100.0 }
    measurement: { dp_pa: [5000.0], p1_pa: [200000.0], temperature: [293.15] }
"#;
        let file: CaseFile = serde_yaml::from_str(yaml).unwrap();
        let case = &file.cases[0];
        assert_eq!(case.geometry.unit, LengthUnit::Millimeter);
        assert_eq!(case.geometry.mounting, Mounting::Flange);
        assert_eq!(case.kappa, 1.4);
        assert_eq!(case.humidity, 0.0);
        assert!(case.solver.is_empty());
        assert!(case.air.is_none());
    }

    #[test]
    fn solver_overrides_apply() {
        let def = SolverDef {
            max_iterations: Some(5),
            ..SolverDef::default()
        };
        let config = def.apply(IterationConfig::default());
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.tolerance, IterationConfig::default().tolerance);
    }

    #[test]
    fn units_and_mounting_use_short_names() {
        let yaml = "{ d_orifice: 0.05, d_pipe: 0.1, unit: m, mounting: corner }";
        let geometry: GeometryDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(geometry.unit, LengthUnit::Meter);
        assert_eq!(geometry.mounting, Mounting::Corner);
    }

    #[test]
    fn partial_air_constants() {
        let yaml = "{ vapor_pressure: 3000.0 }";
        let air: AirConstants = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(air.vapor_pressure, 3000.0);
        assert_eq!(air.r_dry, AirConstants::default().r_dry);
    }

    #[test]
    fn example_cases_solve() {
        for case in &example_case_file().cases {
            let solution = case.solve(SolveOptions::default()).unwrap();
            assert!(solution.converged(), "{}", case.id);
            assert_eq!(solution.qv.len(), case.measurement.dp_pa.len());
        }
    }
}
