//! Orifice flow-rate solver.
//!
//! The flow coefficient `C` is a function of the pipe Reynolds number, which
//! in turn follows from the flow rate computed with `C`. Each fixed-point step
//!
//! 1. computes `qv` from the current coefficient guess,
//! 2. derives the pipe Reynolds number from the mean orifice velocity,
//! 3. evaluates the coefficient model and its uncertainty,
//! 4. computes `qv_min`/`qv_max` by shifting the guess by `∓ΔC` and the
//!    expansion number by `∓Δε`,
//! 5. replaces the guess and measures the mean absolute change.
//!
//! Iteration ends when that mean change is at or below the tolerance, or at
//! the iteration cap. The reported `qv` is the one computed from the guess of
//! the final step; the pressure loss uses the coefficient produced by it.
//! A zero mean flow leaves the guess unchanged, so the first step converges
//! with zero flow, bounds and loss.

use crate::error::SolverResult;
use crate::fixed_point::{IterationConfig, IterationOutcome, fixed_point};
use om_air::{AirModel, AirState, reynolds_number};
use om_core::{
    MassRate, OmError, Pressure, Samples, Velocity, VolumeRate, broadcast, broadcast_len, in_m3ph,
    in_mm, kgps, m2, m3ps, mean, nan_mean, pa, scalar,
};
use om_meter::{
    Advisory, CoefficientModel, ExpansionNumber, FlangeTaps, FlowCoefficient, LengthUnit,
    Mounting, OrificeGeometry, expansion_number, pressure_loss, volume_flow_rate,
};

/// Mean orifice velocity [m/s] below which the flow is taken as zero.
const ZERO_FLOW_VELOCITY: f64 = 1e-12;

/// Measurement and plate data for one flow-rate evaluation.
///
/// The sample vectors `dp`, `p1` and `temperature` must have equal lengths
/// or length one.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRateInput {
    /// Differential pressure `p2 - p1` [Pa]
    pub dp: Samples,
    /// Orifice bore, in `unit`
    pub d_orifice: f64,
    /// Pipe bore, in `unit`
    pub d_pipe: f64,
    pub unit: LengthUnit,
    pub mounting: Mounting,
    /// Upstream absolute pressure [Pa]
    pub p1: Samples,
    /// Temperature [K], or [°C] when the mean is below 100
    pub temperature: Samples,
    /// Relative humidity (0..1)
    pub phi: f64,
    /// Isentropic exponent
    pub kappa: f64,
}

impl FlowRateInput {
    /// Dry air, flange taps, `kappa = 1.4`.
    pub fn new(
        dp: Samples,
        d_orifice: f64,
        d_pipe: f64,
        unit: LengthUnit,
        p1: Samples,
        temperature: Samples,
    ) -> Self {
        Self {
            dp,
            d_orifice,
            d_pipe,
            unit,
            mounting: Mounting::Flange,
            p1,
            temperature,
            phi: 0.0,
            kappa: 1.4,
        }
    }

    pub fn with_humidity(mut self, phi: f64) -> Self {
        self.phi = phi;
        self
    }

    pub fn with_kappa(mut self, kappa: f64) -> Self {
        self.kappa = kappa;
        self
    }

    pub fn with_mounting(mut self, mounting: Mounting) -> Self {
        self.mounting = mounting;
        self
    }
}

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Log the input summary and the result at info level
    pub verbose: bool,
}

/// Result of a flow-rate evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRateSolution {
    /// Central volume flow rate [m³/s]
    pub qv: Samples,
    /// Lower flow-rate bound [m³/s]
    pub qv_min: Samples,
    /// Upper flow-rate bound [m³/s]
    pub qv_max: Samples,
    /// Permanent pressure loss [Pa]
    pub dp_loss: Samples,
    pub beta: f64,
    /// Orifice bore area [m²]
    pub orifice_area: f64,
    pub air: AirState,
    pub expansion: ExpansionNumber,
    /// Coefficient produced by the final step
    pub coefficient: FlowCoefficient,
    /// Pipe Reynolds number of the final step
    pub reynolds: Samples,
    pub iterations: usize,
    pub residual: f64,
    pub outcome: IterationOutcome,
    pub advisories: Vec<Advisory>,
}

impl FlowRateSolution {
    pub fn converged(&self) -> bool {
        self.outcome == IterationOutcome::Converged
    }

    /// Mass flow rate [kg/s].
    pub fn mass_flow(&self) -> Samples {
        self.qv.component_mul(&self.air.density)
    }

    /// Mean volume flow rate.
    pub fn mean_flow(&self) -> VolumeRate {
        m3ps(mean(&self.qv))
    }

    pub fn mean_mass_flow(&self) -> MassRate {
        kgps(mean(&self.mass_flow()))
    }

    pub fn mean_pressure_loss(&self) -> Pressure {
        pa(mean(&self.dp_loss))
    }

    /// Mean velocity in the orifice bore.
    pub fn orifice_velocity(&self) -> Velocity {
        self.mean_flow() / m2(self.orifice_area)
    }

    /// `(qv, qv_min, qv_max, dp_loss)`
    pub fn into_tuple(self) -> (Samples, Samples, Samples, Samples) {
        (self.qv, self.qv_min, self.qv_max, self.dp_loss)
    }
}

/// State carried between fixed-point steps.
#[derive(Debug, Clone)]
struct Step {
    coefficient: FlowCoefficient,
    qv: Samples,
    qv_min: Samples,
    qv_max: Samples,
    reynolds: Samples,
}

impl Step {
    fn seed(initial_coefficient: f64, len: usize) -> Self {
        let empty = Samples::zeros(0);
        Self {
            coefficient: FlowCoefficient {
                value: Samples::from_element(len, initial_coefficient),
                uncertainty: 0.0,
            },
            qv: empty.clone(),
            qv_min: empty.clone(),
            qv_max: empty.clone(),
            reynolds: empty,
        }
    }
}

/// Fixed-point orifice flow-rate solver.
///
/// Generic over the coefficient correlation; [`FlangeTaps`] by default.
#[derive(Debug, Clone, Default)]
pub struct OrificeFlowSolver<M: CoefficientModel = FlangeTaps> {
    air: AirModel,
    model: M,
    config: IterationConfig,
}

impl OrificeFlowSolver<FlangeTaps> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: CoefficientModel> OrificeFlowSolver<M> {
    pub fn with_model(air: AirModel, model: M, config: IterationConfig) -> Self {
        Self { air, model, config }
    }

    pub fn with_air(mut self, air: AirModel) -> Self {
        self.air = air;
        self
    }

    pub fn with_config(mut self, config: IterationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn air(&self) -> &AirModel {
        &self.air
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &IterationConfig {
        &self.config
    }

    /// Solve for the flow rate, its bounds and the pressure loss.
    ///
    /// Invalid geometry, unsupported mountings, incompatible sample shapes and
    /// invalid iteration settings are errors. Out-of-range geometry, negative
    /// differential pressures and hitting the iteration cap are reported as
    /// [`Advisory`] entries on the solution.
    pub fn solve(
        &self,
        input: &FlowRateInput,
        options: SolveOptions,
    ) -> SolverResult<FlowRateSolution> {
        self.config.validate()?;

        let (geometry, mut advisories) = OrificeGeometry::new(
            input.d_orifice,
            input.d_pipe,
            input.unit,
            input.mounting,
        )?
        .into_parts();

        let n = broadcast_len(
            "measurement samples",
            &[input.dp.len(), input.p1.len(), input.temperature.len()],
        )?;
        if n == 0 {
            return Err(OmError::InvalidArg {
                what: "measurement samples must not be empty",
            }
            .into());
        }
        let dp = broadcast("differential pressure", &input.dp, n)?;
        let p1 = broadcast("upstream pressure", &input.p1, n)?;
        let temperature = broadcast("temperature", &input.temperature, n)?;

        let air = self.air.state(&p1, &temperature, input.phi)?;
        let p2 = &p1 + &dp;
        let expansion = expansion_number(geometry.beta(), &p1, &p2, input.kappa)?;

        let negative = dp.iter().filter(|v| **v < 0.0).count();
        if negative > 0 {
            let advisory = Advisory::NegativeDifferentialPressure { count: negative };
            advisory.emit();
            advisories.push(advisory);
        }

        if options.verbose {
            log_inputs(&geometry, input, &dp, &p1, &air);
        }

        let area = geometry.orifice_area().value;
        let d_pipe = geometry.d_pipe().value;
        let beta = geometry.beta();
        let eps_max = &expansion.value + &expansion.uncertainty;
        let eps_min = &expansion.value - &expansion.uncertainty;

        let result = fixed_point(
            Step::seed(self.config.initial_coefficient, n),
            &self.config,
            |prev| {
                let guess = &prev.coefficient.value;
                let qv = volume_flow_rate(&geometry, guess, &expansion.value, &dp, &air.density)?;

                let velocity = nan_mean(&qv).abs() / area;
                // Zero mean flow => no Reynolds number; the guess stands
                if velocity < ZERO_FLOW_VELOCITY {
                    let coefficient = FlowCoefficient {
                        value: guess.clone(),
                        uncertainty: 0.0,
                    };
                    return Ok((
                        Step {
                            coefficient,
                            qv_min: qv.clone(),
                            qv_max: qv.clone(),
                            qv,
                            reynolds: Samples::zeros(n),
                        },
                        0.0,
                    ));
                }
                let reynolds =
                    reynolds_number(&scalar(velocity), d_pipe, &air.kinematic_viscosity)?;
                let coefficient = self.model.coefficient(beta, d_pipe, &reynolds);

                let c_err = coefficient.uncertainty;
                let qv_max = volume_flow_rate(
                    &geometry,
                    &guess.add_scalar(c_err),
                    &eps_max,
                    &dp,
                    &air.density,
                )?;
                let qv_min = volume_flow_rate(
                    &geometry,
                    &guess.add_scalar(-c_err),
                    &eps_min,
                    &dp,
                    &air.density,
                )?;

                let change = (&coefficient.value - guess).abs();
                let residual = mean(&change);
                tracing::debug!(
                    coefficient = mean(&coefficient.value),
                    reynolds = mean(&reynolds),
                    residual,
                    "coefficient update"
                );

                Ok((
                    Step {
                        coefficient,
                        qv,
                        qv_min,
                        qv_max,
                        reynolds,
                    },
                    residual,
                ))
            },
        )?;

        if result.outcome == IterationOutcome::IterationCapped {
            let advisory = Advisory::NotConverged {
                iterations: result.iterations,
                residual: result.residual,
            };
            advisory.emit();
            advisories.push(advisory);
        }

        let step = result.state;
        let dp_loss = pressure_loss(&geometry, &step.coefficient.value, &dp)?;

        tracing::info!(
            iterations = result.iterations,
            residual = result.residual,
            model = self.model.name(),
            converged = result.outcome == IterationOutcome::Converged,
            "flow-rate iteration finished"
        );

        let solution = FlowRateSolution {
            qv: step.qv,
            qv_min: step.qv_min,
            qv_max: step.qv_max,
            dp_loss,
            beta,
            orifice_area: area,
            air,
            expansion,
            coefficient: step.coefficient,
            reynolds: step.reynolds,
            iterations: result.iterations,
            residual: result.residual,
            outcome: result.outcome,
            advisories,
        };

        if options.verbose {
            log_solution(&solution);
        }

        Ok(solution)
    }
}

/// Solve with the default air model, coefficient correlation and iteration
/// settings.
pub fn compute_volume_flow_rate(input: &FlowRateInput) -> SolverResult<FlowRateSolution> {
    OrificeFlowSolver::new().solve(input, SolveOptions::default())
}

fn log_inputs(
    geometry: &OrificeGeometry,
    input: &FlowRateInput,
    dp: &Samples,
    p1: &Samples,
    air: &AirState,
) {
    tracing::info!(
        d_orifice_mm = in_mm(geometry.d_orifice()),
        d_pipe_mm = in_mm(geometry.d_pipe()),
        beta = geometry.beta(),
        "orifice geometry"
    );
    tracing::info!(
        dp_pa = mean(dp),
        p1_pa = mean(p1),
        temperature_k = air.mean_temperature().value,
        humidity_pct = input.phi * 100.0,
        density = air.mean_density().value,
        kinematic_viscosity = air.mean_kinematic_viscosity().value,
        "measurement means"
    );
}

fn log_solution(solution: &FlowRateSolution) {
    tracing::info!(
        qv_m3h = in_m3ph(solution.mean_flow()),
        qv_min_m3h = in_m3ph(m3ps(mean(&solution.qv_min))),
        qv_max_m3h = in_m3ph(m3ps(mean(&solution.qv_max))),
        qm_kgh = solution.mean_mass_flow().value * 3600.0,
        velocity = solution.orifice_velocity().value,
        reynolds = mean(&solution.reynolds),
        coefficient = mean(&solution.coefficient.value),
        coefficient_uncertainty = solution.coefficient.uncertainty,
        expansion = mean(&solution.expansion.value),
        dp_loss_pa = solution.mean_pressure_loss().value,
        iterations = solution.iterations,
        "flow rate"
    );
}
