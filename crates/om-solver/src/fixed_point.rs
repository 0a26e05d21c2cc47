//! Bounded fixed-point iteration.

use crate::error::{SolverError, SolverResult};

/// Fixed-point iteration configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationConfig {
    /// Iteration stops once the mean residual is at or below this value
    pub tolerance: f64,
    /// Hard cap on the number of steps
    pub max_iterations: usize,
    /// Starting guess for the flow coefficient
    pub initial_coefficient: f64,
    /// Residual assumed before the first step
    pub initial_residual: f64,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 1000,
            initial_coefficient: 0.62,
            initial_residual: 0.1,
        }
    }
}

impl IterationConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "tolerance must be non-negative",
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        if self.initial_residual.is_nan() || self.initial_residual <= self.tolerance {
            return Err(SolverError::InvalidConfig {
                what: "initial residual must exceed the tolerance",
            });
        }
        if !self.initial_coefficient.is_finite() || self.initial_coefficient <= 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "initial coefficient must be positive and finite",
            });
        }
        Ok(())
    }
}

/// How the iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    Converged,
    IterationCapped,
}

/// Fixed-point iteration result.
#[derive(Debug, Clone)]
pub struct FixedPointResult<S> {
    /// State after the last step
    pub state: S,
    /// Residual of the last step
    pub residual: f64,
    /// Number of steps taken
    pub iterations: usize,
    pub outcome: IterationOutcome,
}

impl<S> FixedPointResult<S> {
    pub fn converged(&self) -> bool {
        self.outcome == IterationOutcome::Converged
    }
}

/// Repeat `step` while the residual exceeds the tolerance.
///
/// `step` maps the previous state to the next one and its residual. A NaN
/// residual never satisfies the tolerance, so such an iteration runs into the
/// cap. Reaching the cap is not an error: the last state is returned with
/// [`IterationOutcome::IterationCapped`].
pub fn fixed_point<S, F>(
    seed: S,
    config: &IterationConfig,
    mut step: F,
) -> SolverResult<FixedPointResult<S>>
where
    F: FnMut(&S) -> SolverResult<(S, f64)>,
{
    config.validate()?;

    let mut state = seed;
    let mut residual = config.initial_residual;
    let mut iterations = 0;

    while residual.is_nan() || residual > config.tolerance {
        if iterations >= config.max_iterations {
            return Ok(FixedPointResult {
                state,
                residual,
                iterations,
                outcome: IterationOutcome::IterationCapped,
            });
        }
        let (next, next_residual) = step(&state)?;
        state = next;
        residual = next_residual;
        iterations += 1;
        tracing::debug!(iterations, residual, "fixed-point step");
    }

    Ok(FixedPointResult {
        state,
        residual,
        iterations,
        outcome: IterationOutcome::Converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_root_by_babylonian_steps() {
        // x = (x + 2/x)/2 converges to √2
        let config = IterationConfig {
            tolerance: 1e-12,
            ..IterationConfig::default()
        };
        let result = fixed_point(1.0_f64, &config, |x| {
            let next = 0.5 * (x + 2.0 / x);
            Ok((next, (next - x).abs()))
        })
        .unwrap();
        assert!(result.converged());
        assert!((result.state - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!(result.iterations < 10);
    }

    #[test]
    fn cap_returns_last_state() {
        let config = IterationConfig {
            max_iterations: 3,
            ..IterationConfig::default()
        };
        let result = fixed_point(0_u32, &config, |n| Ok((n + 1, 1.0))).unwrap();
        assert_eq!(result.outcome, IterationOutcome::IterationCapped);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.state, 3);
    }

    #[test]
    fn nan_residual_runs_to_cap() {
        let config = IterationConfig {
            max_iterations: 7,
            ..IterationConfig::default()
        };
        let result = fixed_point((), &config, |_| Ok(((), f64::NAN))).unwrap();
        assert!(!result.converged());
        assert_eq!(result.iterations, 7);
    }

    #[test]
    fn zero_tolerance_stops_on_exact_fixed_point() {
        let config = IterationConfig {
            tolerance: 0.0,
            ..IterationConfig::default()
        };
        let result = fixed_point(0.62_f64, &config, |c| Ok((*c, 0.0))).unwrap();
        assert!(result.converged());
        assert_eq!(result.iterations, 1);
        assert_eq!(result.residual, 0.0);
    }

    #[test]
    fn step_errors_propagate() {
        let result = fixed_point(0, &IterationConfig::default(), |_| {
            Err::<(i32, f64), _>(SolverError::InvalidConfig { what: "boom" })
        });
        assert!(result.is_err());
    }

    #[test]
    fn invalid_configs_rejected() {
        let bad = [
            IterationConfig {
                max_iterations: 0,
                ..IterationConfig::default()
            },
            IterationConfig {
                initial_residual: 1e-5,
                ..IterationConfig::default()
            },
            IterationConfig {
                tolerance: f64::NAN,
                ..IterationConfig::default()
            },
            IterationConfig {
                tolerance: -1e-4,
                ..IterationConfig::default()
            },
            IterationConfig {
                initial_residual: f64::NAN,
                ..IterationConfig::default()
            },
            IterationConfig {
                initial_coefficient: 0.0,
                ..IterationConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }
}
