//! Parallel evaluation of independent flow-rate inputs.

use rayon::prelude::*;

use crate::error::SolverResult;
use crate::flow_rate::{FlowRateInput, FlowRateSolution, OrificeFlowSolver, SolveOptions};
use om_meter::CoefficientModel;

/// Solve every input on the rayon thread pool.
///
/// Results are returned in input order. A failing input does not stop the
/// others.
pub fn solve_many<M: CoefficientModel>(
    solver: &OrificeFlowSolver<M>,
    inputs: &[FlowRateInput],
    options: SolveOptions,
) -> Vec<SolverResult<FlowRateSolution>> {
    inputs
        .par_iter()
        .map(|input| solver.solve(input, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use om_core::scalar;
    use om_meter::LengthUnit;

    fn input(dp: f64, d_orifice: f64) -> FlowRateInput {
        FlowRateInput::new(
            scalar(dp),
            d_orifice,
            100.0,
            LengthUnit::Millimeter,
            scalar(200_000.0),
            scalar(293.15),
        )
    }

    #[test]
    fn keeps_input_order() {
        let inputs: Vec<_> = (1..=16).map(|i| input(500.0 * i as f64, 50.0)).collect();
        let solver = OrificeFlowSolver::new();
        let results = solve_many(&solver, &inputs, SolveOptions::default());
        assert_eq!(results.len(), inputs.len());

        for (input, result) in inputs.iter().zip(&results) {
            let serial = solver.solve(input, SolveOptions::default()).unwrap();
            assert_eq!(result.as_ref().unwrap().qv, serial.qv);
        }
    }

    #[test]
    fn failures_stay_local() {
        let inputs = vec![input(5000.0, 50.0), input(5000.0, 150.0), input(3000.0, 50.0)];
        let results = solve_many(&OrificeFlowSolver::new(), &inputs, SolveOptions::default());
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
