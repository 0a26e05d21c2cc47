//! Iterative ISO 5167 orifice flow-rate solver.
//!
//! The volume flow rate depends on the flow coefficient `C`, which depends on
//! the Reynolds number, which depends on the flow rate. This crate closes that
//! loop with a bounded fixed-point iteration and derives the flow-rate
//! envelope from the coefficient and expansion number uncertainties.
//!
//! # Example
//!
//! ```
//! use om_core::scalar;
//! use om_meter::LengthUnit;
//! use om_solver::{FlowRateInput, OrificeFlowSolver, SolveOptions};
//!
//! let input = FlowRateInput::new(
//!     scalar(5000.0),
//!     50.0,
//!     100.0,
//!     LengthUnit::Millimeter,
//!     scalar(200_000.0),
//!     scalar(293.15),
//! );
//! let solution = OrificeFlowSolver::new()
//!     .solve(&input, SolveOptions::default())
//!     .unwrap();
//! assert!(solution.converged());
//! println!("qv = {:.4} m³/s", solution.qv[0]);
//! ```

pub mod batch;
pub mod error;
pub mod fixed_point;
pub mod flow_rate;

pub use batch::solve_many;
pub use error::{SolverError, SolverResult};
pub use fixed_point::{FixedPointResult, IterationConfig, IterationOutcome, fixed_point};
pub use flow_rate::{
    FlowRateInput, FlowRateSolution, OrificeFlowSolver, SolveOptions, compute_volume_flow_rate,
};
