//! Error types for solver operations.

use om_core::error::OmError;
use om_meter::MeterError;
use thiserror::Error;

/// Errors that abort a flow-rate evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Meter error: {0}")]
    Meter(#[from] MeterError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] OmError),
}

pub type SolverResult<T> = Result<T, SolverError>;
