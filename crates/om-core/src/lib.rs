//! om-core: stable foundation for orificemeter.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - samples (scalar-or-array inputs with broadcasting)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod samples;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{OmError, OmResult};
pub use numeric::*;
pub use samples::*;
pub use units::*;
