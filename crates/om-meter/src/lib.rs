//! om-meter: ISO 5167-2 orifice plate correlations.
//!
//! Provides the building blocks of an orifice flow measurement:
//! - Geometry validation and the diameter ratio `beta`
//! - Advisories for conditions outside the validated envelope
//! - Expansion number `eps` and its uncertainty
//! - Flow coefficient `C` and its uncertainty (flange taps)
//! - Volume flow rate and pressure loss formulas
//!
//! Fatal configuration problems are returned as [`MeterError`]; conditions the
//! standard merely does not cover are returned as [`Advisory`] values next to
//! the computed result.
//!
//! # Example
//!
//! ```
//! use om_meter::{FlangeTaps, CoefficientModel, LengthUnit, Mounting, OrificeGeometry};
//! use om_core::scalar;
//!
//! let geometry = OrificeGeometry::new(50.0, 100.0, LengthUnit::Millimeter, Mounting::Flange)
//!     .unwrap()
//!     .into_value();
//! let c = FlangeTaps.coefficient(geometry.beta(), geometry.d_pipe().value, &scalar(5e5));
//! println!("C = {:.4} ± {:.4}", c.value[0], c.uncertainty);
//! ```

pub mod advisory;
pub mod coefficient;
pub mod error;
pub mod expansion;
pub mod geometry;
pub mod orifice;

// Re-exports
pub use advisory::{Advisory, Checked};
pub use coefficient::{CoefficientModel, FlangeTaps, FlowCoefficient};
pub use error::{MeterError, MeterResult};
pub use expansion::{ExpansionNumber, expansion_number};
pub use geometry::{LengthUnit, Mounting, OrificeGeometry, compute_beta};
pub use orifice::{pressure_loss, volume_flow_rate};
