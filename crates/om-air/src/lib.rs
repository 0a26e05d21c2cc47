//! om-air: humid air properties for orifice metering.
//!
//! Provides:
//! - Physical constants of dry air and water vapour (`AirConstants`)
//! - Celsius/Kelvin conversion
//! - Density from the ideal gas relation with a humidity correction
//! - Dynamic viscosity from Sutherland's correlation
//! - Reynolds number
//!
//! All functions are element-wise over `Samples`; a one-element input
//! broadcasts against longer ones.
//!
//! # Example
//!
//! ```
//! use om_air::AirModel;
//! use om_core::scalar;
//!
//! let air = AirModel::default();
//! let state = air.state(&scalar(101_325.0), &scalar(20.0), 0.0).unwrap();
//! println!("Density: {} kg/m³", state.density[0]);
//! ```

pub mod constants;
pub mod model;
pub mod temperature;

pub use constants::AirConstants;
pub use model::{AirModel, AirState, reynolds_number};
