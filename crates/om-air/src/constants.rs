//! Physical constants for humid air.

/// Specific gas constant of dry air [J/(kg·K)]
pub const R_DRY_AIR: f64 = 287.058;

/// Specific gas constant of water vapour [J/(kg·K)]
pub const R_WATER_VAPOR: f64 = 461.523;

/// 0 °C in Kelvin
pub const T0_KELVIN: f64 = 273.15;

/// Assumed partial pressure of water vapour [Pa]
pub const DEFAULT_VAPOR_PRESSURE: f64 = 2300.0;

/// Reference viscosity coefficient of Sutherland's law for air [Pa·s/K^0.5]
pub const SUTHERLAND_BETA: f64 = 1.458e-6;

/// Sutherland's constant for air [K]
pub const SUTHERLAND_S: f64 = 110.4;

/// Temperatures with a mean below this value are read as Celsius.
pub const CELSIUS_THRESHOLD: f64 = 100.0;

/// Immutable constants handed to an [`AirModel`](crate::AirModel).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AirConstants {
    /// Specific gas constant of dry air [J/(kg·K)]
    pub r_dry: f64,
    /// Specific gas constant of water vapour [J/(kg·K)]
    pub r_vapor: f64,
    /// Kelvin value of 0 °C
    pub t0_kelvin: f64,
    /// Partial pressure of water vapour used with the relative humidity [Pa]
    pub vapor_pressure: f64,
}

impl Default for AirConstants {
    fn default() -> Self {
        Self {
            r_dry: R_DRY_AIR,
            r_vapor: R_WATER_VAPOR,
            t0_kelvin: T0_KELVIN,
            vapor_pressure: DEFAULT_VAPOR_PRESSURE,
        }
    }
}
