//! Orifice geometry and diameter ratio validation.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::advisory::{Advisory, Checked};
use crate::error::{MeterError, MeterResult};
use om_core::ensure_finite;
use om_core::units::{Area, Length, m, m2, mm};

/// Smallest orifice bore covered by the standard [mm]
pub const MIN_ORIFICE_MM: f64 = 12.5;
/// Pipe bore range covered by the standard [mm]
pub const PIPE_RANGE_MM: (f64, f64) = (50.0, 1000.0);
/// Diameter ratio range covered by the standard
pub const BETA_RANGE: (f64, f64) = (0.10, 0.75);

/// Unit in which diameters are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthUnit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "mm"))]
    Millimeter,
    #[cfg_attr(feature = "serde", serde(rename = "m"))]
    Meter,
}

impl LengthUnit {
    pub fn to_millimeters(self, v: f64) -> f64 {
        match self {
            Self::Millimeter => v,
            Self::Meter => v * 1000.0,
        }
    }

    pub fn length(self, v: f64) -> Length {
        match self {
            Self::Millimeter => mm(v),
            Self::Meter => m(v),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeter => write!(f, "mm"),
            Self::Meter => write!(f, "m"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = MeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mm" => Ok(Self::Millimeter),
            "m" => Ok(Self::Meter),
            other => Err(MeterError::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }
}

/// Pressure tapping arrangement of the orifice plate.
///
/// Only flange tappings are implemented; the other arrangements are named so
/// that configurations using them fail explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mounting {
    #[default]
    Flange,
    Corner,
    /// D and D/2 tappings
    Radius,
}

impl fmt::Display for Mounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flange => write!(f, "flange"),
            Self::Corner => write!(f, "corner"),
            Self::Radius => write!(f, "radius"),
        }
    }
}

impl FromStr for Mounting {
    type Err = MeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flange" => Ok(Self::Flange),
            "corner" => Ok(Self::Corner),
            "radius" | "d-d/2" => Ok(Self::Radius),
            other => Err(MeterError::UnsupportedMounting {
                mounting: other.to_string(),
            }),
        }
    }
}

/// Diameter ratio `beta = d/D` with the ISO 5167-2 applicability checks.
///
/// Checks run in a fixed order and stop at the first hit:
/// 0. non-finite diameters are fatal
/// 1. `d_pipe <= d_orifice` is fatal
/// 2. non-flange mounting is fatal
/// 3. orifice bore at or below 12.5 mm
/// 4. pipe bore outside [50, 1000] mm
/// 5. `beta` outside [0.10, 0.75]
///
/// Steps 3-5 only attach an [`Advisory`]; `beta` is always returned.
pub fn compute_beta(
    d_orifice: f64,
    d_pipe: f64,
    unit: LengthUnit,
    mounting: Mounting,
) -> MeterResult<Checked<f64>> {
    ensure_finite(d_orifice, "orifice diameter")?;
    ensure_finite(d_pipe, "pipe diameter")?;
    if d_pipe <= d_orifice {
        return Err(MeterError::InvalidGeometry { d_orifice, d_pipe });
    }
    let beta = d_orifice / d_pipe;

    let d_orifice_mm = unit.to_millimeters(d_orifice);
    let d_pipe_mm = unit.to_millimeters(d_pipe);

    if mounting != Mounting::Flange {
        return Err(MeterError::UnsupportedMounting {
            mounting: mounting.to_string(),
        });
    }

    let advisory = if d_orifice_mm <= MIN_ORIFICE_MM {
        Some(Advisory::OrificeTooSmall { d_orifice_mm })
    } else if d_pipe_mm < PIPE_RANGE_MM.0 || d_pipe_mm > PIPE_RANGE_MM.1 {
        Some(Advisory::PipeOutOfRange { d_pipe_mm })
    } else if !(BETA_RANGE.0..=BETA_RANGE.1).contains(&beta) {
        Some(Advisory::BetaOutOfRange { beta })
    } else {
        None
    };

    match advisory {
        Some(advisory) => {
            advisory.emit();
            Ok(Checked::with(beta, vec![advisory]))
        }
        None => Ok(Checked::clean(beta)),
    }
}

/// Validated orifice plate geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrificeGeometry {
    d_orifice: Length,
    d_pipe: Length,
    beta: f64,
    mounting: Mounting,
}

impl OrificeGeometry {
    /// Validate the diameters and build the geometry. See [`compute_beta`].
    pub fn new(
        d_orifice: f64,
        d_pipe: f64,
        unit: LengthUnit,
        mounting: Mounting,
    ) -> MeterResult<Checked<Self>> {
        let checked = compute_beta(d_orifice, d_pipe, unit, mounting)?;
        Ok(checked.map(|beta| Self {
            d_orifice: unit.length(d_orifice),
            d_pipe: unit.length(d_pipe),
            beta,
            mounting,
        }))
    }

    pub fn d_orifice(&self) -> Length {
        self.d_orifice
    }

    pub fn d_pipe(&self) -> Length {
        self.d_pipe
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn mounting(&self) -> Mounting {
        self.mounting
    }

    /// Open area of the orifice bore.
    pub fn orifice_area(&self) -> Area {
        let d = self.d_orifice.value;
        m2(d * d / 4.0 * PI)
    }
}
