//! Error types for orifice meter calculations.

use om_core::error::OmError;
use thiserror::Error;

/// Fatal errors; no partial result is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeterError {
    #[error("Pipe diameter {d_pipe} must be larger than orifice diameter {d_orifice}")]
    InvalidGeometry { d_orifice: f64, d_pipe: f64 },

    #[error("Mounting type '{mounting}' is not supported, only 'flange' is implemented")]
    UnsupportedMounting { mounting: String },

    #[error("Unknown length unit '{unit}', expected 'mm' or 'm'")]
    UnknownUnit { unit: String },

    #[error(transparent)]
    Core(#[from] OmError),
}

pub type MeterResult<T> = Result<T, MeterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MeterError::InvalidGeometry {
            d_orifice: 100.0,
            d_pipe: 50.0,
        };
        assert!(err.to_string().contains("50"));

        let err = MeterError::UnsupportedMounting {
            mounting: "corner".into(),
        };
        assert!(err.to_string().contains("corner"));
    }

    #[test]
    fn error_conversion() {
        let core = OmError::InvalidArg { what: "test" };
        let err: MeterError = core.into();
        assert!(matches!(err, MeterError::Core(OmError::InvalidArg { .. })));
    }
}
