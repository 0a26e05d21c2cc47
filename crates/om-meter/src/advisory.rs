//! Non-blocking diagnostics attached to computed values.

use std::fmt;

/// A condition outside the envelope validated by ISO 5167-2.
///
/// Advisories never change the numeric result; they are collected next to it.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// Orifice bore at or below 12.5 mm
    OrificeTooSmall { d_orifice_mm: f64 },
    /// Pipe bore outside [50, 1000] mm
    PipeOutOfRange { d_pipe_mm: f64 },
    /// Diameter ratio outside [0.10, 0.75]
    BetaOutOfRange { beta: f64 },
    /// Some differential pressures were negative; absolute values were used
    /// and the sign carried into the flow rate
    NegativeDifferentialPressure { count: usize },
    /// Iteration stopped at the cap before the residual met the tolerance
    NotConverged { iterations: usize, residual: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrificeTooSmall { d_orifice_mm } => write!(
                f,
                "Inner orifice diameter ({d_orifice_mm} mm) is smaller than 12.5 mm"
            ),
            Self::PipeOutOfRange { d_pipe_mm } => write!(
                f,
                "Pipe diameter ({d_pipe_mm} mm) is outside of the valid range [50, 1000] mm"
            ),
            Self::BetaOutOfRange { beta } => write!(
                f,
                "Diameter ratio beta ({beta}) is outside of the valid range [0.1, 0.75]"
            ),
            Self::NegativeDifferentialPressure { count } => write!(
                f,
                "{count} negative pressure difference(s), using absolute values"
            ),
            Self::NotConverged {
                iterations,
                residual,
            } => write!(
                f,
                "Flow coefficient did not converge after {iterations} iterations (residual {residual:.3e})"
            ),
        }
    }
}

impl Advisory {
    /// Log the advisory as a warning.
    pub fn emit(&self) {
        tracing::warn!(advisory = ?self, "{self}");
    }
}

/// A computed value together with the advisories raised while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Checked<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    pub fn with(value: T, advisories: Vec<Advisory>) -> Self {
        Self { value, advisories }
    }

    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<Advisory>) {
        (self.value, self.advisories)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Checked<U> {
        Checked {
            value: f(self.value),
            advisories: self.advisories,
        }
    }
}
