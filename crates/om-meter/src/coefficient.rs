//! Flow (discharge) coefficient of an orifice plate.

use om_core::{Samples, mean};

/// Distance of flange tappings from the plate faces [m]
pub const FLANGE_TAP_SPACING_M: f64 = 0.0254;

/// Pipe bore below which the small-bore terms are added [m]
pub const SMALL_BORE_LIMIT_M: f64 = 0.7112;

/// Reynolds number below which large orifices get extra uncertainty
pub const LOW_REYNOLDS_LIMIT: f64 = 10_000.0;

/// Flow coefficient per sample with its absolute uncertainty.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowCoefficient {
    pub value: Samples,
    pub uncertainty: f64,
}

/// Correlation for the flow coefficient `C(β, D, Re)`.
///
/// Implementations must be deterministic and thread-safe.
pub trait CoefficientModel: Send + Sync {
    /// Model name for diagnostics.
    fn name(&self) -> &str;

    /// Coefficient for diameter ratio `beta`, pipe bore `d_pipe_m` [m] and
    /// pipe Reynolds numbers `reynolds`.
    fn coefficient(&self, beta: f64, d_pipe_m: f64, reynolds: &Samples) -> FlowCoefficient;
}

/// Reader-Harris/Gallagher equation with flange tappings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlangeTaps;

impl CoefficientModel for FlangeTaps {
    fn name(&self) -> &str {
        "reader-harris/gallagher (flange taps)"
    }

    fn coefficient(&self, beta: f64, d_pipe_m: f64, reynolds: &Samples) -> FlowCoefficient {
        FlowCoefficient {
            value: reynolds.map(|re| discharge_coefficient(beta, d_pipe_m, re)),
            uncertainty: coefficient_uncertainty(beta, d_pipe_m, mean(reynolds)),
        }
    }
}

/// Flow coefficient for a single Reynolds number.
pub fn discharge_coefficient(beta: f64, d_pipe_m: f64, re: f64) -> f64 {
    let l1 = FLANGE_TAP_SPACING_M / d_pipe_m;
    let l2 = FLANGE_TAP_SPACING_M / d_pipe_m;
    let m2 = 2.0 * l2 / (1.0 - beta);
    let a = (19_000.0 * beta / re).powf(0.8);
    let beta4 = beta.powi(4);

    let mut c = 0.5961 + 0.0261 * beta.powi(2) - 0.216 * beta.powi(8)
        + 0.000521 * (1e6 * beta / re).powf(0.7)
        + (0.0188 + 0.0063 * a) * beta.powf(3.5) * (1e6 / re).powf(0.3)
        + (0.043 + 0.080 * (-10.0 * l1).exp() - 0.123 * (-7.0 * l1).exp())
            * (1.0 - 0.11 * a)
            * (beta4 / (1.0 - beta4))
        - 0.031 * (m2 - 0.8 * m2.powf(1.1)) * beta.powf(1.3);

    if d_pipe_m < SMALL_BORE_LIMIT_M {
        c += 0.011 * (0.75 - beta) * (2.8 - d_pipe_m / 0.0254);
    }
    c
}

/// Absolute uncertainty of the flow coefficient, assuming `beta`, `D`, `Re`
/// and the relative roughness are free of error.
pub fn coefficient_uncertainty(beta: f64, d_pipe_m: f64, mean_reynolds: f64) -> f64 {
    let mut u = if (0.1..0.2).contains(&beta) {
        (0.7 - beta) / 100.0
    } else if (0.2..=0.6).contains(&beta) {
        0.5 / 100.0
    } else if beta > 0.6 && beta <= 0.77 {
        (1.667 * beta - 0.5) / 100.0
    } else {
        0.0
    };

    if u > 0.0 && beta > 0.5 && mean_reynolds < LOW_REYNOLDS_LIMIT {
        u += 0.5 / 100.0;
    }
    if d_pipe_m < SMALL_BORE_LIMIT_M {
        // pipe bore kept in metres against 25.4
        u += 0.9 * (0.75 - beta) * (2.8 - d_pipe_m / 25.4) / 100.0;
    }
    u
}
