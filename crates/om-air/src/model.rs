//! Humid air property model.

use crate::constants::{AirConstants, CELSIUS_THRESHOLD, SUTHERLAND_BETA, SUTHERLAND_S};
use crate::temperature;
use om_core::{
    Density, KinVisc, OmResult, Samples, Temperature, broadcast, broadcast_len, k, kgpm3, m2ps,
    mean,
};

/// Air properties evaluated at one set of measurement samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AirState {
    /// Temperature [K]
    pub temperature: Samples,
    /// Density [kg/m³]
    pub density: Samples,
    /// Dynamic viscosity [Pa·s]
    pub dynamic_viscosity: Samples,
    /// Kinematic viscosity [m²/s]
    pub kinematic_viscosity: Samples,
}

impl AirState {
    pub fn mean_temperature(&self) -> Temperature {
        k(mean(&self.temperature))
    }

    pub fn mean_density(&self) -> Density {
        kgpm3(mean(&self.density))
    }

    pub fn mean_kinematic_viscosity(&self) -> KinVisc {
        m2ps(mean(&self.kinematic_viscosity))
    }
}

/// Ideal-gas air model with a relative humidity correction.
///
/// The model is a plain value; it holds no mutable state and can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AirModel {
    constants: AirConstants,
}

impl AirModel {
    pub fn new(constants: AirConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &AirConstants {
        &self.constants
    }

    pub fn celsius_to_kelvin(&self, t: &Samples) -> Samples {
        temperature::celsius_to_kelvin(t, self.constants.t0_kelvin)
    }

    pub fn kelvin_to_celsius(&self, t: &Samples) -> Samples {
        temperature::kelvin_to_celsius(t, self.constants.t0_kelvin)
    }

    /// Read temperatures whose mean lies below 100 as Celsius and convert them.
    ///
    /// The decision is taken once for the whole vector, not per element.
    pub fn normalize_temperature(&self, t: &Samples) -> Samples {
        if mean(t) < CELSIUS_THRESHOLD {
            self.celsius_to_kelvin(t)
        } else {
            t.clone()
        }
    }

    /// Density [kg/m³] from absolute pressure [Pa], temperature [K] and
    /// relative humidity (0..1).
    ///
    /// `Rf = Rs / (1 - phi·pv/p·(1 - Rs/Rd))`, `rho = p / (Rf·T)`. Inputs are
    /// not validated: zero pressure or temperature yields non-finite values.
    pub fn density(&self, p: &Samples, t: &Samples, phi: f64) -> OmResult<Samples> {
        let n = broadcast_len("density inputs", &[p.len(), t.len()])?;
        let p = broadcast("pressure", p, n)?;
        let t = broadcast("temperature", t, n)?;

        let AirConstants {
            r_dry,
            r_vapor,
            vapor_pressure,
            ..
        } = self.constants;

        Ok(p.zip_map(&t, |p, t| {
            let r_f = r_dry / (1.0 - phi * vapor_pressure / p * (1.0 - r_dry / r_vapor));
            p / (r_f * t)
        }))
    }

    /// Dynamic viscosity [Pa·s] from temperature [K] (Sutherland).
    pub fn viscosity(&self, t: &Samples) -> Samples {
        t.map(|t| SUTHERLAND_BETA * t.powf(1.5) / (t + SUTHERLAND_S))
    }

    /// Full property set. `t` may be given in Celsius, see
    /// [`normalize_temperature`](Self::normalize_temperature).
    pub fn state(&self, p: &Samples, t: &Samples, phi: f64) -> OmResult<AirState> {
        let temperature = self.normalize_temperature(t);
        let density = self.density(p, &temperature, phi)?;
        let dynamic_viscosity = broadcast("viscosity", &self.viscosity(&temperature), density.len())?;
        let kinematic_viscosity = dynamic_viscosity.component_div(&density);
        Ok(AirState {
            temperature,
            density,
            dynamic_viscosity,
            kinematic_viscosity,
        })
    }
}

/// Reynolds number `u·d/nu` for velocity [m/s], length [m] and kinematic
/// viscosity [m²/s].
pub fn reynolds_number(u: &Samples, d: f64, nu: &Samples) -> OmResult<Samples> {
    let n = broadcast_len("reynolds inputs", &[u.len(), nu.len()])?;
    let u = broadcast("velocity", u, n)?;
    let nu = broadcast("kinematic viscosity", nu, n)?;
    Ok(u.zip_map(&nu, |u, nu| u * d / nu))
}
