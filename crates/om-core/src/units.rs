// om-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DiffusionCoefficient as UomDiffusionCoefficient, Length as UomLength,
    MassDensity as UomMassDensity, MassRate as UomMassRate, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type KinVisc = UomDiffusionCoefficient;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m2ps(v: f64) -> KinVisc {
    use uom::si::diffusion_coefficient::square_meter_per_second;
    KinVisc::new::<square_meter_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

/// Length expressed in millimetres.
#[inline]
pub fn in_mm(l: Length) -> f64 {
    use uom::si::length::millimeter;
    l.get::<millimeter>()
}

/// Volume flow expressed in m³/h.
#[inline]
pub fn in_m3ph(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::cubic_meter_per_hour;
    q.get::<cubic_meter_per_hour>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _l = m(2.0);
        let _a = m2(0.01);
        let _nu = m2ps(1.5e-5);
        let _rho = kgpm3(1.2);
        let _qm = kgps(0.1);
    }

    #[test]
    fn millimetres_round_trip() {
        let l = mm(50.0);
        assert!((l.value - 0.05).abs() < 1e-15);
        assert!((in_mm(l) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn hourly_volume_flow() {
        assert!((in_m3ph(m3ps(0.1)) - 360.0).abs() < 1e-9);
    }

    #[test]
    fn flow_over_area_is_velocity() {
        let u: Velocity = m3ps(0.1) / m2(0.01);
        assert!((u.value - 10.0).abs() < 1e-12);
    }

    #[test]
    fn kinematic_viscosity_is_square_metres_per_second() {
        let nu = m2ps(1.5e-5);
        assert_eq!(nu.value, 1.5e-5);
        // u * d / nu is the dimensionless Reynolds number
        let ud: KinVisc = (m3ps(0.1) / m2(0.01)) * m(0.1);
        let re = (ud / nu).value;
        assert!((re - 1.0 / 1.5e-5).abs() < 1e-6);
    }
}
