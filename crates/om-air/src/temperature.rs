//! Celsius/Kelvin conversion.

use om_core::Samples;

pub fn celsius_to_kelvin(t: &Samples, t0_kelvin: f64) -> Samples {
    t.add_scalar(t0_kelvin)
}

pub fn kelvin_to_celsius(t: &Samples, t0_kelvin: f64) -> Samples {
    t.add_scalar(-t0_kelvin)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::constants::T0_KELVIN;
    use om_core::{Tolerances, nearly_equal, scalar};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn celsius_kelvin_round_trip(t in -1e5_f64..1e5_f64) {
            let back = kelvin_to_celsius(&celsius_to_kelvin(&scalar(t), T0_KELVIN), T0_KELVIN)[0];
            let tol = Tolerances { abs: 1e-9, rel: 1e-12 };
            prop_assert!(nearly_equal(back, t, tol));
        }
    }
}
