use om_air::{AirConstants, AirModel};
use om_core::{Tolerances, nearly_equal, samples, scalar};
use om_meter::{Advisory, LengthUnit};
use om_solver::{
    FlowRateInput, IterationConfig, OrificeFlowSolver, SolveOptions, SolverError,
    compute_volume_flow_rate,
};

fn tol() -> Tolerances {
    Tolerances {
        abs: 1e-9,
        rel: 1e-5,
    }
}

#[test]
fn humid_air_small_bore() {
    // 20 mm plate in a 100 mm pipe, 50 % relative humidity, Celsius input
    let input = FlowRateInput::new(
        scalar(500.0),
        20.0,
        100.0,
        LengthUnit::Millimeter,
        scalar(101_325.0),
        scalar(20.0),
    )
    .with_humidity(0.5);
    let s = compute_volume_flow_rate(&input).unwrap();

    assert!(s.converged());
    assert!(nearly_equal(s.beta, 0.2, tol()));
    assert!(nearly_equal(s.qv[0], 0.005_369_667, tol()), "qv={}", s.qv[0]);
    assert!(nearly_equal(s.qv_min[0], 0.005_197_736, tol()), "{}", s.qv_min[0]);
    assert!(nearly_equal(s.qv_max[0], 0.005_541_640, tol()), "{}", s.qv_max[0]);
    assert!(nearly_equal(s.dp_loss[0], 476.9077, tol()), "{}", s.dp_loss[0]);
    assert!(nearly_equal(s.air.density[0], 1.198_92, tol()), "{}", s.air.density[0]);
}

#[test]
fn meter_units_match_millimeters() {
    let mm = FlowRateInput::new(
        scalar(5000.0),
        50.0,
        100.0,
        LengthUnit::Millimeter,
        scalar(200_000.0),
        scalar(293.15),
    );
    let mut m = mm.clone();
    m.d_orifice = 0.05;
    m.d_pipe = 0.1;
    m.unit = LengthUnit::Meter;

    let a = compute_volume_flow_rate(&mm).unwrap();
    let b = compute_volume_flow_rate(&m).unwrap();
    assert!(nearly_equal(a.qv[0], b.qv[0], tol()));
    assert!(nearly_equal(a.dp_loss[0], b.dp_loss[0], tol()));
}

#[test]
fn out_of_range_geometry_still_solves() {
    // beta = 0.8 is outside the validated range
    let input = FlowRateInput::new(
        scalar(2000.0),
        80.0,
        100.0,
        LengthUnit::Millimeter,
        scalar(150_000.0),
        scalar(300.0),
    );
    let s = compute_volume_flow_rate(&input).unwrap();
    assert!(s.qv[0] > 0.0);
    assert!(matches!(
        s.advisories.first(),
        Some(Advisory::BetaOutOfRange { .. })
    ));
}

#[test]
fn series_of_measurements() {
    let input = FlowRateInput::new(
        samples(&[1000.0, -1000.0, 4000.0]),
        50.0,
        100.0,
        LengthUnit::Millimeter,
        samples(&[2.0e5, 2.0e5, 2.1e5]),
        samples(&[293.0, 294.0, 295.0]),
    );
    let s = compute_volume_flow_rate(&input).unwrap();
    assert_eq!(s.qv.len(), 3);
    assert!(s.qv[0] > 0.0 && s.qv[1] < 0.0 && s.qv[2] > s.qv[0]);
    assert!(s.dp_loss[1] < 0.0);
    assert!(
        s.advisories
            .contains(&Advisory::NegativeDifferentialPressure { count: 1 })
    );
}

#[test]
fn injected_constants_change_density() {
    let input = FlowRateInput::new(
        scalar(5000.0),
        50.0,
        100.0,
        LengthUnit::Millimeter,
        scalar(200_000.0),
        scalar(293.15),
    );
    let heavy = AirModel::new(AirConstants {
        r_dry: 250.0,
        ..AirConstants::default()
    });
    let base = compute_volume_flow_rate(&input).unwrap();
    let other = OrificeFlowSolver::new()
        .with_air(heavy)
        .solve(&input, SolveOptions::default())
        .unwrap();
    assert!(other.air.density[0] > base.air.density[0]);
    assert!(other.qv[0] < base.qv[0]);
}

#[test]
fn invalid_config_is_an_error() {
    let solver = OrificeFlowSolver::new().with_config(IterationConfig {
        max_iterations: 0,
        ..IterationConfig::default()
    });
    let input = FlowRateInput::new(
        scalar(5000.0),
        50.0,
        100.0,
        LengthUnit::Millimeter,
        scalar(200_000.0),
        scalar(293.15),
    );
    let err = solver.solve(&input, SolveOptions::default()).unwrap_err();
    assert!(matches!(err, SolverError::InvalidConfig { .. }));
}

#[test]
fn tuple_view() {
    let input = FlowRateInput::new(
        scalar(5000.0),
        50.0,
        100.0,
        LengthUnit::Millimeter,
        scalar(200_000.0),
        scalar(293.15),
    );
    let (qv, qv_min, qv_max, dp_loss) = compute_volume_flow_rate(&input).unwrap().into_tuple();
    assert!(qv_min[0] < qv[0] && qv[0] < qv_max[0]);
    assert!(dp_loss[0] > 0.0 && dp_loss[0] < 5000.0);
}
