use approx::assert_relative_eq;
use citation_dynamics::components::{AngleUnit, Axis, ChannelMap, Telemetry, TimeWindow};
use citation_dynamics::systems::{FlightMode, ManoeuvreSimulator, ResponseKind};
use citation_dynamics::utils::DynamicsError;
use nalgebra::{Vector1, Vector2};
use pretty_assertions::assert_eq;

use crate::common::{
    assert_all_finite, assert_output_shape, assert_starts_at_trim, citation_table,
    recording_channels, row, synthetic_recording, SAMPLE_TIME,
};

fn simulator(start: f64, end: f64) -> ManoeuvreSimulator {
    ManoeuvreSimulator::new(
        &citation_table(),
        &synthetic_recording(200),
        TimeWindow::new(start, end).unwrap(),
        &ChannelMap::default(),
    )
    .unwrap()
}

#[test]
fn test_forced_response_is_offset_by_trim() {
    let simulator = simulator(0.5, 12.0);
    let run = simulator.simulate_forced_response().unwrap();
    let samples = simulator.time().len();

    assert_eq!(run.time, simulator.time().to_vec());
    for axis in [Axis::Symmetric, Axis::Asymmetric] {
        assert_output_shape(run.output(axis), samples);
        assert_all_finite(run.output(axis));
        assert_starts_at_trim(run.output(axis), &simulator.trim_state(axis));
        assert_eq!(run.trim(axis), &simulator.trim_state(axis));
    }

    // trim state is the measured state at the first sample
    let trim = run.trim(Axis::Symmetric);
    assert_eq!(trim[0], 0.0);
    assert_relative_eq!(trim[1], 0.05 + 0.002 * 0.25_f64.sin(), epsilon = 1e-12);
    assert_relative_eq!(trim[2], 0.02 + 0.0005, epsilon = 1e-12);
}

#[test]
fn test_inputs_are_zero_at_window_start() {
    let simulator = simulator(0.5, 12.0);

    let elevator = simulator.symmetric_inputs();
    let lateral = simulator.asymmetric_inputs();
    assert_eq!(elevator[0], Vector1::zeros());
    assert_eq!(lateral[0], Vector2::zeros());
    assert_eq!(elevator.len(), simulator.time().len());

    // the elevator doublet starts at t = 1 s, 5 samples into the window
    assert_relative_eq!(elevator[6][0], 0.01, epsilon = 1e-12);
    assert_relative_eq!(elevator[16][0], -0.01, epsilon = 1e-12);
}

#[test]
fn test_refined_integration_stays_on_telemetry_grid() {
    let coarse = simulator(0.0, 8.0).simulate_forced_response().unwrap();
    let fine = simulator(0.0, 8.0)
        .with_refinement(10)
        .unwrap()
        .simulate_forced_response()
        .unwrap();

    assert_eq!(coarse.time, fine.time);
    assert_eq!(fine.symmetric.ncols(), coarse.symmetric.ncols());
    let difference = (&coarse.symmetric - &fine.symmetric).amax();
    assert!(difference < 1e-3, "refinement changed the response by {difference}");
}

#[test]
fn test_measured_output_has_rates() {
    let simulator = simulator(0.0, 10.0);
    let measured = simulator.measured_output(Axis::Symmetric);
    assert_output_shape(measured, simulator.time().len());

    // pitch ramps at 0.001 rad/s
    for rate in row(measured, 6) {
        assert_relative_eq!(rate, 0.001, epsilon = 1e-9);
    }

    let lateral = simulator.measured_output(Axis::Asymmetric);
    let b_2v = 0.5 * citation_table().geometry.wing_span / simulator.condition().true_airspeed;
    assert_relative_eq!(lateral[(2, 0)], 0.002 * b_2v, epsilon = 1e-12);
    for rate in row(lateral, 5) {
        assert_relative_eq!(rate, 0.002, epsilon = 1e-9);
    }
}

#[test]
fn test_degree_channels_are_converted() {
    let mut channels = recording_channels(150, true);
    let time = channels.remove("time").unwrap();
    let telemetry = Telemetry::new(time, channels).unwrap();
    let map = ChannelMap {
        angle_unit: AngleUnit::Degrees,
        ..ChannelMap::default()
    };
    let window = TimeWindow::new(0.0, 10.0).unwrap();

    let in_degrees = ManoeuvreSimulator::new(&citation_table(), &telemetry, window, &map).unwrap();
    let in_radians = simulator(0.0, 10.0);

    assert_relative_eq!(
        in_degrees.condition().angle_of_attack,
        in_radians.condition().angle_of_attack,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        in_degrees.trim_state(Axis::Asymmetric)[1],
        in_radians.trim_state(Axis::Asymmetric)[1],
        epsilon = 1e-12
    );
}

#[test]
fn test_trim_mass_comes_from_mass_channel() {
    let simulator = simulator(5.0, 10.0);
    assert_relative_eq!(simulator.condition().mass, 6000.0 - 0.5, epsilon = 1e-9);
    assert_relative_eq!(
        simulator.condition().pressure_altitude,
        2002.5,
        epsilon = 1e-9
    );
}

#[test]
fn test_named_mode_responses() {
    let simulator = simulator(0.0, 15.0);
    let samples = simulator.time().len();

    for mode in [
        FlightMode::Phugoid,
        FlightMode::ShortPeriod,
        FlightMode::DutchRoll,
        FlightMode::AperiodicRoll,
        FlightMode::Spiral,
    ] {
        let response = simulator.mode_response(mode).unwrap();
        assert_eq!(response.axis, mode.axis());
        assert_output_shape(&response.output, samples);
        assert_all_finite(&response.output);

        let trim = simulator.trim_state(mode.axis());
        match response.kind {
            ResponseKind::Step => assert_starts_at_trim(&response.output, &trim),
            ResponseKind::Impulse => {
                for i in 0..4 {
                    let b = match mode.axis() {
                        Axis::Symmetric => simulator.symmetric_system().b()[(i, response.input)],
                        Axis::Asymmetric => {
                            simulator.asymmetric_system().b()[(i, response.input)]
                        }
                    };
                    assert_relative_eq!(response.output[(i, 0)], trim[i] + b, epsilon = 1e-12);
                }
            }
        }
    }
}

#[test]
fn test_dutch_roll_uses_rudder() {
    let response = simulator(0.0, 5.0)
        .mode_response(FlightMode::DutchRoll)
        .unwrap();
    assert_eq!(response.kind, ResponseKind::Impulse);
    assert_eq!(response.input, 1);
}

#[test]
fn test_short_window_is_rejected() {
    let result = ManoeuvreSimulator::new(
        &citation_table(),
        &synthetic_recording(200),
        TimeWindow::new(1.0, 1.0 + 2.5 * SAMPLE_TIME).unwrap(),
        &ChannelMap::default(),
    );
    assert!(matches!(
        result,
        Err(DynamicsError::InsufficientData { required: 4, .. })
    ));
}

#[test]
fn test_window_outside_recording_is_rejected() {
    let result = ManoeuvreSimulator::new(
        &citation_table(),
        &synthetic_recording(50),
        TimeWindow::new(100.0, 200.0).unwrap(),
        &ChannelMap::default(),
    );
    assert!(matches!(
        result,
        Err(DynamicsError::InsufficientData { samples: 0, .. })
    ));
}

#[test]
fn test_eigenmodes_identify_each_named_mode() {
    let simulator = simulator(0.0, 5.0);
    let symmetric = simulator.eigenmodes(Axis::Symmetric).unwrap();
    let asymmetric = simulator.eigenmodes(Axis::Asymmetric).unwrap();

    let phugoid = FlightMode::Phugoid.identify(&symmetric).unwrap();
    let short_period = FlightMode::ShortPeriod.identify(&symmetric).unwrap();
    assert!(phugoid.period.unwrap() > short_period.period.unwrap());

    let roll = FlightMode::AperiodicRoll.identify(&asymmetric).unwrap();
    let spiral = FlightMode::Spiral.identify(&asymmetric).unwrap();
    assert!(roll.real.abs() > spiral.real.abs());
    assert!(FlightMode::DutchRoll.identify(&asymmetric).is_some());
    assert!(FlightMode::Phugoid.identify(&asymmetric).is_some());
}

#[test]
fn test_fit_of_measured_trajectory() {
    let simulator = simulator(0.0, 10.0);
    let run = simulator.simulate_forced_response().unwrap();
    let metrics = simulator.fit_metrics(&run);

    // both start at the same state, so the RMS error stays bounded
    for error in metrics.symmetric.iter().chain(metrics.asymmetric.iter()) {
        assert!(error.is_finite());
        assert!(*error < 1.0);
    }
}
