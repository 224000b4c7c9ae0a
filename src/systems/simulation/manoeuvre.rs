use std::fmt;

use nalgebra::{DMatrix, Vector1, Vector2, Vector4};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::components::{
    AerodynamicState, Axis, ChannelMap, FlightCondition, MeasuredChannels,
    StabilityDerivativeTable, Telemetry, TelemetrySlice, TimeWindow,
};
use crate::systems::simulation::modes::{eigenmodes, Eigenmode};
use crate::systems::simulation::response::{respond, simulate, ResponseKind};
use crate::systems::statespace::{AsymmetricSystem, StateSpaceBuilder, SymmetricSystem};
use crate::utils::{gradient, rms_error, DynamicsError, Result, OUTPUT_DIM, STATE_DIM};

/// Named dynamic modes of the aircraft and the open loop excitation that
/// brings each one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightMode {
    Phugoid,
    ShortPeriod,
    DutchRoll,
    AperiodicRoll,
    Spiral,
}

impl FlightMode {
    pub fn axis(&self) -> Axis {
        match self {
            FlightMode::Phugoid | FlightMode::ShortPeriod => Axis::Symmetric,
            FlightMode::DutchRoll | FlightMode::AperiodicRoll | FlightMode::Spiral => {
                Axis::Asymmetric
            }
        }
    }

    /// Response kind and input channel used to excite the mode.
    pub fn excitation(&self) -> (ResponseKind, usize) {
        match self {
            FlightMode::Phugoid => (ResponseKind::Impulse, 0),
            FlightMode::ShortPeriod => (ResponseKind::Step, 0),
            FlightMode::DutchRoll => (ResponseKind::Impulse, 1),
            FlightMode::Spiral => (ResponseKind::Impulse, 0),
            FlightMode::AperiodicRoll => (ResponseKind::Step, 0),
        }
    }

    /// Picks the eigenmode belonging to this flight mode from the eigenmodes
    /// of its own axis.
    pub fn identify<'m>(&self, modes: &'m [Eigenmode]) -> Option<&'m Eigenmode> {
        let by_frequency =
            |l: &&Eigenmode, r: &&Eigenmode| l.natural_frequency.total_cmp(&r.natural_frequency);
        let oscillatory = modes.iter().filter(|m| m.is_oscillatory() && m.imag > 0.0);
        let aperiodic = modes.iter().filter(|m| !m.is_oscillatory());

        match self {
            FlightMode::Phugoid | FlightMode::DutchRoll => oscillatory.min_by(by_frequency),
            FlightMode::ShortPeriod => oscillatory.max_by(by_frequency),
            FlightMode::AperiodicRoll => aperiodic.max_by(by_frequency),
            FlightMode::Spiral => aperiodic.min_by(by_frequency),
        }
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlightMode::Phugoid => "phugoid",
            FlightMode::ShortPeriod => "short period",
            FlightMode::DutchRoll => "dutch roll",
            FlightMode::AperiodicRoll => "aperiodic roll",
            FlightMode::Spiral => "spiral",
        };
        write!(f, "{name}")
    }
}

/// Forced response of both axes over one window, in absolute states.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub time: Vec<f64>,
    /// 8×N, [û, α, θ, qc/V] on top of their rates.
    pub symmetric: DMatrix<f64>,
    /// 8×N, [β, φ, pb/2V, rb/2V] on top of their rates.
    pub asymmetric: DMatrix<f64>,
    pub symmetric_trim: Vector4<f64>,
    pub asymmetric_trim: Vector4<f64>,
}

impl SimulationRun {
    pub fn output(&self, axis: Axis) -> &DMatrix<f64> {
        match axis {
            Axis::Symmetric => &self.symmetric,
            Axis::Asymmetric => &self.asymmetric,
        }
    }

    pub fn trim(&self, axis: Axis) -> &Vector4<f64> {
        match axis {
            Axis::Symmetric => &self.symmetric_trim,
            Axis::Asymmetric => &self.asymmetric_trim,
        }
    }
}

/// Impulse or step response of one axis, offset by that axis' trim state.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRun {
    pub axis: Axis,
    pub kind: ResponseKind,
    pub input: usize,
    pub time: Vec<f64>,
    pub output: DMatrix<f64>,
}

/// RMS difference between simulated and measured states, per state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    pub symmetric: [f64; STATE_DIM],
    pub asymmetric: [f64; STATE_DIM],
}

/// Linear model of one manoeuvre window: the trim point read from the first
/// sample, both state space systems built about it, and the measured states
/// to compare against.
#[derive(Debug, Clone)]
pub struct ManoeuvreSimulator {
    window: TimeWindow,
    channels: MeasuredChannels,
    aero: AerodynamicState,
    symmetric: SymmetricSystem,
    asymmetric: AsymmetricSystem,
    measured_symmetric: DMatrix<f64>,
    measured_asymmetric: DMatrix<f64>,
    refinement: usize,
}

impl ManoeuvreSimulator {
    /// Slices `telemetry` to `window` and builds the simulator from the slice.
    pub fn new(
        table: &StabilityDerivativeTable,
        telemetry: &Telemetry,
        window: TimeWindow,
        channel_map: &ChannelMap,
    ) -> Result<Self> {
        Self::from_slice(table, &telemetry.slice(window), channel_map)
    }

    /// # Errors
    /// `InsufficientData` for fewer samples than states, `MissingChannel` when
    /// the slice lacks a mapped channel, and any error of the aerodynamic
    /// state or the state space assembly.
    pub fn from_slice(
        table: &StabilityDerivativeTable,
        slice: &TelemetrySlice,
        channel_map: &ChannelMap,
    ) -> Result<Self> {
        if slice.len() < STATE_DIM {
            return Err(DynamicsError::InsufficientData {
                samples: slice.len(),
                required: STATE_DIM,
            });
        }

        let channels = MeasuredChannels::extract(slice, channel_map)?;
        let condition = FlightCondition::new(
            channels.pressure_altitude[0],
            channels.true_airspeed[0],
            channels.angle_of_attack[0],
            channels.pitch[0],
            channels.mass[0],
        );
        let aero = AerodynamicState::new(table, condition)?;

        let builder = StateSpaceBuilder::new(table, &aero);
        let symmetric = builder.build_symmetric()?;
        let asymmetric = builder.build_asymmetric()?;

        let measured_symmetric = measured_symmetric(&channels, &aero, table);
        let measured_asymmetric = measured_asymmetric(&channels, &aero, table);

        info!(
            start = slice.window().start,
            end = slice.window().end,
            samples = channels.len(),
            hp0 = condition.pressure_altitude,
            v0 = condition.true_airspeed,
            alpha0 = condition.angle_of_attack,
            theta0 = condition.pitch_angle,
            mass = condition.mass,
            "Built manoeuvre simulator"
        );

        Ok(Self {
            window: slice.window(),
            channels,
            aero,
            symmetric,
            asymmetric,
            measured_symmetric,
            measured_asymmetric,
            refinement: 1,
        })
    }

    /// Minimum number of RK4 sub-steps per telemetry interval.
    pub fn with_refinement(mut self, refinement: usize) -> Result<Self> {
        if refinement == 0 {
            return Err(DynamicsError::InvalidInput(
                "integration refinement must be at least 1".to_string(),
            ));
        }
        self.refinement = refinement;
        Ok(self)
    }

    pub fn refinement(&self) -> usize {
        self.refinement
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn condition(&self) -> &FlightCondition {
        &self.aero.condition
    }

    pub fn aerodynamic_state(&self) -> &AerodynamicState {
        &self.aero
    }

    pub fn symmetric_system(&self) -> &SymmetricSystem {
        &self.symmetric
    }

    pub fn asymmetric_system(&self) -> &AsymmetricSystem {
        &self.asymmetric
    }

    pub fn time(&self) -> &[f64] {
        &self.channels.time
    }

    /// Measured 8×N states and state rates of `axis`.
    pub fn measured_output(&self, axis: Axis) -> &DMatrix<f64> {
        match axis {
            Axis::Symmetric => &self.measured_symmetric,
            Axis::Asymmetric => &self.measured_asymmetric,
        }
    }

    /// Measured state of `axis` at the first sample of the window.
    pub fn trim_state(&self, axis: Axis) -> Vector4<f64> {
        let measured = self.measured_output(axis);
        Vector4::from_fn(|i, _| measured[(i, 0)])
    }

    /// Elevator deflection relative to its value at the trim point.
    pub fn symmetric_inputs(&self) -> Vec<Vector1<f64>> {
        let elevator = &self.channels.elevator;
        elevator.iter().map(|de| Vector1::new(de - elevator[0])).collect()
    }

    /// Aileron and rudder deflections relative to their values at the trim point.
    pub fn asymmetric_inputs(&self) -> Vec<Vector2<f64>> {
        let aileron = &self.channels.aileron;
        let rudder = &self.channels.rudder;
        aileron
            .iter()
            .zip(rudder)
            .map(|(da, dr)| Vector2::new(da - aileron[0], dr - rudder[0]))
            .collect()
    }

    /// Drives both systems from zero perturbation with the measured control
    /// deflections and adds the trim state back onto the simulated states.
    pub fn simulate_forced_response(&self) -> Result<SimulationRun> {
        let time = self.time();
        let symmetric_trim = self.trim_state(Axis::Symmetric);
        let asymmetric_trim = self.trim_state(Axis::Asymmetric);

        let mut symmetric = simulate(
            &self.symmetric,
            time,
            &self.symmetric_inputs(),
            Vector4::zeros(),
            self.refinement,
        )?;
        let mut asymmetric = simulate(
            &self.asymmetric,
            time,
            &self.asymmetric_inputs(),
            Vector4::zeros(),
            self.refinement,
        )?;
        add_trim(&mut symmetric, &symmetric_trim);
        add_trim(&mut asymmetric, &asymmetric_trim);

        debug!(
            start = self.window.start,
            end = self.window.end,
            "Simulated forced response"
        );

        Ok(SimulationRun {
            time: time.to_vec(),
            symmetric,
            asymmetric,
            symmetric_trim,
            asymmetric_trim,
        })
    }

    pub fn impulse_response(&self, axis: Axis, input: usize) -> Result<ResponseRun> {
        self.response(axis, ResponseKind::Impulse, input)
    }

    pub fn step_response(&self, axis: Axis, input: usize) -> Result<ResponseRun> {
        self.response(axis, ResponseKind::Step, input)
    }

    /// Open loop response to a unit excitation of `input` on the window's
    /// time grid, offset by the trim state of `axis`.
    pub fn response(&self, axis: Axis, kind: ResponseKind, input: usize) -> Result<ResponseRun> {
        let time = self.time();
        let mut output = match axis {
            Axis::Symmetric => respond(&self.symmetric, kind, time, input, self.refinement)?,
            Axis::Asymmetric => respond(&self.asymmetric, kind, time, input, self.refinement)?,
        };
        add_trim(&mut output, &self.trim_state(axis));

        Ok(ResponseRun {
            axis,
            kind,
            input,
            time: time.to_vec(),
            output,
        })
    }

    /// Characteristic response of a named flight mode.
    pub fn mode_response(&self, mode: FlightMode) -> Result<ResponseRun> {
        let (kind, input) = mode.excitation();
        self.response(mode.axis(), kind, input)
    }

    /// The four eigenmodes of the state matrix of `axis`.
    pub fn eigenmodes(&self, axis: Axis) -> Result<Vec<Eigenmode>> {
        match axis {
            Axis::Symmetric => eigenmodes(self.symmetric.a(), axis),
            Axis::Asymmetric => eigenmodes(self.asymmetric.a(), axis),
        }
    }

    /// RMS state error of `run` against the measured states of this window.
    pub fn fit_metrics(&self, run: &SimulationRun) -> FitMetrics {
        let per_state = |axis: Axis| -> [f64; STATE_DIM] {
            let simulated = run.output(axis);
            let measured = self.measured_output(axis);
            let mut errors = [0.0; STATE_DIM];
            for (i, error) in errors.iter_mut().enumerate() {
                let sim: Vec<f64> = simulated.row(i).iter().copied().collect();
                let meas: Vec<f64> = measured.row(i).iter().copied().collect();
                *error = rms_error(&sim, &meas);
            }
            errors
        };

        FitMetrics {
            symmetric: per_state(Axis::Symmetric),
            asymmetric: per_state(Axis::Asymmetric),
        }
    }
}

fn add_trim(output: &mut DMatrix<f64>, trim: &Vector4<f64>) {
    for mut column in output.column_iter_mut() {
        for i in 0..STATE_DIM {
            column[i] += trim[i];
        }
    }
}

/// Stacks four state histories on their finite-difference rates.
fn with_rates(time: &[f64], states: [Vec<f64>; STATE_DIM]) -> DMatrix<f64> {
    let mut output = DMatrix::zeros(OUTPUT_DIM, time.len());
    for (i, state) in states.iter().enumerate() {
        let rate = gradient(state, time);
        for k in 0..time.len() {
            output[(i, k)] = state[k];
            output[(i + STATE_DIM, k)] = rate[k];
        }
    }
    output
}

fn measured_symmetric(
    channels: &MeasuredChannels,
    aero: &AerodynamicState,
    table: &StabilityDerivativeTable,
) -> DMatrix<f64> {
    let v0 = aero.condition.true_airspeed;
    let c_v = aero.chord_time(table);
    let normalise = |values: &[f64], scale: f64| -> Vec<f64> {
        values.iter().map(|v| v * scale).collect()
    };

    let states = [
        channels.true_airspeed.iter().map(|v| (v - v0) / v0).collect(),
        channels.angle_of_attack.clone(),
        channels.pitch.clone(),
        normalise(&channels.pitch_rate, c_v),
    ];
    with_rates(&channels.time, states)
}

fn measured_asymmetric(
    channels: &MeasuredChannels,
    aero: &AerodynamicState,
    table: &StabilityDerivativeTable,
) -> DMatrix<f64> {
    let b_2v = 0.5 * aero.span_time(table);
    let normalise = |values: &[f64]| -> Vec<f64> { values.iter().map(|v| v * b_2v).collect() };

    let states = [
        channels.sideslip.clone(),
        channels.roll.clone(),
        normalise(&channels.roll_rate),
        normalise(&channels.yaw_rate),
    ];
    with_rates(&channels.time, states)
}
