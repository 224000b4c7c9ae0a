use serde::{Deserialize, Serialize};

/// Operating point the linear model is built about, read from the first
/// sample of a telemetry window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightCondition {
    /// Pressure altitude hp0 (m).
    pub pressure_altitude: f64,
    /// True airspeed V0 (m/s).
    pub true_airspeed: f64,
    /// Angle of attack α0 (rad).
    pub angle_of_attack: f64,
    /// Pitch angle θ0 (rad).
    pub pitch_angle: f64,
    /// Aircraft mass (kg).
    pub mass: f64,
}

impl FlightCondition {
    pub fn new(
        pressure_altitude: f64,
        true_airspeed: f64,
        angle_of_attack: f64,
        pitch_angle: f64,
        mass: f64,
    ) -> Self {
        Self {
            pressure_altitude,
            true_airspeed,
            angle_of_attack,
            pitch_angle,
            mass,
        }
    }
}
