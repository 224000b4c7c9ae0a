use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::components::aircraft::config::ConfigError;
use crate::utils::{deg_to_rad, DynamicsError, Result};

/// Closed time interval [start, end] of a manoeuvre, in telemetry time (s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(DynamicsError::InvalidInput(format!(
                "time window [{start}, {end}] is not a finite, ordered interval"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A full flight test recording: named channels sampled on one time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    time: Vec<f64>,
    channels: BTreeMap<String, Vec<f64>>,
}

impl Telemetry {
    /// Creates a recording, checking that every channel matches the time axis
    /// and that time strictly increases.
    pub fn new(time: Vec<f64>, channels: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        if time.iter().any(|t| !t.is_finite()) {
            return Err(DynamicsError::InvalidInput(
                "time axis contains non-finite samples".to_string(),
            ));
        }
        if let Some(k) = time.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(DynamicsError::InvalidInput(format!(
                "time axis is not strictly increasing at sample {}: {} s after {} s",
                k + 1,
                time[k + 1],
                time[k]
            )));
        }
        for (name, values) in &channels {
            if values.len() != time.len() {
                return Err(DynamicsError::InvalidInput(format!(
                    "channel {name} has {} samples, time axis has {}",
                    values.len(),
                    time.len()
                )));
            }
        }
        Ok(Self { time, channels })
    }

    /// Parses a JSON object of `channel -> [samples]`; `time_channel` names the
    /// shared time axis.
    pub fn from_json_str(contents: &str, time_channel: &str) -> Result<Self> {
        let mut channels: BTreeMap<String, Vec<f64>> =
            serde_json::from_str(contents).map_err(ConfigError::from)?;
        let time = channels
            .remove(time_channel)
            .ok_or_else(|| DynamicsError::MissingChannel(time_channel.to_string()))?;
        Self::new(time, channels)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P, time_channel: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents, time_channel)
    }

    /// Adds or replaces a channel, e.g. a mass history computed elsewhere.
    pub fn with_channel(mut self, name: &str, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.time.len() {
            return Err(DynamicsError::InvalidInput(format!(
                "channel {name} has {} samples, time axis has {}",
                values.len(),
                self.time.len()
            )));
        }
        self.channels.insert(name.to_string(), values);
        Ok(self)
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn channel(&self, name: &str) -> Result<&[f64]> {
        self.channels
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| DynamicsError::MissingChannel(name.to_string()))
    }

    /// Copies every sample with a timestamp inside `window`.
    pub fn slice(&self, window: TimeWindow) -> TelemetrySlice {
        let first = self.time.partition_point(|&t| t < window.start);
        let last = self.time.partition_point(|&t| t <= window.end);
        let range = first..last.max(first);

        let channels = self
            .channels
            .iter()
            .map(|(name, values)| (name.clone(), values[range.clone()].to_vec()))
            .collect();

        debug!(
            start = window.start,
            end = window.end,
            samples = range.len(),
            "Sliced telemetry"
        );

        TelemetrySlice {
            window,
            time: self.time[range].to_vec(),
            channels,
        }
    }
}

/// The part of a recording that falls inside one manoeuvre window.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySlice {
    window: TimeWindow,
    time: Vec<f64>,
    channels: BTreeMap<String, Vec<f64>>,
}

impl TelemetrySlice {
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn channel(&self, name: &str) -> Result<&[f64]> {
        self.channels
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| DynamicsError::MissingChannel(name.to_string()))
    }

    /// True when consecutive samples are spaced within `tolerance` of the mean step.
    pub fn is_uniformly_sampled(&self, tolerance: f64) -> bool {
        if self.time.len() < 3 {
            return true;
        }
        let mean = (self.time[self.time.len() - 1] - self.time[0]) / (self.time.len() - 1) as f64;
        self.time
            .windows(2)
            .all(|pair| ((pair[1] - pair[0]) - mean).abs() <= tolerance * mean.abs())
    }
}

/// Unit of the angle and angular rate channels in a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    pub fn to_radians(&self, value: f64) -> f64 {
        match self {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => deg_to_rad(value),
        }
    }
}

/// Names of the recording channels that carry each measured quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelMap {
    pub time: String,
    pub true_airspeed: String,
    pub angle_of_attack: String,
    pub pitch: String,
    pub pitch_rate: String,
    /// The heading channel stands in for sideslip on the reference recording.
    pub sideslip: String,
    pub roll: String,
    pub roll_rate: String,
    pub yaw_rate: String,
    pub elevator: String,
    pub aileron: String,
    pub rudder: String,
    pub pressure_altitude: String,
    pub mass: String,
    pub angle_unit: AngleUnit,
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self {
            time: "time".to_string(),
            true_airspeed: "Dadc1_tas".to_string(),
            angle_of_attack: "vane_AOA".to_string(),
            pitch: "Ahrs1_Pitch".to_string(),
            pitch_rate: "Ahrs1_bPitchRate".to_string(),
            sideslip: "Fms1_trueHeading".to_string(),
            roll: "Ahrs1_Roll".to_string(),
            roll_rate: "Ahrs1_bRollRate".to_string(),
            yaw_rate: "Ahrs1_bYawRate".to_string(),
            elevator: "delta_e".to_string(),
            aileron: "delta_a".to_string(),
            rudder: "delta_r".to_string(),
            pressure_altitude: "Dadc1_alt".to_string(),
            mass: "mass".to_string(),
            angle_unit: AngleUnit::Radians,
        }
    }
}

/// The channels of one window converted to SI units and radians.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredChannels {
    pub time: Vec<f64>,
    pub true_airspeed: Vec<f64>,
    pub angle_of_attack: Vec<f64>,
    pub pitch: Vec<f64>,
    pub pitch_rate: Vec<f64>,
    pub sideslip: Vec<f64>,
    pub roll: Vec<f64>,
    pub roll_rate: Vec<f64>,
    pub yaw_rate: Vec<f64>,
    pub elevator: Vec<f64>,
    pub aileron: Vec<f64>,
    pub rudder: Vec<f64>,
    pub pressure_altitude: Vec<f64>,
    pub mass: Vec<f64>,
}

impl MeasuredChannels {
    /// Reads every channel the simulator needs, failing on the first one missing.
    pub fn extract(slice: &TelemetrySlice, map: &ChannelMap) -> Result<Self> {
        let unit = map.angle_unit;
        let angle = |name: &str| -> Result<Vec<f64>> {
            Ok(slice
                .channel(name)?
                .iter()
                .map(|&v| unit.to_radians(v))
                .collect())
        };
        let raw = |name: &str| -> Result<Vec<f64>> { Ok(slice.channel(name)?.to_vec()) };

        let channels = Self {
            time: slice.time().to_vec(),
            true_airspeed: raw(&map.true_airspeed)?,
            angle_of_attack: angle(&map.angle_of_attack)?,
            pitch: angle(&map.pitch)?,
            pitch_rate: angle(&map.pitch_rate)?,
            sideslip: angle(&map.sideslip)?,
            roll: angle(&map.roll)?,
            roll_rate: angle(&map.roll_rate)?,
            yaw_rate: angle(&map.yaw_rate)?,
            elevator: angle(&map.elevator)?,
            aileron: angle(&map.aileron)?,
            rudder: angle(&map.rudder)?,
            pressure_altitude: raw(&map.pressure_altitude)?,
            mass: raw(&map.mass)?,
        };

        if !slice.is_uniformly_sampled(1e-3) {
            warn!(
                start = slice.window().start,
                end = slice.window().end,
                "Telemetry window is not uniformly sampled"
            );
        }

        Ok(channels)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
