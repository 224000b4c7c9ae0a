use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::Telemetry;
use crate::utils::{DynamicsError, Result};

/// Ramp mass build-up and fuel burn, producing the mass history the
/// manoeuvre simulator reads its trim mass from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassBudget {
    /// Basic empty mass (kg).
    pub empty_mass: f64,
    /// Mass of each occupant and item of payload (kg).
    #[serde(default)]
    pub payload: Vec<f64>,
    /// Fuel on board at the first telemetry sample (kg).
    pub fuel_mass: f64,
    /// Channels carrying a fuel mass flow, one per engine.
    #[serde(default)]
    pub fuel_flow_channels: Vec<String>,
    /// Factor converting the fuel flow channel unit to kg/s.
    #[serde(default = "default_flow_scale")]
    pub fuel_flow_scale: f64,
}

fn default_flow_scale() -> f64 {
    1.0
}

impl MassBudget {
    pub fn initial_mass(&self) -> f64 {
        self.empty_mass + self.payload.iter().sum::<f64>() + self.fuel_mass
    }

    /// Mass at every telemetry sample, integrating the summed fuel flow with
    /// the rectangle rule on the recording's own time steps.
    ///
    /// # Errors
    /// Fails when a fuel flow channel is missing or when more fuel is burnt
    /// than was on board.
    pub fn mass_history(&self, telemetry: &Telemetry) -> Result<Vec<f64>> {
        if self.empty_mass <= 0.0 || self.fuel_mass < 0.0 {
            return Err(DynamicsError::DomainValidation(format!(
                "empty mass {} kg and fuel mass {} kg must be positive",
                self.empty_mass, self.fuel_mass
            )));
        }

        let flows = self
            .fuel_flow_channels
            .iter()
            .map(|name| telemetry.channel(name))
            .collect::<Result<Vec<_>>>()?;

        let time = telemetry.time();
        let mut history = Vec::with_capacity(time.len());
        let mut fuel = self.fuel_mass;
        let dry_mass = self.initial_mass() - self.fuel_mass;

        for (i, _) in time.iter().enumerate() {
            if i > 0 {
                let dt = time[i] - time[i - 1];
                let flow: f64 = flows.iter().map(|f| f[i]).sum::<f64>() * self.fuel_flow_scale;
                fuel -= flow * dt;
                if fuel < 0.0 {
                    return Err(DynamicsError::DomainValidation(format!(
                        "fuel exhausted at t = {} s",
                        time[i]
                    )));
                }
            }
            history.push(dry_mass + fuel);
        }

        Ok(history)
    }

    /// Adds the mass history to `telemetry` as channel `channel`.
    pub fn attach(&self, telemetry: Telemetry, channel: &str) -> Result<Telemetry> {
        let history = self.mass_history(&telemetry)?;
        info!(
            initial = self.initial_mass(),
            last = history.last().copied().unwrap_or(self.initial_mass()),
            "Attached mass history"
        );
        telemetry.with_channel(channel, history)
    }
}
