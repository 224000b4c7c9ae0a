use serde::{Deserialize, Serialize};

use crate::utils::{
    DynamicsError, Result, AIR_GAS_CONSTANT, GRAVITY, ISA_LAPSE_RATE, ISA_SEA_LEVEL_DENSITY,
    ISA_SEA_LEVEL_PRESSURE, ISA_SEA_LEVEL_TEMP,
};

/// Reference atmosphere and gravity used to derive the flight condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereConstants {
    /// Sea level density (kg/m³).
    pub rho0: f64,
    /// Sea level pressure (Pa).
    pub p0: f64,
    /// Sea level temperature (K).
    pub temp0: f64,
    /// Temperature gradient in the troposphere (K/m).
    pub lapse_rate: f64,
    /// Specific gas constant of air (J/(kg·K)).
    pub gas_constant: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
}

impl Default for AtmosphereConstants {
    fn default() -> Self {
        Self::isa()
    }
}

impl AtmosphereConstants {
    pub fn isa() -> Self {
        Self {
            rho0: ISA_SEA_LEVEL_DENSITY,
            p0: ISA_SEA_LEVEL_PRESSURE,
            temp0: ISA_SEA_LEVEL_TEMP,
            lapse_rate: ISA_LAPSE_RATE,
            gas_constant: AIR_GAS_CONSTANT,
            gravity: GRAVITY,
        }
    }

    /// The rounded constants the Citation reference data was generated with.
    pub fn citation_550() -> Self {
        Self {
            gas_constant: 287.05,
            gravity: 9.81,
            ..Self::isa()
        }
    }

    /// Barometric density at pressure altitude `hp` (m), constant lapse rate.
    pub fn density(&self, hp: f64) -> Result<f64> {
        let ratio = 1.0 + self.lapse_rate * hp / self.temp0;
        if !(ratio > 0.0) {
            return Err(DynamicsError::DomainValidation(format!(
                "pressure altitude {hp} m lies outside the constant lapse rate layer"
            )));
        }
        let exponent = -(self.gravity / (self.lapse_rate * self.gas_constant) + 1.0);
        Ok(self.rho0 * ratio.powf(exponent))
    }
}
