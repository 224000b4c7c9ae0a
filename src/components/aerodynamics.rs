use std::f64::consts::PI;

use serde::Serialize;
use tracing::debug;

use crate::components::{FlightCondition, StabilityDerivativeTable};
use crate::utils::{DynamicsError, Result};

/// Flight condition dependent quantities of the non-dimensional equations of
/// motion. Every field is a closed-form function of the derivative table and
/// the flight condition it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct AerodynamicState {
    /// The operating point this state was derived for.
    pub condition: FlightCondition,
    /// Air density at the trim altitude (kg/m³).
    pub density: f64,
    /// Aircraft weight (N).
    pub weight: f64,
    /// Dynamic pressure ½ρV² (Pa).
    pub dynamic_pressure: f64,
    /// Symmetric dimensionless mass m/(ρSc).
    pub muc: f64,
    /// Asymmetric dimensionless mass m/(ρSb).
    pub mub: f64,
    /// Trim lift coefficient.
    pub c_l: f64,
    /// Drag coefficient from the quadratic drag polar.
    pub c_d: f64,
    /// Trim X-force coefficient, weight resolved along the body X axis.
    pub c_x0: f64,
    /// Trim Z-force coefficient, weight resolved along the body Z axis.
    pub c_z0: f64,
}

impl AerodynamicState {
    /// Derives the aerodynamic state at `condition`.
    ///
    /// # Errors
    /// Returns `DomainValidation` for a non-positive airspeed or mass, for
    /// non-finite inputs, and for altitudes outside the barometric model.
    pub fn new(table: &StabilityDerivativeTable, condition: FlightCondition) -> Result<Self> {
        validate_condition(&condition)?;

        let atmosphere = &table.atmosphere;
        let geometry = &table.geometry;
        let fitted = &table.fitted;

        let density = atmosphere.density(condition.pressure_altitude)?;
        let weight = condition.mass * atmosphere.gravity;
        let v0 = condition.true_airspeed;
        let dynamic_pressure = 0.5 * density * v0 * v0;
        let qs = dynamic_pressure * geometry.wing_area;

        let muc = condition.mass / (density * geometry.wing_area * geometry.mac);
        let mub = condition.mass / (density * geometry.wing_area * geometry.wing_span);

        let aspect_ratio = geometry.aspect_ratio();

        let c_l = weight / qs;
        let c_d = fitted.c_d_0
            + (fitted.c_l_alpha * condition.angle_of_attack).powi(2)
                / (PI * aspect_ratio * fitted.oswald_efficiency);

        let c_x0 = weight * condition.pitch_angle.sin() / qs;
        let c_z0 = -weight * condition.pitch_angle.cos() / qs;

        let state = Self {
            condition,
            density,
            weight,
            dynamic_pressure,
            muc,
            mub,
            c_l,
            c_d,
            c_x0,
            c_z0,
        };

        debug!(
            rho = state.density,
            muc = state.muc,
            mub = state.mub,
            cl = state.c_l,
            cd = state.c_d,
            "Derived aerodynamic state"
        );

        Ok(state)
    }

    /// Chord over airspeed, the time scale of the symmetric equations (s).
    pub fn chord_time(&self, table: &StabilityDerivativeTable) -> f64 {
        table.geometry.mac / self.condition.true_airspeed
    }

    /// Span over airspeed, the time scale of the asymmetric equations (s).
    pub fn span_time(&self, table: &StabilityDerivativeTable) -> f64 {
        table.geometry.wing_span / self.condition.true_airspeed
    }
}

fn validate_condition(condition: &FlightCondition) -> Result<()> {
    let fields = [
        ("pressure altitude", condition.pressure_altitude),
        ("true airspeed", condition.true_airspeed),
        ("angle of attack", condition.angle_of_attack),
        ("pitch angle", condition.pitch_angle),
        ("mass", condition.mass),
    ];
    if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(DynamicsError::DomainValidation(format!(
            "{name} must be finite, got {value}"
        )));
    }
    if condition.true_airspeed <= 0.0 {
        return Err(DynamicsError::DomainValidation(format!(
            "true airspeed must be positive, got {} m/s",
            condition.true_airspeed
        )));
    }
    if condition.mass <= 0.0 {
        return Err(DynamicsError::DomainValidation(format!(
            "mass must be positive, got {} kg",
            condition.mass
        )));
    }
    Ok(())
}
