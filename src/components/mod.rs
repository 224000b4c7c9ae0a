pub mod aerodynamics;
pub mod aircraft;
mod axis;
pub mod flight_condition;
pub mod mass;
pub mod telemetry;

pub use aerodynamics::AerodynamicState;
pub use aircraft::{
    AircraftGeometry, AircraftType, AsymmetricDerivatives, AtmosphereConstants, ConfigError,
    DerivativeSource, FittedCoefficients, InertiaRadii, RawDerivativeTable,
    StabilityDerivativeTable, SymmetricDerivatives,
};
pub use axis::Axis;
pub use flight_condition::FlightCondition;
pub use mass::MassBudget;
pub use telemetry::{AngleUnit, ChannelMap, MeasuredChannels, Telemetry, TelemetrySlice, TimeWindow};
