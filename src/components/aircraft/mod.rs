pub mod config;

pub use config::{
    AircraftGeometry, AircraftType, AsymmetricDerivatives, AtmosphereConstants, ConfigError,
    DerivativeSource, FittedCoefficients, InertiaRadii, RawDerivativeTable,
    StabilityDerivativeTable, SymmetricDerivatives,
};
