mod aero_coef;
mod aircraft;
mod atmosphere;
mod geometry;
mod loader;

pub use aero_coef::{AsymmetricDerivatives, FittedCoefficients, SymmetricDerivatives};
pub use aircraft::{AircraftType, DerivativeSource, StabilityDerivativeTable};
pub use atmosphere::AtmosphereConstants;
pub use geometry::{AircraftGeometry, InertiaRadii};
pub use loader::{ConfigError, RawDerivativeTable};
