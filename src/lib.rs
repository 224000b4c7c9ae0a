pub mod components;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{AerodynamicState, FlightCondition, StabilityDerivativeTable, Telemetry};
pub use resources::{AnalysisConfig, FlightAnalysisContext};
pub use systems::{LinearSystem, ManoeuvreSimulator, StateSpaceBuilder};
pub use utils::{DynamicsError, Result};
