pub mod simulation;
pub mod statespace;

pub use simulation::{
    Eigenmode, FitMetrics, FlightMode, ManoeuvreSimulator, ModeKind, ResponseKind, ResponseRun,
    SimulationRun, Stability,
};
pub use statespace::{
    AsymmetricSystem, EquationMatrices, LinearSystem, StateSpaceBuilder, SymmetricSystem,
};
