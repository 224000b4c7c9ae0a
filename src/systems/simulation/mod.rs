mod manoeuvre;
mod modes;
mod response;

pub use manoeuvre::{FitMetrics, FlightMode, ManoeuvreSimulator, ResponseRun, SimulationRun};
pub use modes::{eigenmodes, eigenvalues, oscillatory_pairs, Eigenmode, ModeKind, Stability};
pub use response::{impulse, respond, simulate, step, unit_input, ResponseKind};
