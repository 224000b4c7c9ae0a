mod conditions;
mod telemetry;

// Re-export test fixtures
pub use conditions::*;
pub use telemetry::*;
