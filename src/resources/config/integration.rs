use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Minimum RK4 sub-steps per telemetry interval.
    pub refinement: usize,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self { refinement: 1 }
    }
}
