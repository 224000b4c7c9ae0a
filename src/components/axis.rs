use serde::{Deserialize, Serialize};
use std::fmt;

/// The two decoupled sets of linearised equations of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Longitudinal motion: û, α, θ, qc/V driven by the elevator.
    Symmetric,
    /// Lateral motion: β, φ, pb/2V, rb/2V driven by aileron and rudder.
    Asymmetric,
}

impl Axis {
    /// Labels of the four states, in state vector order.
    pub fn state_labels(&self) -> [&'static str; 4] {
        match self {
            Axis::Symmetric => ["u_hat", "alpha", "theta", "qc_V"],
            Axis::Asymmetric => ["beta", "phi", "pb_2V", "rb_2V"],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Symmetric => write!(f, "symmetric"),
            Axis::Asymmetric => write!(f, "asymmetric"),
        }
    }
}
