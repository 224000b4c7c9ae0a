use std::io;
use thiserror::Error;

use crate::components::aircraft::config::ConfigError;
use crate::components::Axis;

#[derive(Error, Debug)]
pub enum DynamicsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid flight condition: {0}")]
    DomainValidation(String),

    #[error("Singular {axis} system: {reason}")]
    SingularSystem { axis: Axis, reason: String },

    #[error("Insufficient telemetry: {samples} samples in window, at least {required} required")]
    InsufficientData { samples: usize, required: usize },

    #[error("Numerical instability in the {axis} system: {reason}")]
    NumericalInstability { axis: Axis, reason: String },

    #[error("Telemetry channel not found: {0}")]
    MissingChannel(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DynamicsError {
    /// The axis a failure is tied to, when it is tied to one.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            DynamicsError::SingularSystem { axis, .. }
            | DynamicsError::NumericalInstability { axis, .. } => Some(*axis),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DynamicsError>;
