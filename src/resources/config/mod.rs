pub mod analysis;
pub mod integration;

pub use analysis::{AircraftSource, AnalysisConfig, ManoeuvreConfig};
pub use integration::IntegrationConfig;
