pub mod config;
mod context;
pub mod export;

pub use config::{AircraftSource, AnalysisConfig, IntegrationConfig, ManoeuvreConfig};
pub use context::{FlightAnalysisContext, ManoeuvreFailure, ManoeuvreReport, ManoeuvreSummary};
pub use export::export_report;
