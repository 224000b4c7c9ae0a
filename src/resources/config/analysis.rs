use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::integration::IntegrationConfig;
use crate::components::{
    AircraftType, ChannelMap, ConfigError, DerivativeSource, MassBudget, TimeWindow,
};
use crate::systems::FlightMode;

/// Where the stability derivative table of an analysis comes from.
///
/// ```yaml
/// aircraft:
///   type: table_file
///   config: tables/citation.yaml
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum AircraftSource {
    Preset(AircraftType),
    TableFile(PathBuf),
}

impl Default for AircraftSource {
    fn default() -> Self {
        AircraftSource::Preset(AircraftType::Citation550)
    }
}

impl From<&AircraftSource> for DerivativeSource {
    fn from(source: &AircraftSource) -> Self {
        match source {
            AircraftSource::Preset(aircraft_type) => DerivativeSource::Programmed(*aircraft_type),
            AircraftSource::TableFile(path) => DerivativeSource::File(path.clone()),
        }
    }
}

/// One named manoeuvre window of a flight test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManoeuvreConfig {
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub mode: FlightMode,
}

impl ManoeuvreConfig {
    pub fn window(&self) -> crate::utils::Result<TimeWindow> {
        TimeWindow::new(self.start, self.end)
    }
}

/// A complete analysis run: aircraft, recording, and the windows to fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub aircraft: AircraftSource,
    pub telemetry_file: PathBuf,
    #[serde(default)]
    pub channels: ChannelMap,
    #[serde(default)]
    pub integration: IntegrationConfig,
    /// Mass history to attach as the mass channel when the recording has none.
    #[serde(default)]
    pub mass: Option<MassBudget>,
    pub manoeuvres: Vec<ManoeuvreConfig>,
}

impl AnalysisConfig {
    /// Loads a YAML config. Relative paths inside it are taken relative to
    /// the directory of the config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&contents)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.integration.refinement == 0 {
            return Err(ConfigError::ValidationError(
                "integration.refinement must be at least 1".to_string(),
            ));
        }
        if self.manoeuvres.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one manoeuvre window is required".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for manoeuvre in &self.manoeuvres {
            if !names.insert(manoeuvre.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate manoeuvre name {}",
                    manoeuvre.name
                )));
            }
            if manoeuvre.window().is_err() {
                return Err(ConfigError::ValidationError(format!(
                    "manoeuvre {} has an invalid window [{}, {}]",
                    manoeuvre.name, manoeuvre.start, manoeuvre.end
                )));
            }
        }

        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.telemetry_file.is_relative() {
            self.telemetry_file = base.join(&self.telemetry_file);
        }
        if let AircraftSource::TableFile(path) = &mut self.aircraft {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
