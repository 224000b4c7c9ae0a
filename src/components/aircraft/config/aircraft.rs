use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::components::aircraft::config::{
    AircraftGeometry, AsymmetricDerivatives, AtmosphereConstants, ConfigError, FittedCoefficients,
    InertiaRadii, RawDerivativeTable, SymmetricDerivatives,
};

/// Every constant the linear equations of motion need for one aircraft
/// configuration: stability derivatives, fitted coefficients, geometry,
/// mass distribution and the reference atmosphere.
///
/// The table is a value object. It is built once, validated, and then only
/// ever borrowed by the computations that use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityDerivativeTable {
    /// Name of the aircraft, defaults to type name.
    pub name: String,
    pub symmetric: SymmetricDerivatives,
    pub asymmetric: AsymmetricDerivatives,
    pub fitted: FittedCoefficients,
    pub geometry: AircraftGeometry,
    pub inertia: InertiaRadii,
    pub atmosphere: AtmosphereConstants,
}

impl Default for StabilityDerivativeTable {
    /// The `Citation550` configuration is chosen as the default for convenience.
    fn default() -> Self {
        Self::citation_550()
    }
}

impl StabilityDerivativeTable {
    /// Creates a derivative table from a given source.
    ///
    /// # Arguments
    /// * `source` - A `DerivativeSource` specifying if the table is hardcoded
    ///              (`Programmed`) or loaded from a file (`File`).
    ///
    /// # Returns
    /// A `Result` containing the validated table or an error if the file fails to load.
    pub fn new(source: DerivativeSource) -> Result<Self, ConfigError> {
        let table = match source {
            DerivativeSource::Programmed(aircraft_type) => Self::from_programmed(aircraft_type),
            DerivativeSource::File(path) => Self::from_file(path)?,
        };
        table.validate()?;
        Ok(table)
    }

    fn from_programmed(aircraft_type: AircraftType) -> Self {
        match aircraft_type {
            AircraftType::Citation550 => Self {
                name: "Citation550".to_string(),
                symmetric: SymmetricDerivatives::citation_550(),
                asymmetric: AsymmetricDerivatives::citation_550(),
                fitted: FittedCoefficients::citation_550(),
                geometry: AircraftGeometry::citation_550(),
                inertia: InertiaRadii::citation_550(),
                atmosphere: AtmosphereConstants::citation_550(),
            },
        }
    }

    /// Reads a flat YAML table keyed by the conventional coefficient names.
    ///
    /// # Arguments
    /// * `path` - Path to the YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&file_contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawDerivativeTable = serde_yaml::from_str(contents)?;
        let table = Self::from_raw(&raw);
        table.validate()?;
        Ok(table)
    }

    /// Writes the table in the same flat YAML layout `from_file` reads.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let raw = RawDerivativeTable::from(self);
        std::fs::write(path, serde_yaml::to_string(&raw)?)?;
        Ok(())
    }

    pub fn citation_550() -> Self {
        Self::from_programmed(AircraftType::Citation550)
    }

    /// Checks that geometry and atmosphere are physical and every entry is finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let geometry = &self.geometry;
        let positive = [
            ("S", geometry.wing_area),
            ("b", geometry.wing_span),
            ("c", geometry.mac),
            ("Sh", geometry.tail_area),
            ("bh", geometry.tail_span),
            ("rho0", self.atmosphere.rho0),
            ("Temp0", self.atmosphere.temp0),
            ("R", self.atmosphere.gas_constant),
            ("g", self.atmosphere.gravity),
            ("e", self.fitted.oswald_efficiency),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if self.atmosphere.lapse_rate == 0.0 {
            return Err(ConfigError::ValidationError(
                "lambda must be non-zero for the barometric density model".to_string(),
            ));
        }

        let all_finite = self
            .symmetric
            .values()
            .iter()
            .chain(self.asymmetric.values().iter())
            .chain(self.fitted.values().iter())
            .chain(
                [
                    self.geometry.tail_arm,
                    self.geometry.tail_incidence,
                    self.geometry.tail_speed_ratio,
                    self.inertia.kx2,
                    self.inertia.ky2,
                    self.inertia.kz2,
                    self.inertia.kxz,
                    self.atmosphere.p0,
                    self.atmosphere.lapse_rate,
                ]
                .iter(),
            )
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::ValidationError(format!(
                "table {} contains non-finite coefficients",
                self.name
            )));
        }

        Ok(())
    }
}

/// Source for a stability derivative table.
/// Can either be a hardcoded configuration (`Programmed`) or loaded from a file.
#[derive(Debug, Clone)]
pub enum DerivativeSource {
    Programmed(AircraftType),
    File(PathBuf),
}

/// Enumeration of aircraft with programmed derivative tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AircraftType {
    Citation550,
}
