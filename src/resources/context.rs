use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::components::{
    Axis, ChannelMap, DerivativeSource, FlightCondition, StabilityDerivativeTable, Telemetry,
    TimeWindow,
};
use crate::resources::config::{AnalysisConfig, ManoeuvreConfig};
use crate::systems::{
    Eigenmode, FitMetrics, FlightMode, ManoeuvreSimulator, ResponseRun, SimulationRun,
};
use crate::utils::{DynamicsError, Result};

/// Everything an analysis needs, built once from explicit inputs and shared
/// read-only by every manoeuvre window.
#[derive(Debug, Clone)]
pub struct FlightAnalysisContext {
    table: StabilityDerivativeTable,
    telemetry: Telemetry,
    channels: ChannelMap,
    refinement: usize,
}

/// Result of analysing one manoeuvre window.
#[derive(Debug, Clone)]
pub struct ManoeuvreReport {
    pub name: String,
    pub mode: FlightMode,
    pub window: TimeWindow,
    pub run: SimulationRun,
    pub measured_symmetric: DMatrix<f64>,
    pub measured_asymmetric: DMatrix<f64>,
    pub mode_response: ResponseRun,
    pub summary: ManoeuvreSummary,
}

/// The scalar part of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManoeuvreSummary {
    pub name: String,
    pub mode: FlightMode,
    pub window: TimeWindow,
    pub samples: usize,
    pub trim: FlightCondition,
    pub symmetric_modes: Vec<Eigenmode>,
    pub asymmetric_modes: Vec<Eigenmode>,
    /// Eigenmode of the manoeuvre's own flight mode, if one matches.
    pub identified: Option<Eigenmode>,
    pub fit: FitMetrics,
}

/// A window that failed, kept alongside the successful ones.
#[derive(Debug)]
pub struct ManoeuvreFailure {
    pub name: String,
    pub window: (f64, f64),
    pub error: DynamicsError,
}

impl FlightAnalysisContext {
    pub fn new(
        table: StabilityDerivativeTable,
        telemetry: Telemetry,
        channels: ChannelMap,
        refinement: usize,
    ) -> Result<Self> {
        if refinement == 0 {
            return Err(DynamicsError::InvalidInput(
                "integration refinement must be at least 1".to_string(),
            ));
        }
        table.validate()?;
        Ok(Self {
            table,
            telemetry,
            channels,
            refinement,
        })
    }

    /// Loads the derivative table and recording named by `config`, attaching
    /// a computed mass channel when a mass budget is configured.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let table = StabilityDerivativeTable::new(DerivativeSource::from(&config.aircraft))?;
        let mut telemetry =
            Telemetry::from_json_file(&config.telemetry_file, &config.channels.time)?;

        if let Some(budget) = &config.mass {
            telemetry = budget.attach(telemetry, &config.channels.mass)?;
        }

        info!(
            aircraft = %table.name,
            telemetry = %config.telemetry_file.display(),
            samples = telemetry.len(),
            "Loaded flight analysis context"
        );

        Self::new(
            table,
            telemetry,
            config.channels.clone(),
            config.integration.refinement,
        )
    }

    pub fn table(&self) -> &StabilityDerivativeTable {
        &self.table
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn simulator(&self, window: TimeWindow) -> Result<ManoeuvreSimulator> {
        ManoeuvreSimulator::new(&self.table, &self.telemetry, window, &self.channels)?
            .with_refinement(self.refinement)
    }

    /// Forced response, eigenmodes, named mode response and fit of one window.
    pub fn analyse(&self, manoeuvre: &ManoeuvreConfig) -> Result<ManoeuvreReport> {
        let window = manoeuvre.window()?;
        let simulator = self.simulator(window)?;

        let run = simulator.simulate_forced_response()?;
        let symmetric_modes = simulator.eigenmodes(Axis::Symmetric)?;
        let asymmetric_modes = simulator.eigenmodes(Axis::Asymmetric)?;
        let mode_response = simulator.mode_response(manoeuvre.mode)?;
        let fit = simulator.fit_metrics(&run);

        let own_modes = match manoeuvre.mode.axis() {
            Axis::Symmetric => &symmetric_modes,
            Axis::Asymmetric => &asymmetric_modes,
        };
        let identified = manoeuvre.mode.identify(own_modes).copied();
        if identified.is_none() {
            warn!(
                manoeuvre = %manoeuvre.name,
                mode = %manoeuvre.mode,
                "No eigenmode matches the manoeuvre's flight mode"
            );
        }

        let summary = ManoeuvreSummary {
            name: manoeuvre.name.clone(),
            mode: manoeuvre.mode,
            window,
            samples: simulator.time().len(),
            trim: *simulator.condition(),
            symmetric_modes,
            asymmetric_modes,
            identified,
            fit,
        };

        info!(
            manoeuvre = %manoeuvre.name,
            mode = %manoeuvre.mode,
            eigenvalue_re = identified.map(|m| m.real),
            eigenvalue_im = identified.map(|m| m.imag),
            "Analysed manoeuvre"
        );

        Ok(ManoeuvreReport {
            name: manoeuvre.name.clone(),
            mode: manoeuvre.mode,
            window,
            measured_symmetric: simulator.measured_output(Axis::Symmetric).clone(),
            measured_asymmetric: simulator.measured_output(Axis::Asymmetric).clone(),
            run,
            mode_response,
            summary,
        })
    }

    /// Analyses every window in parallel. Each window succeeds or fails on
    /// its own; results keep the order of `manoeuvres`.
    pub fn analyse_all(
        &self,
        manoeuvres: &[ManoeuvreConfig],
    ) -> Vec<std::result::Result<ManoeuvreReport, ManoeuvreFailure>> {
        manoeuvres
            .par_iter()
            .map(|manoeuvre| {
                self.analyse(manoeuvre).map_err(|error| ManoeuvreFailure {
                    name: manoeuvre.name.clone(),
                    window: (manoeuvre.start, manoeuvre.end),
                    error,
                })
            })
            .collect()
    }
}
