use citation_dynamics::components::{ChannelMap, MassBudget};
use citation_dynamics::resources::{
    export_report, AircraftSource, AnalysisConfig, FlightAnalysisContext, IntegrationConfig,
    ManoeuvreConfig,
};
use citation_dynamics::systems::FlightMode;
use citation_dynamics::utils::DynamicsError;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::common::{
    citation_table, recording_channels, synthetic_recording, write_telemetry_json,
};

fn manoeuvre(name: &str, start: f64, end: f64, mode: FlightMode) -> ManoeuvreConfig {
    ManoeuvreConfig {
        name: name.to_string(),
        start,
        end,
        mode,
    }
}

#[test]
fn test_analyse_all_keeps_order_and_isolates_failures() {
    let context = FlightAnalysisContext::new(
        citation_table(),
        synthetic_recording(200),
        ChannelMap::default(),
        2,
    )
    .unwrap();
    let manoeuvres = vec![
        manoeuvre("phugoid", 0.0, 15.0, FlightMode::Phugoid),
        manoeuvre("too_short", 5.0, 5.2, FlightMode::ShortPeriod),
        manoeuvre("dutch_roll", 2.0, 12.0, FlightMode::DutchRoll),
    ];

    let results = context.analyse_all(&manoeuvres);
    assert_eq!(results.len(), 3);

    let phugoid = results[0].as_ref().unwrap();
    assert_eq!(phugoid.name, "phugoid");
    assert_eq!(phugoid.summary.symmetric_modes.len(), 4);
    assert_eq!(phugoid.summary.asymmetric_modes.len(), 4);
    assert!(phugoid.summary.identified.unwrap().is_oscillatory());

    let failure = results[1].as_ref().unwrap_err();
    assert_eq!(failure.name, "too_short");
    assert!(matches!(failure.error, DynamicsError::InsufficientData { .. }));

    let dutch_roll = results[2].as_ref().unwrap();
    assert_eq!(dutch_roll.mode_response.input, 1);
}

#[test]
fn test_context_from_config_files() {
    let dir = tempdir().unwrap();
    let telemetry_path = write_telemetry_json(dir.path(), &recording_channels(120, false));
    let table_path = dir.path().join("citation.yaml");
    citation_table().save(&table_path).unwrap();

    let config = AnalysisConfig {
        aircraft: AircraftSource::TableFile(table_path),
        telemetry_file: telemetry_path,
        channels: ChannelMap::default(),
        integration: IntegrationConfig { refinement: 4 },
        mass: None,
        manoeuvres: vec![manoeuvre("spiral", 0.0, 10.95, FlightMode::Spiral)],
    };
    let config_path = dir.path().join("analysis.yaml");
    config.save(&config_path).unwrap();

    let loaded = AnalysisConfig::load(&config_path).unwrap();
    let context = FlightAnalysisContext::from_config(&loaded).unwrap();
    assert_eq!(context.table(), &citation_table());
    assert_eq!(context.telemetry().len(), 120);

    let report = context.analyse(&loaded.manoeuvres[0]).unwrap();
    assert_eq!(report.summary.samples, 110);

    let output_dir = dir.path().join("out");
    let files = export_report(&report, &output_dir).unwrap();
    assert_eq!(files.len(), 3);
    for file in &files {
        assert!(file.exists());
    }

    let forced = std::fs::read_to_string(&files[0]).unwrap();
    assert_eq!(forced.lines().count(), 1 + 110);
    assert_eq!(forced.lines().next().unwrap().split(',').count(), 1 + 4 * 8);

    let eigenmodes = std::fs::read_to_string(&files[2]).unwrap();
    assert_eq!(eigenmodes.lines().count(), 1 + 8);
}

#[test]
fn test_mass_budget_supplies_mass_channel() {
    let dir = tempdir().unwrap();
    let mut channels = recording_channels(100, false);
    channels.remove("mass");
    channels.insert("lh_engine_FMF".to_string(), vec![0.05; 100]);
    channels.insert("rh_engine_FMF".to_string(), vec![0.05; 100]);
    let telemetry_path = write_telemetry_json(dir.path(), &channels);

    let config = AnalysisConfig {
        aircraft: AircraftSource::default(),
        telemetry_file: telemetry_path,
        channels: ChannelMap::default(),
        integration: IntegrationConfig::default(),
        mass: Some(MassBudget {
            empty_mass: 4157.0,
            payload: vec![95.0, 92.0, 74.0, 66.0, 61.0, 75.0, 78.0, 86.0, 68.0],
            fuel_mass: 1200.0,
            fuel_flow_channels: vec!["lh_engine_FMF".to_string(), "rh_engine_FMF".to_string()],
            fuel_flow_scale: 1.0,
        }),
        manoeuvres: vec![manoeuvre("roll", 2.0, 9.0, FlightMode::AperiodicRoll)],
    };

    let context = FlightAnalysisContext::from_config(&config).unwrap();
    let simulator = context
        .simulator(config.manoeuvres[0].window().unwrap())
        .unwrap();

    // 2 s of 0.1 kg/s burnt before the window opens
    let initial = 4157.0 + 695.0 + 1200.0;
    approx::assert_relative_eq!(simulator.condition().mass, initial - 0.2, epsilon = 1e-9);
}

#[test]
fn test_missing_mass_channel_without_budget() {
    let dir = tempdir().unwrap();
    let mut channels = recording_channels(60, false);
    channels.remove("mass");
    let telemetry_path = write_telemetry_json(dir.path(), &channels);

    let config = AnalysisConfig {
        aircraft: AircraftSource::default(),
        telemetry_file: telemetry_path,
        channels: ChannelMap::default(),
        integration: IntegrationConfig::default(),
        mass: None,
        manoeuvres: vec![manoeuvre("phugoid", 0.0, 5.0, FlightMode::Phugoid)],
    };

    let context = FlightAnalysisContext::from_config(&config).unwrap();
    let result = context.analyse(&config.manoeuvres[0]);
    assert!(matches!(result, Err(DynamicsError::MissingChannel(name)) if name == "mass"));
}

#[test]
fn test_repeated_timestamp_is_rejected() {
    let dir = tempdir().unwrap();
    let mut channels = recording_channels(100, false);
    let time = channels.get_mut("time").unwrap();
    time[50] = time[49];
    let telemetry_path = write_telemetry_json(dir.path(), &channels);

    let config = AnalysisConfig {
        aircraft: AircraftSource::default(),
        telemetry_file: telemetry_path,
        channels: ChannelMap::default(),
        integration: IntegrationConfig::default(),
        mass: None,
        manoeuvres: vec![manoeuvre("dutch_roll", 3.0, 8.0, FlightMode::DutchRoll)],
    };

    assert!(matches!(
        FlightAnalysisContext::from_config(&config),
        Err(DynamicsError::InvalidInput(_))
    ));
}

#[test]
fn test_rejects_zero_refinement() {
    assert!(FlightAnalysisContext::new(
        citation_table(),
        synthetic_recording(10),
        ChannelMap::default(),
        0
    )
    .is_err());
}
