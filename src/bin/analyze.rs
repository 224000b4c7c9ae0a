//! Fits the linear symmetric and asymmetric models to every manoeuvre window
//! of a flight test and writes the simulated, measured and modal results.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use citation_dynamics::resources::{export_report, AnalysisConfig, FlightAnalysisContext};

#[derive(Parser, Debug)]
#[command(name = "manoeuvre_analysis")]
#[command(about = "Compare linearised flight dynamics against flight test manoeuvres")]
#[command(version)]
struct Args {
    /// Analysis config (YAML)
    config: PathBuf,

    /// Directory the CSV results are written to
    #[arg(short, long, default_value = "analysis_output")]
    output_dir: PathBuf,

    /// Override the integration refinement of the config
    #[arg(long)]
    refinement: Option<usize>,

    /// Only analyse the named manoeuvres
    #[arg(long)]
    only: Vec<String>,

    /// Print the summaries as JSON instead of writing CSV files
    #[arg(long)]
    summary_only: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "Some manoeuvres could not be analysed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Analysis aborted");
            ExitCode::FAILURE
        }
    }
}

/// Runs the analysis and returns the number of failed manoeuvres.
fn run(args: &Args) -> Result<usize, Box<dyn std::error::Error>> {
    let mut config = AnalysisConfig::load(&args.config)?;
    if let Some(refinement) = args.refinement {
        config.integration.refinement = refinement;
    }
    if !args.only.is_empty() {
        config.manoeuvres.retain(|m| args.only.contains(&m.name));
    }
    config.validate()?;

    let context = FlightAnalysisContext::from_config(&config)?;
    let results = context.analyse_all(&config.manoeuvres);

    let mut failed = 0;
    for result in results {
        match result {
            Ok(report) => {
                if args.summary_only {
                    println!("{}", serde_json::to_string_pretty(&report.summary)?);
                } else {
                    let files = export_report(&report, &args.output_dir)?;
                    info!(
                        manoeuvre = %report.name,
                        files = files.len(),
                        dir = %args.output_dir.display(),
                        "Wrote results"
                    );
                }
            }
            Err(failure) => {
                failed += 1;
                let axis = failure
                    .error
                    .axis()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "-".to_string());
                error!(
                    manoeuvre = %failure.name,
                    start = failure.window.0,
                    end = failure.window.1,
                    axis = %axis,
                    error = %failure.error,
                    "Manoeuvre failed"
                );
            }
        }
    }

    Ok(failed)
}
