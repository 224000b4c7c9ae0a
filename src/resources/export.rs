use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use nalgebra::DMatrix;
use tracing::debug;

use crate::components::Axis;
use crate::resources::context::ManoeuvreReport;
use crate::systems::{Eigenmode, ResponseKind};
use crate::utils::Result;

/// Column labels of an 8×N output: the states followed by their rates.
pub fn output_labels(axis: Axis) -> Vec<String> {
    let states = axis.state_labels();
    states
        .iter()
        .map(|s| s.to_string())
        .chain(states.iter().map(|s| format!("d{s}_dt")))
        .collect()
}

/// Writes a time history as CSV, one row per sample. Each output is an 8×N
/// matrix whose columns are aligned with `time`, written under `prefix`.
pub fn write_time_history<W: Write>(
    writer: &mut W,
    time: &[f64],
    outputs: &[(&str, Axis, &DMatrix<f64>)],
) -> std::io::Result<()> {
    write!(writer, "time")?;
    for (prefix, axis, _) in outputs {
        for label in output_labels(*axis) {
            write!(writer, ",{prefix}_{label}")?;
        }
    }
    writeln!(writer)?;

    for (k, t) in time.iter().enumerate() {
        write!(writer, "{t:.6}")?;
        for (_, _, matrix) in outputs {
            for i in 0..matrix.nrows() {
                write!(writer, ",{:.8e}", matrix[(i, k)])?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn write_eigenmodes<W: Write>(
    writer: &mut W,
    axis: Axis,
    modes: &[Eigenmode],
) -> std::io::Result<()> {
    let optional = |v: Option<f64>| v.map(|v| format!("{v:.8e}")).unwrap_or_default();
    for mode in modes {
        writeln!(
            writer,
            "{axis},{:.8e},{:.8e},{:?},{:?},{:.8e},{:.8e},{},{},{}",
            mode.real,
            mode.imag,
            mode.kind,
            mode.stability,
            mode.natural_frequency,
            mode.damping_ratio,
            optional(mode.period),
            optional(mode.time_to_half),
            optional(mode.time_to_double),
        )?;
    }
    Ok(())
}

/// Writes the simulated and measured histories, the mode response and the
/// eigenmode table of `report` into `dir`, returning the files written.
pub fn export_report(report: &ManoeuvreReport, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(3);

    let path = dir.join(format!("{}_forced.csv", report.name));
    let mut writer = BufWriter::new(File::create(&path)?);
    write_time_history(
        &mut writer,
        &report.run.time,
        &[
            ("sim", Axis::Symmetric, &report.run.symmetric),
            ("sim", Axis::Asymmetric, &report.run.asymmetric),
            ("meas", Axis::Symmetric, &report.measured_symmetric),
            ("meas", Axis::Asymmetric, &report.measured_asymmetric),
        ],
    )?;
    writer.flush()?;
    written.push(path);

    let response = &report.mode_response;
    let kind = match response.kind {
        ResponseKind::Impulse => "impulse",
        ResponseKind::Step => "step",
    };
    let path = dir.join(format!("{}_{kind}_response.csv", report.name));
    let mut writer = BufWriter::new(File::create(&path)?);
    write_time_history(
        &mut writer,
        &response.time,
        &[("sim", response.axis, &response.output)],
    )?;
    writer.flush()?;
    written.push(path);

    let path = dir.join(format!("{}_eigenmodes.csv", report.name));
    let mut writer = BufWriter::new(File::create(&path)?);
    writeln!(
        writer,
        "axis,real,imag,kind,stability,natural_frequency,damping_ratio,period,time_to_half,time_to_double"
    )?;
    write_eigenmodes(&mut writer, Axis::Symmetric, &report.summary.symmetric_modes)?;
    write_eigenmodes(&mut writer, Axis::Asymmetric, &report.summary.asymmetric_modes)?;
    writer.flush()?;
    written.push(path);

    debug!(manoeuvre = %report.name, files = written.len(), "Exported report");
    Ok(written)
}
