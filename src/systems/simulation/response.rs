use nalgebra::{DMatrix, Matrix4, SVector, Vector4};
use serde::{Deserialize, Serialize};

use crate::systems::statespace::LinearSystem;
use crate::components::Axis;
use crate::utils::{lerp, DynamicsError, Result, MAX_STEP_SCALE, MAX_SUBSTEPS, OUTPUT_DIM};

/// Canonical open loop excitation of a single input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Impulse,
    Step,
}

/// Integrates ẋ = Ax + Bu from x(t₀) = `initial` over the grid `time` and
/// returns the 8×N augmented output y = Cx + Du sampled on that grid.
///
/// `inputs` holds one input vector per grid point. Each interval is split
/// into classical RK4 steps with the input interpolated linearly between its
/// end points, so nothing is extrapolated past the last sample. The interval
/// gets at least `refinement` steps, and more when ‖A‖∞·h would otherwise
/// exceed `MAX_STEP_SCALE`, so coarse grids stay stable.
///
/// # Errors
/// `InvalidInput` when the grid and input lengths differ or refinement is
/// zero; `NumericalInstability` when an interval would need more than
/// `MAX_SUBSTEPS` steps or the output stops being finite.
pub fn simulate<const M: usize>(
    system: &LinearSystem<M>,
    time: &[f64],
    inputs: &[SVector<f64, M>],
    initial: Vector4<f64>,
    refinement: usize,
) -> Result<DMatrix<f64>> {
    if time.len() != inputs.len() {
        return Err(DynamicsError::InvalidInput(format!(
            "{} input samples for a time grid of {}",
            inputs.len(),
            time.len()
        )));
    }
    if refinement == 0 {
        return Err(DynamicsError::InvalidInput(
            "integration refinement must be at least 1".to_string(),
        ));
    }

    let mut output = DMatrix::zeros(OUTPUT_DIM, time.len());
    if time.is_empty() {
        return Ok(output);
    }

    let scale = step_scale(system.a());
    let mut x = initial;
    store(system, &mut output, 0, &x, &inputs[0], time[0])?;

    for k in 1..time.len() {
        let interval = time[k] - time[k - 1];
        let steps = substeps(system.axis(), scale, interval, refinement)?;
        let h = interval / steps as f64;
        let (u_start, u_end) = (&inputs[k - 1], &inputs[k]);
        let input_at = |fraction: f64| -> SVector<f64, M> {
            SVector::from_fn(|i, _| lerp(u_start[i], u_end[i], fraction))
        };

        for j in 0..steps {
            let f0 = j as f64 / steps as f64;
            let f1 = (j + 1) as f64 / steps as f64;
            x = rk4_step(system, &x, &input_at(f0), &input_at(0.5 * (f0 + f1)), &input_at(f1), h);
        }

        store(system, &mut output, k, &x, &inputs[k], time[k])?;
    }

    Ok(output)
}

/// Response to a unit impulse on input `input`, starting from rest.
///
/// The impulse is applied as the initial state x(t₀) = B eᵢ with the input
/// held at zero afterwards.
pub fn impulse<const M: usize>(
    system: &LinearSystem<M>,
    time: &[f64],
    input: usize,
    refinement: usize,
) -> Result<DMatrix<f64>> {
    check_input::<M>(input)?;
    let initial = system.b().column(input).into_owned();
    let inputs = vec![SVector::<f64, M>::zeros(); time.len()];
    simulate(system, time, &inputs, initial, refinement)
}

/// Response to a unit step on input `input`, starting from rest.
pub fn step<const M: usize>(
    system: &LinearSystem<M>,
    time: &[f64],
    input: usize,
    refinement: usize,
) -> Result<DMatrix<f64>> {
    check_input::<M>(input)?;
    let inputs = vec![unit_input::<M>(input); time.len()];
    simulate(system, time, &inputs, Vector4::zeros(), refinement)
}

pub fn respond<const M: usize>(
    system: &LinearSystem<M>,
    kind: ResponseKind,
    time: &[f64],
    input: usize,
    refinement: usize,
) -> Result<DMatrix<f64>> {
    match kind {
        ResponseKind::Impulse => impulse(system, time, input, refinement),
        ResponseKind::Step => step(system, time, input, refinement),
    }
}

/// Unit input vector along channel `input`.
pub fn unit_input<const M: usize>(input: usize) -> SVector<f64, M> {
    SVector::from_fn(|i, _| if i == input { 1.0 } else { 0.0 })
}

fn check_input<const M: usize>(input: usize) -> Result<()> {
    if input >= M {
        return Err(DynamicsError::InvalidInput(format!(
            "input channel {input} out of range for a system with {M} inputs"
        )));
    }
    Ok(())
}

/// ‖A‖∞, an upper bound on the magnitude of every eigenvalue of `a`.
fn step_scale(a: &Matrix4<f64>) -> f64 {
    a.row_iter()
        .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// RK4 steps for one sample interval: `refinement`, or more if the interval
/// is too long for a stable step.
fn substeps(axis: Axis, scale: f64, interval: f64, refinement: usize) -> Result<usize> {
    let required = (scale * interval / MAX_STEP_SCALE).ceil();
    if !required.is_finite() || required > MAX_SUBSTEPS as f64 {
        return Err(DynamicsError::NumericalInstability {
            axis,
            reason: format!(
                "a {interval} s sample interval needs more than {MAX_SUBSTEPS} integration steps"
            ),
        });
    }
    Ok(refinement.max(required as usize))
}

fn rk4_step<const M: usize>(
    system: &LinearSystem<M>,
    x: &Vector4<f64>,
    u_start: &SVector<f64, M>,
    u_mid: &SVector<f64, M>,
    u_end: &SVector<f64, M>,
    h: f64,
) -> Vector4<f64> {
    let k1 = system.derivative(x, u_start);
    let k2 = system.derivative(&(x + k1 * (h / 2.0)), u_mid);
    let k3 = system.derivative(&(x + k2 * (h / 2.0)), u_mid);
    let k4 = system.derivative(&(x + k3 * h), u_end);
    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

fn store<const M: usize>(
    system: &LinearSystem<M>,
    output: &mut DMatrix<f64>,
    column: usize,
    x: &Vector4<f64>,
    u: &SVector<f64, M>,
    t: f64,
) -> Result<()> {
    let y = system.output(x, u);
    if y.iter().any(|v| !v.is_finite()) {
        return Err(DynamicsError::NumericalInstability {
            axis: system.axis(),
            reason: format!("response diverged at t = {t} s"),
        });
    }
    output.set_column(column, &y);
    Ok(())
}
