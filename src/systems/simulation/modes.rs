use std::cmp::Ordering;
use std::f64::consts::{LN_2, PI};

use nalgebra::{Complex, Matrix4, Schur};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::components::Axis;
use crate::utils::{
    DynamicsError, Result, EIGEN_MAX_ITERATIONS, EIGEN_TOLERANCE, NEUTRAL_STABILITY_BAND,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// Member of a complex conjugate pair.
    Oscillatory,
    /// Real eigenvalue, first order motion.
    Aperiodic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Stable,
    Neutral,
    Unstable,
}

/// One eigenvalue of a state matrix and the characteristics of its motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eigenmode {
    pub real: f64,
    pub imag: f64,
    pub kind: ModeKind,
    pub stability: Stability,
    /// |λ| (rad/s).
    pub natural_frequency: f64,
    /// -Re(λ)/|λ|.
    pub damping_ratio: f64,
    /// 2π/|Im(λ)| for oscillatory modes (s).
    pub period: Option<f64>,
    /// ln 2/|Re(λ)| for stable modes (s).
    pub time_to_half: Option<f64>,
    /// ln 2/|Re(λ)| for unstable modes (s).
    pub time_to_double: Option<f64>,
}

impl Eigenmode {
    pub fn from_eigenvalue(lambda: Complex<f64>) -> Self {
        let natural_frequency = modulus(&lambda);
        let kind = if lambda.im.abs() > EIGEN_TOLERANCE * natural_frequency.max(1.0) {
            ModeKind::Oscillatory
        } else {
            ModeKind::Aperiodic
        };
        let stability = if lambda.re.abs() <= NEUTRAL_STABILITY_BAND {
            Stability::Neutral
        } else if lambda.re < 0.0 {
            Stability::Stable
        } else {
            Stability::Unstable
        };

        let damping_ratio = if natural_frequency > 0.0 {
            -lambda.re / natural_frequency
        } else {
            0.0
        };
        let amplitude_time = LN_2 / lambda.re.abs();

        Self {
            real: lambda.re,
            imag: if kind == ModeKind::Aperiodic { 0.0 } else { lambda.im },
            kind,
            stability,
            natural_frequency,
            damping_ratio,
            period: (kind == ModeKind::Oscillatory).then(|| 2.0 * PI / lambda.im.abs()),
            time_to_half: (stability == Stability::Stable).then_some(amplitude_time),
            time_to_double: (stability == Stability::Unstable).then_some(amplitude_time),
        }
    }

    pub fn is_oscillatory(&self) -> bool {
        self.kind == ModeKind::Oscillatory
    }
}

/// The four eigenvalues of `a` from its real Schur form.
///
/// Eigenvalues are ordered by natural frequency, conjugate pairs adjacent with
/// the positive imaginary part first.
pub fn eigenvalues(a: &Matrix4<f64>, axis: Axis) -> Result<Vec<Complex<f64>>> {
    if a.iter().any(|v| !v.is_finite()) {
        return Err(DynamicsError::NumericalInstability {
            axis,
            reason: "state matrix contains non-finite entries".to_string(),
        });
    }

    let mut values: Vec<Complex<f64>> = Schur::try_new(*a, EIGEN_TOLERANCE, EIGEN_MAX_ITERATIONS)
        .map(|schur| schur.complex_eigenvalues())
        .ok_or_else(|| DynamicsError::NumericalInstability {
            axis,
            reason: "eigenvalue iteration did not converge".to_string(),
        })?
        .iter()
        .copied()
        .collect();

    values.sort_by(|l, r| {
        modulus(l)
            .partial_cmp(&modulus(r))
            .unwrap_or(Ordering::Equal)
            .then(r.im.partial_cmp(&l.im).unwrap_or(Ordering::Equal))
    });
    Ok(values)
}

fn modulus(lambda: &Complex<f64>) -> f64 {
    lambda.re.hypot(lambda.im)
}

/// Eigenvalues of `a` classified into modes, warning about any unstable one.
pub fn eigenmodes(a: &Matrix4<f64>, axis: Axis) -> Result<Vec<Eigenmode>> {
    let modes: Vec<Eigenmode> = eigenvalues(a, axis)?
        .into_iter()
        .map(Eigenmode::from_eigenvalue)
        .collect();

    for mode in modes.iter().filter(|m| m.stability == Stability::Unstable) {
        warn!(
            %axis,
            real = mode.real,
            imag = mode.imag,
            time_to_double = mode.time_to_double,
            "Unstable eigenmode"
        );
    }

    Ok(modes)
}

/// Number of complex conjugate pairs among `modes`.
pub fn oscillatory_pairs(modes: &[Eigenmode]) -> usize {
    modes.iter().filter(|m| m.is_oscillatory()).count() / 2
}
