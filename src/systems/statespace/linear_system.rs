use nalgebra::{Matrix4, SMatrix, SVector, Vector4};

use crate::components::Axis;
use crate::utils::{OUTPUT_DIM, STATE_DIM};

/// Output matrix of an augmented system, states stacked on state rates.
pub type OutputMatrix = SMatrix<f64, OUTPUT_DIM, STATE_DIM>;

/// Continuous linear time invariant system ẋ = Ax + Bu, y = Cx + Du with
/// four states and `M` inputs.
///
/// The output is always the state vector stacked on its derivative, so C and
/// D are derived from A and B on construction and cannot be set separately.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem<const M: usize> {
    axis: Axis,
    a: Matrix4<f64>,
    b: SMatrix<f64, STATE_DIM, M>,
    c: OutputMatrix,
    d: SMatrix<f64, OUTPUT_DIM, M>,
}

/// Longitudinal system with the elevator as its only input.
pub type SymmetricSystem = LinearSystem<1>;
/// Lateral system driven by aileron and rudder.
pub type AsymmetricSystem = LinearSystem<2>;

impl<const M: usize> LinearSystem<M> {
    pub fn new(axis: Axis, a: Matrix4<f64>, b: SMatrix<f64, STATE_DIM, M>) -> Self {
        let (c, d) = output_matrices(&a, &b);
        Self { axis, a, b, c, d }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn a(&self) -> &Matrix4<f64> {
        &self.a
    }

    pub fn b(&self) -> &SMatrix<f64, STATE_DIM, M> {
        &self.b
    }

    pub fn c(&self) -> &OutputMatrix {
        &self.c
    }

    pub fn d(&self) -> &SMatrix<f64, OUTPUT_DIM, M> {
        &self.d
    }

    pub fn input_count(&self) -> usize {
        M
    }

    /// State derivative Ax + Bu.
    #[inline]
    pub fn derivative(&self, x: &Vector4<f64>, u: &SVector<f64, M>) -> Vector4<f64> {
        self.a * x + self.b * u
    }

    /// Augmented output Cx + Du.
    #[inline]
    pub fn output(&self, x: &Vector4<f64>, u: &SVector<f64, M>) -> SVector<f64, OUTPUT_DIM> {
        self.c * x + self.d * u
    }

    pub fn is_finite(&self) -> bool {
        self.a.iter().chain(self.b.iter()).all(|v| v.is_finite())
    }
}

/// Output matrices for y = [xᵀ, ẋᵀ]ᵀ: C = [I; A] and D = [0; B].
pub fn output_matrices<const M: usize>(
    a: &Matrix4<f64>,
    b: &SMatrix<f64, STATE_DIM, M>,
) -> (OutputMatrix, SMatrix<f64, OUTPUT_DIM, M>) {
    let c = OutputMatrix::from_fn(|i, j| {
        if i < STATE_DIM {
            if i == j {
                1.0
            } else {
                0.0
            }
        } else {
            a[(i - STATE_DIM, j)]
        }
    });
    let d = SMatrix::<f64, OUTPUT_DIM, M>::from_fn(|i, j| {
        if i < STATE_DIM {
            0.0
        } else {
            b[(i - STATE_DIM, j)]
        }
    });
    (c, d)
}

/// Recovers A and B from the lower halves of C and D.
pub fn state_matrices<const M: usize>(
    c: &OutputMatrix,
    d: &SMatrix<f64, OUTPUT_DIM, M>,
) -> (Matrix4<f64>, SMatrix<f64, STATE_DIM, M>) {
    let a = Matrix4::from_fn(|i, j| c[(i + STATE_DIM, j)]);
    let b = SMatrix::<f64, STATE_DIM, M>::from_fn(|i, j| d[(i + STATE_DIM, j)]);
    (a, b)
}
