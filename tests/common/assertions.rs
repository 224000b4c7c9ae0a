use approx::assert_relative_eq;
use citation_dynamics::systems::{Eigenmode, ModeKind};
use nalgebra::{DMatrix, Vector4};

/// Assert an augmented output has 8 rows and one column per sample
#[track_caller]
pub fn assert_output_shape(output: &DMatrix<f64>, samples: usize) {
    assert_eq!(output.nrows(), 8, "Output must stack 4 states on 4 rates");
    assert_eq!(output.ncols(), samples, "Output must match the time grid");
}

#[track_caller]
pub fn assert_all_finite(output: &DMatrix<f64>) {
    assert!(
        output.iter().all(|v| v.is_finite()),
        "Output contains non-finite values"
    );
}

/// Assert the first column of an output holds the trim state
#[track_caller]
pub fn assert_starts_at_trim(output: &DMatrix<f64>, trim: &Vector4<f64>) {
    for i in 0..4 {
        assert_relative_eq!(output[(i, 0)], trim[i], epsilon = 1e-12);
    }
}

/// Assert every oscillatory eigenvalue has its conjugate in the list
#[track_caller]
pub fn assert_conjugate_pairs(modes: &[Eigenmode]) {
    for mode in modes.iter().filter(|m| m.kind == ModeKind::Oscillatory) {
        assert!(
            modes
                .iter()
                .any(|other| (other.real - mode.real).abs() < 1e-9
                    && (other.imag + mode.imag).abs() < 1e-9),
            "Eigenvalue {} + {}i has no conjugate",
            mode.real,
            mode.imag
        );
    }
}
