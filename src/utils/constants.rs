pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const AIR_GAS_CONSTANT: f64 = 287.05287; // J/(kg·K)
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const ISA_LAPSE_RATE: f64 = -0.0065; // K/m

/// Number of states in either the symmetric or the asymmetric model.
pub const STATE_DIM: usize = 4;
/// Rows of the augmented output vector (states stacked on state rates).
pub const OUTPUT_DIM: usize = 2 * STATE_DIM;

/// Reciprocal condition number below which the P matrix is treated as singular.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Schur decomposition settings for the 4x4 eigenvalue problem.
pub const EIGEN_TOLERANCE: f64 = 1e-12;
pub const EIGEN_MAX_ITERATIONS: usize = 500;

/// Real parts with a smaller magnitude are reported as neutrally stable.
pub const NEUTRAL_STABILITY_BAND: f64 = 1e-9;

/// Largest ‖A‖∞·h a single RK4 sub-step may take. Keeps every eigenvalue
/// well inside the RK4 stability region.
pub const MAX_STEP_SCALE: f64 = 0.25;
/// Sub-steps per sample interval beyond which integration is refused.
pub const MAX_SUBSTEPS: usize = 100_000;
