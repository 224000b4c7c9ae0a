use nalgebra::{Matrix4, Matrix4x1, Matrix4x2, SMatrix};
use tracing::debug;

use crate::components::{AerodynamicState, Axis, StabilityDerivativeTable};
use crate::systems::statespace::{AsymmetricSystem, LinearSystem, SymmetricSystem};
use crate::utils::{DynamicsError, Result, SINGULARITY_TOLERANCE, STATE_DIM};

/// The equations of motion in implicit form, P ẋ = Q x + R u.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationMatrices<const M: usize> {
    /// Inertia matrix, already scaled by the reference time c/V or b/V.
    pub p: Matrix4<f64>,
    /// Aerodynamic stiffness and damping.
    pub q: Matrix4<f64>,
    /// Control effectiveness.
    pub r: SMatrix<f64, STATE_DIM, M>,
}

impl<const M: usize> EquationMatrices<M> {
    /// Solves for A = P⁻¹Q and B = P⁻¹R.
    ///
    /// # Errors
    /// `SingularSystem` when P has no inverse, is too ill-conditioned to
    /// trust, or when the solution contains non-finite entries.
    pub fn solve(&self, axis: Axis) -> Result<LinearSystem<M>> {
        let p_inv = self
            .p
            .try_inverse()
            .ok_or_else(|| DynamicsError::SingularSystem {
                axis,
                reason: "P matrix is not invertible".to_string(),
            })?;

        let rcond = 1.0 / (norm_1(&self.p) * norm_1(&p_inv));
        if !rcond.is_finite() || rcond < SINGULARITY_TOLERANCE {
            return Err(DynamicsError::SingularSystem {
                axis,
                reason: format!("P matrix is ill-conditioned (rcond = {rcond:e})"),
            });
        }

        let system = LinearSystem::new(axis, p_inv * self.q, p_inv * self.r);
        if !system.is_finite() {
            return Err(DynamicsError::SingularSystem {
                axis,
                reason: "A or B contains non-finite entries".to_string(),
            });
        }

        debug!(%axis, rcond, a = %system.a(), "Assembled state space system");
        Ok(system)
    }
}

/// Maximum absolute column sum.
fn norm_1(m: &Matrix4<f64>) -> f64 {
    (0..STATE_DIM)
        .map(|j| (0..STATE_DIM).map(|i| m[(i, j)].abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Assembles the symmetric and asymmetric systems about one trim point.
pub struct StateSpaceBuilder<'a> {
    table: &'a StabilityDerivativeTable,
    state: &'a AerodynamicState,
}

impl<'a> StateSpaceBuilder<'a> {
    pub fn new(table: &'a StabilityDerivativeTable, state: &'a AerodynamicState) -> Self {
        Self { table, state }
    }

    /// Implicit symmetric equations for x = [û, α, θ, qc/V] and u = [δe].
    pub fn symmetric_equations(&self) -> EquationMatrices<1> {
        let sym = &self.table.symmetric;
        let fitted = &self.table.fitted;
        let ky2 = self.table.inertia.ky2;
        let muc = self.state.muc;
        let c_v = self.state.chord_time(self.table);

        let p = c_v
            * Matrix4::new(
                -2.0 * muc, 0.0, 0.0, 0.0, //
                0.0, sym.c_z_alphadot - 2.0 * muc, 0.0, 0.0, //
                0.0, 0.0, -1.0, 0.0, //
                0.0, sym.c_m_alphadot, 0.0, -2.0 * muc * ky2,
            );

        let q = -Matrix4::new(
            sym.c_x_u, sym.c_x_alpha, self.state.c_z0, 0.0, //
            sym.c_z_u, sym.c_z_alpha, -self.state.c_x0, sym.c_z_q + 2.0 * muc, //
            0.0, 0.0, 0.0, 1.0, //
            sym.c_m_u, fitted.c_m_alpha, 0.0, sym.c_m_q,
        );

        let r = -Matrix4x1::new(sym.c_x_deltae, sym.c_z_deltae, 0.0, fitted.c_m_deltae);

        EquationMatrices { p, q, r }
    }

    /// Implicit asymmetric equations for x = [β, φ, pb/2V, rb/2V] and u = [δa, δr].
    pub fn asymmetric_equations(&self) -> EquationMatrices<2> {
        let asym = &self.table.asymmetric;
        let inertia = &self.table.inertia;
        let mub = self.state.mub;
        let b_v = self.state.span_time(self.table);

        let p = b_v
            * Matrix4::new(
                asym.c_y_betadot - 2.0 * mub, 0.0, 0.0, 0.0, //
                0.0, -0.5, 0.0, 0.0, //
                0.0, 0.0, -4.0 * mub * inertia.kx2, 4.0 * mub * inertia.kxz, //
                asym.c_n_betadot, 0.0, 4.0 * mub * inertia.kxz, -4.0 * mub * inertia.kz2,
            );

        let q = -Matrix4::new(
            asym.c_y_beta, self.state.c_l, asym.c_y_p, asym.c_y_r - 4.0 * mub, //
            0.0, 0.0, 1.0, 0.0, //
            asym.c_l_beta, 0.0, asym.c_l_p, asym.c_l_r, //
            asym.c_n_beta, 0.0, asym.c_n_p, asym.c_n_r,
        );

        let r = -Matrix4x2::new(
            asym.c_y_deltaa, asym.c_y_deltar, //
            0.0, 0.0, //
            asym.c_l_deltaa, asym.c_l_deltar, //
            asym.c_n_deltaa, asym.c_n_deltar,
        );

        EquationMatrices { p, q, r }
    }

    pub fn build_symmetric(&self) -> Result<SymmetricSystem> {
        self.symmetric_equations().solve(Axis::Symmetric)
    }

    pub fn build_asymmetric(&self) -> Result<AsymmetricSystem> {
        self.asymmetric_equations().solve(Axis::Asymmetric)
    }
}
