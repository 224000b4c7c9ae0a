use serde::{Deserialize, Serialize};

/// Stability derivatives of the symmetric (longitudinal) equations of motion,
/// expressed in the stability reference frame.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetricDerivatives {
    /// X-force coefficient due to the dimensionless speed perturbation (û).
    pub c_x_u: f64,
    /// X-force coefficient due to angle of attack (α).
    pub c_x_alpha: f64,
    /// X-force coefficient due to the dimensionless angle of attack rate (α̇c/V).
    pub c_x_alphadot: f64,
    /// X-force coefficient due to the dimensionless pitch rate (qc/V).
    pub c_x_q: f64,
    /// X-force coefficient due to elevator deflection.
    pub c_x_deltae: f64,
    /// Z-force coefficient due to the dimensionless speed perturbation (û).
    pub c_z_u: f64,
    /// Z-force coefficient due to angle of attack (α).
    pub c_z_alpha: f64,
    /// Z-force coefficient due to the dimensionless angle of attack rate (α̇c/V).
    pub c_z_alphadot: f64,
    /// Z-force coefficient due to the dimensionless pitch rate (qc/V).
    pub c_z_q: f64,
    /// Z-force coefficient due to elevator deflection.
    pub c_z_deltae: f64,
    /// Pitch moment coefficient at zero angle of attack.
    pub c_m_0: f64,
    /// Pitch moment coefficient due to the dimensionless speed perturbation (û).
    pub c_m_u: f64,
    /// Pitch moment coefficient due to the dimensionless angle of attack rate.
    pub c_m_alphadot: f64,
    /// Pitch moment coefficient due to the dimensionless pitch rate.
    pub c_m_q: f64,
    /// Pitch moment coefficient due to thrust.
    pub c_m_tc: f64,
}

/// Stability derivatives of the asymmetric (lateral) equations of motion.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsymmetricDerivatives {
    /// Side-force coefficient due to sideslip angle (β).
    pub c_y_beta: f64,
    /// Side-force coefficient due to the dimensionless sideslip rate (β̇b/V).
    pub c_y_betadot: f64,
    /// Side-force coefficient due to the dimensionless roll rate (pb/2V).
    pub c_y_p: f64,
    /// Side-force coefficient due to the dimensionless yaw rate (rb/2V).
    pub c_y_r: f64,
    /// Side-force coefficient due to aileron deflection.
    pub c_y_deltaa: f64,
    /// Side-force coefficient due to rudder deflection.
    pub c_y_deltar: f64,
    /// Roll moment coefficient due to sideslip angle (β).
    pub c_l_beta: f64,
    /// Roll moment coefficient due to the dimensionless roll rate.
    pub c_l_p: f64,
    /// Roll moment coefficient due to the dimensionless yaw rate.
    pub c_l_r: f64,
    /// Roll moment coefficient due to aileron deflection.
    pub c_l_deltaa: f64,
    /// Roll moment coefficient due to rudder deflection.
    pub c_l_deltar: f64,
    /// Yaw moment coefficient due to sideslip angle (β).
    pub c_n_beta: f64,
    /// Yaw moment coefficient due to the dimensionless sideslip rate.
    pub c_n_betadot: f64,
    /// Yaw moment coefficient due to the dimensionless roll rate.
    pub c_n_p: f64,
    /// Yaw moment coefficient due to the dimensionless yaw rate.
    pub c_n_r: f64,
    /// Yaw moment coefficient due to aileron deflection.
    pub c_n_deltaa: f64,
    /// Yaw moment coefficient due to rudder deflection.
    pub c_n_deltar: f64,
}

/// Coefficients obtained by curve fitting the stationary flight test
/// measurements. They are produced outside this crate and consumed as constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedCoefficients {
    /// Zero-lift drag coefficient of the drag polar.
    pub c_d_0: f64,
    /// Lift curve slope (per radian).
    pub c_l_alpha: f64,
    /// Oswald efficiency factor.
    pub oswald_efficiency: f64,
    /// Static longitudinal stability, dCm/dα.
    pub c_m_alpha: f64,
    /// Elevator effectiveness, dCm/dδe.
    pub c_m_deltae: f64,
}

impl SymmetricDerivatives {
    pub fn citation_550() -> Self {
        Self {
            c_x_u: -0.09500,
            c_x_alpha: 0.47966,
            c_x_alphadot: 0.08330,
            c_x_q: -0.28170,
            c_x_deltae: -0.03728,
            c_z_u: -0.37616,
            c_z_alpha: -5.74340,
            c_z_alphadot: -0.00350,
            c_z_q: -5.66290,
            c_z_deltae: -0.69612,
            c_m_0: 0.0297,
            c_m_u: 0.06990,
            c_m_alphadot: 0.17800,
            c_m_q: -8.79415,
            c_m_tc: -0.0064,
        }
    }

    pub fn values(&self) -> [f64; 15] {
        [
            self.c_x_u,
            self.c_x_alpha,
            self.c_x_alphadot,
            self.c_x_q,
            self.c_x_deltae,
            self.c_z_u,
            self.c_z_alpha,
            self.c_z_alphadot,
            self.c_z_q,
            self.c_z_deltae,
            self.c_m_0,
            self.c_m_u,
            self.c_m_alphadot,
            self.c_m_q,
            self.c_m_tc,
        ]
    }
}

impl AsymmetricDerivatives {
    pub fn citation_550() -> Self {
        Self {
            c_y_beta: -0.7500,
            c_y_betadot: 0.0,
            c_y_p: -0.0304,
            c_y_r: 0.8495,
            c_y_deltaa: -0.0400,
            c_y_deltar: 0.2300,
            c_l_beta: -0.10260,
            c_l_p: -0.71085,
            c_l_r: 0.23760,
            c_l_deltaa: -0.23088,
            c_l_deltar: 0.03440,
            c_n_beta: 0.1348,
            c_n_betadot: 0.0,
            c_n_p: -0.0602,
            c_n_r: -0.2061,
            c_n_deltaa: -0.0120,
            c_n_deltar: -0.0939,
        }
    }

    pub fn values(&self) -> [f64; 17] {
        [
            self.c_y_beta,
            self.c_y_betadot,
            self.c_y_p,
            self.c_y_r,
            self.c_y_deltaa,
            self.c_y_deltar,
            self.c_l_beta,
            self.c_l_p,
            self.c_l_r,
            self.c_l_deltaa,
            self.c_l_deltar,
            self.c_n_beta,
            self.c_n_betadot,
            self.c_n_p,
            self.c_n_r,
            self.c_n_deltaa,
            self.c_n_deltar,
        ]
    }
}

impl FittedCoefficients {
    pub fn new(
        c_d_0: f64,
        c_l_alpha: f64,
        oswald_efficiency: f64,
        c_m_alpha: f64,
        c_m_deltae: f64,
    ) -> Self {
        Self {
            c_d_0,
            c_l_alpha,
            oswald_efficiency,
            c_m_alpha,
            c_m_deltae,
        }
    }

    /// Reference values used before flight test results are available.
    pub fn citation_550() -> Self {
        Self::new(0.04, 5.084, 0.8, -0.5626, -1.1642)
    }

    pub fn values(&self) -> [f64; 5] {
        [
            self.c_d_0,
            self.c_l_alpha,
            self.oswald_efficiency,
            self.c_m_alpha,
            self.c_m_deltae,
        ]
    }
}
