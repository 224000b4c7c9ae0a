use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::aircraft::config::{
    AircraftGeometry, AsymmetricDerivatives, AtmosphereConstants, FittedCoefficients,
    InertiaRadii, StabilityDerivativeTable, SymmetricDerivatives,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

fn default_name() -> String {
    "Custom".to_string()
}

fn default_speed_ratio() -> f64 {
    1.0
}

/// Flat file layout of a derivative table, keyed by the names the
/// coefficients carry in the flight dynamics literature.
#[allow(non_snake_case)]
#[derive(Debug, Serialize, Deserialize)]
pub struct RawDerivativeTable {
    /// Aircraft identification
    #[serde(default = "default_name")]
    pub name: String,

    /// Geometry
    pub S: f64,
    pub Sh: f64,
    pub lh: f64,
    pub c: f64,
    pub b: f64,
    pub bh: f64,
    #[serde(default)]
    pub ih: f64,
    #[serde(default = "default_speed_ratio")]
    pub Vh_V: f64,

    /// Radii of gyration
    pub KX2: f64,
    pub KY2: f64,
    pub KZ2: f64,
    pub KXZ: f64,

    /// Atmosphere, ISA when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rho0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub Temp0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub R: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>,

    /// Curve fit results
    pub CD0: f64,
    pub CLa: f64,
    pub e: f64,
    pub Cma: f64,
    pub Cmde: f64,

    /// Symmetric derivatives
    pub CXu: f64,
    pub CXa: f64,
    pub CXadot: f64,
    pub CXq: f64,
    pub CXde: f64,
    pub CZu: f64,
    pub CZa: f64,
    pub CZadot: f64,
    pub CZq: f64,
    pub CZde: f64,
    #[serde(default)]
    pub Cm0: f64,
    pub Cmu: f64,
    pub Cmadot: f64,
    pub Cmq: f64,
    #[serde(default)]
    pub CmTc: f64,

    /// Asymmetric derivatives
    pub CYb: f64,
    #[serde(default)]
    pub CYbdot: f64,
    pub CYp: f64,
    pub CYr: f64,
    pub CYda: f64,
    pub CYdr: f64,
    pub Clb: f64,
    pub Clp: f64,
    pub Clr: f64,
    pub Clda: f64,
    pub Cldr: f64,
    pub Cnb: f64,
    #[serde(default)]
    pub Cnbdot: f64,
    pub Cnp: f64,
    pub Cnr: f64,
    pub Cnda: f64,
    pub Cndr: f64,
}

impl StabilityDerivativeTable {
    pub fn from_raw(raw: &RawDerivativeTable) -> Self {
        let isa = AtmosphereConstants::isa();
        StabilityDerivativeTable {
            name: raw.name.clone(),
            symmetric: SymmetricDerivatives {
                c_x_u: raw.CXu,
                c_x_alpha: raw.CXa,
                c_x_alphadot: raw.CXadot,
                c_x_q: raw.CXq,
                c_x_deltae: raw.CXde,
                c_z_u: raw.CZu,
                c_z_alpha: raw.CZa,
                c_z_alphadot: raw.CZadot,
                c_z_q: raw.CZq,
                c_z_deltae: raw.CZde,
                c_m_0: raw.Cm0,
                c_m_u: raw.Cmu,
                c_m_alphadot: raw.Cmadot,
                c_m_q: raw.Cmq,
                c_m_tc: raw.CmTc,
            },
            asymmetric: AsymmetricDerivatives {
                c_y_beta: raw.CYb,
                c_y_betadot: raw.CYbdot,
                c_y_p: raw.CYp,
                c_y_r: raw.CYr,
                c_y_deltaa: raw.CYda,
                c_y_deltar: raw.CYdr,
                c_l_beta: raw.Clb,
                c_l_p: raw.Clp,
                c_l_r: raw.Clr,
                c_l_deltaa: raw.Clda,
                c_l_deltar: raw.Cldr,
                c_n_beta: raw.Cnb,
                c_n_betadot: raw.Cnbdot,
                c_n_p: raw.Cnp,
                c_n_r: raw.Cnr,
                c_n_deltaa: raw.Cnda,
                c_n_deltar: raw.Cndr,
            },
            fitted: FittedCoefficients::new(raw.CD0, raw.CLa, raw.e, raw.Cma, raw.Cmde),
            geometry: AircraftGeometry {
                wing_area: raw.S,
                wing_span: raw.b,
                mac: raw.c,
                tail_area: raw.Sh,
                tail_span: raw.bh,
                tail_arm: raw.lh,
                tail_incidence: raw.ih,
                tail_speed_ratio: raw.Vh_V,
            },
            inertia: InertiaRadii {
                kx2: raw.KX2,
                ky2: raw.KY2,
                kz2: raw.KZ2,
                kxz: raw.KXZ,
            },
            atmosphere: AtmosphereConstants {
                rho0: raw.rho0.unwrap_or(isa.rho0),
                p0: raw.p0.unwrap_or(isa.p0),
                temp0: raw.Temp0.unwrap_or(isa.temp0),
                lapse_rate: raw.lambda.unwrap_or(isa.lapse_rate),
                gas_constant: raw.R.unwrap_or(isa.gas_constant),
                gravity: raw.g.unwrap_or(isa.gravity),
            },
        }
    }
}

impl From<&StabilityDerivativeTable> for RawDerivativeTable {
    fn from(table: &StabilityDerivativeTable) -> Self {
        let sym = &table.symmetric;
        let asym = &table.asymmetric;
        let geometry = &table.geometry;
        let atmosphere = &table.atmosphere;
        RawDerivativeTable {
            name: table.name.clone(),
            S: geometry.wing_area,
            Sh: geometry.tail_area,
            lh: geometry.tail_arm,
            c: geometry.mac,
            b: geometry.wing_span,
            bh: geometry.tail_span,
            ih: geometry.tail_incidence,
            Vh_V: geometry.tail_speed_ratio,
            KX2: table.inertia.kx2,
            KY2: table.inertia.ky2,
            KZ2: table.inertia.kz2,
            KXZ: table.inertia.kxz,
            rho0: Some(atmosphere.rho0),
            p0: Some(atmosphere.p0),
            Temp0: Some(atmosphere.temp0),
            lambda: Some(atmosphere.lapse_rate),
            R: Some(atmosphere.gas_constant),
            g: Some(atmosphere.gravity),
            CD0: table.fitted.c_d_0,
            CLa: table.fitted.c_l_alpha,
            e: table.fitted.oswald_efficiency,
            Cma: table.fitted.c_m_alpha,
            Cmde: table.fitted.c_m_deltae,
            CXu: sym.c_x_u,
            CXa: sym.c_x_alpha,
            CXadot: sym.c_x_alphadot,
            CXq: sym.c_x_q,
            CXde: sym.c_x_deltae,
            CZu: sym.c_z_u,
            CZa: sym.c_z_alpha,
            CZadot: sym.c_z_alphadot,
            CZq: sym.c_z_q,
            CZde: sym.c_z_deltae,
            Cm0: sym.c_m_0,
            Cmu: sym.c_m_u,
            Cmadot: sym.c_m_alphadot,
            Cmq: sym.c_m_q,
            CmTc: sym.c_m_tc,
            CYb: asym.c_y_beta,
            CYbdot: asym.c_y_betadot,
            CYp: asym.c_y_p,
            CYr: asym.c_y_r,
            CYda: asym.c_y_deltaa,
            CYdr: asym.c_y_deltar,
            Clb: asym.c_l_beta,
            Clp: asym.c_l_p,
            Clr: asym.c_l_r,
            Clda: asym.c_l_deltaa,
            Cldr: asym.c_l_deltar,
            Cnb: asym.c_n_beta,
            Cnbdot: asym.c_n_betadot,
            Cnp: asym.c_n_p,
            Cnr: asym.c_n_r,
            Cnda: asym.c_n_deltaa,
            Cndr: asym.c_n_deltar,
        }
    }
}
