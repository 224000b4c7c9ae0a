use citation_dynamics::components::{
    FlightCondition, StabilityDerivativeTable, SymmetricDerivatives,
};

/// Cruise trim point used throughout the tests.
pub fn cruise_condition() -> FlightCondition {
    FlightCondition::new(2000.0, 100.0, 0.05, 0.02, 6000.0)
}

pub fn citation_table() -> StabilityDerivativeTable {
    StabilityDerivativeTable::citation_550()
}

/// Citation geometry with every derivative zero except CXu = -1.
pub fn degenerate_table() -> StabilityDerivativeTable {
    let mut table = StabilityDerivativeTable::citation_550();
    table.name = "degenerate".to_string();
    table.symmetric = SymmetricDerivatives {
        c_x_u: -1.0,
        ..Default::default()
    };
    table.asymmetric = Default::default();
    table.fitted.c_l_alpha = 0.0;
    table.fitted.c_m_alpha = 0.0;
    table.fitted.c_m_deltae = 0.0;
    table
}
