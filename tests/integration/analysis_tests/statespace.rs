use approx::assert_relative_eq;
use citation_dynamics::components::{AerodynamicState, Axis, FlightCondition};
use citation_dynamics::systems::simulation::{eigenmodes, oscillatory_pairs, simulate, Stability};
use citation_dynamics::systems::statespace::{state_matrices, StateSpaceBuilder};
use citation_dynamics::utils::DynamicsError;
use nalgebra::{Vector2, Vector4};

use crate::common::{
    assert_all_finite, assert_conjugate_pairs, citation_table, cruise_condition, degenerate_table,
};

#[test]
fn test_density_decreases_with_altitude() {
    let table = citation_table();
    let densities: Vec<f64> = (0..12)
        .map(|i| {
            let condition = FlightCondition {
                pressure_altitude: i as f64 * 1000.0,
                ..cruise_condition()
            };
            AerodynamicState::new(&table, condition).unwrap().density
        })
        .collect();

    assert!(densities.iter().all(|&rho| rho > 0.0));
    assert!(densities.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn test_assembly_is_bit_reproducible() {
    let table = citation_table();
    let first = AerodynamicState::new(&table, cruise_condition()).unwrap();
    let second = AerodynamicState::new(&table, cruise_condition()).unwrap();

    let builder_a = StateSpaceBuilder::new(&table, &first);
    let builder_b = StateSpaceBuilder::new(&table, &second);

    assert_eq!(
        builder_a.build_symmetric().unwrap(),
        builder_b.build_symmetric().unwrap()
    );
    assert_eq!(
        builder_a.build_asymmetric().unwrap(),
        builder_b.build_asymmetric().unwrap()
    );
}

#[test]
fn test_built_systems_are_augmented() {
    let table = citation_table();
    let state = AerodynamicState::new(&table, cruise_condition()).unwrap();
    let builder = StateSpaceBuilder::new(&table, &state);

    let symmetric = builder.build_symmetric().unwrap();
    let (a, b) = state_matrices(symmetric.c(), symmetric.d());
    assert_eq!(&a, symmetric.a());
    assert_eq!(&b, symmetric.b());
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(symmetric.c()[(i, j)], if i == j { 1.0 } else { 0.0 });
        }
        assert_eq!(symmetric.d()[(i, 0)], 0.0);
    }

    let asymmetric = builder.build_asymmetric().unwrap();
    let (a, b) = state_matrices(asymmetric.c(), asymmetric.d());
    assert_eq!(&a, asymmetric.a());
    assert_eq!(&b, asymmetric.b());
    assert_eq!(asymmetric.input_count(), 2);
}

#[test]
fn test_cruise_symmetric_modes_are_stable_pairs() {
    let table = citation_table();
    let state = AerodynamicState::new(&table, cruise_condition()).unwrap();
    let system = StateSpaceBuilder::new(&table, &state)
        .build_symmetric()
        .unwrap();

    let modes = eigenmodes(system.a(), Axis::Symmetric).unwrap();
    assert_eq!(modes.len(), 4);
    assert_eq!(oscillatory_pairs(&modes), 2);
    assert_conjugate_pairs(&modes);
    assert!(modes.iter().all(|m| m.stability == Stability::Stable));

    // phugoid first, short period last
    assert_relative_eq!(modes[0].real, -0.00772, epsilon = 1e-4);
    assert_relative_eq!(modes[0].imag, 0.13644, epsilon = 1e-4);
    assert_relative_eq!(modes[3].real, -1.5056, epsilon = 1e-3);
    assert_relative_eq!(modes[3].imag, -2.2010, epsilon = 1e-3);
}

#[test]
fn test_cruise_asymmetric_modes() {
    let table = citation_table();
    let state = AerodynamicState::new(&table, cruise_condition()).unwrap();
    let system = StateSpaceBuilder::new(&table, &state)
        .build_asymmetric()
        .unwrap();

    let modes = eigenmodes(system.a(), Axis::Asymmetric).unwrap();
    assert_eq!(modes.len(), 4);
    assert_eq!(oscillatory_pairs(&modes), 1);
    assert_conjugate_pairs(&modes);

    let unstable: Vec<_> = modes
        .iter()
        .filter(|m| m.stability == Stability::Unstable)
        .collect();
    assert_eq!(unstable.len(), 1);
    assert_relative_eq!(unstable[0].real, 0.01005, epsilon = 1e-4);
}

#[test]
fn test_degenerate_table_builds_finite_systems() {
    let table = degenerate_table();
    let state = AerodynamicState::new(&table, cruise_condition()).unwrap();
    let builder = StateSpaceBuilder::new(&table, &state);

    assert!(builder.build_symmetric().unwrap().is_finite());
    assert!(builder.build_asymmetric().unwrap().is_finite());
}

#[test]
fn test_zero_mass_never_yields_nan_matrices() {
    let table = degenerate_table();
    let zero = FlightCondition {
        mass: 0.0,
        ..cruise_condition()
    };
    assert!(matches!(
        AerodynamicState::new(&table, zero),
        Err(DynamicsError::DomainValidation(_))
    ));

    let vanishing = FlightCondition {
        mass: 1e-300,
        ..cruise_condition()
    };
    let state = AerodynamicState::new(&table, vanishing).unwrap();
    let result = StateSpaceBuilder::new(&table, &state).build_symmetric();
    assert!(matches!(result, Err(DynamicsError::SingularSystem { .. })));
}

#[test]
fn test_one_hertz_response_stays_bounded() {
    let table = citation_table();
    let state = AerodynamicState::new(&table, cruise_condition()).unwrap();
    let system = StateSpaceBuilder::new(&table, &state)
        .build_asymmetric()
        .unwrap();

    // aileron pulse between 2 and 4 s, sampled at 1 Hz
    let time: Vec<f64> = (0..31).map(|i| i as f64).collect();
    let inputs: Vec<Vector2<f64>> = time
        .iter()
        .map(|&t| {
            if (2.0..=4.0).contains(&t) {
                Vector2::new(0.02, 0.0)
            } else {
                Vector2::zeros()
            }
        })
        .collect();

    let coarse = simulate(&system, &time, &inputs, Vector4::zeros(), 1).unwrap();
    let fine = simulate(&system, &time, &inputs, Vector4::zeros(), 50).unwrap();

    assert_all_finite(&coarse);
    assert!(coarse.amax() < 1.0);
    let difference = (&coarse - &fine).amax();
    assert!(difference < 1e-4, "refinement changed the response by {difference}");
}
