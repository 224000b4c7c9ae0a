mod builder;
mod linear_system;

pub use builder::{EquationMatrices, StateSpaceBuilder};
pub use linear_system::{
    output_matrices, state_matrices, AsymmetricSystem, LinearSystem, OutputMatrix,
    SymmetricSystem,
};
