//! Operator chain decomposition and URI building.

mod decomposer;
mod parameter;
mod projection;

#[cfg(test)]
mod parameter_tests;

pub use decomposer::Decomposer;
pub use parameter::RemoteDataParameter;
