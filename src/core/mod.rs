pub mod basis;
pub mod errors;
mod state;
pub mod utils;

pub use basis::BasisKet;
pub use state::{INVARIANT_TOLERANCE, QuantumState, StateVector};
