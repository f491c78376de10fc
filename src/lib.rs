//! Entanglement analysis of four-qubit pure states.
//!
//! States come from two real-parametrized families (`G_abcd`, `L_abc2`) or
//! from any normalized 16-dimensional vector. The analysis reduces the density
//! matrix to every single qubit and every qubit pair, applies the entropy
//! separability gate and the PPT criterion, and classifies the state as fully
//! separable, W-type, or GHZ-type.

pub mod analysis;
mod core;
pub mod config;
pub mod experiment;
pub mod families;
pub mod logging;
mod report;

pub use crate::analysis::{AnalysisReport, Classification, analyze, analyze_family};
pub use crate::core::{BasisKet, QuantumState, StateVector, basis, errors, utils};
pub use crate::families::{StateFamily, build_g_abcd, build_l_abc2};
