//! Entanglement analysis of four-qubit pure states.
//!
//! This module contains:
//! - **entropy**: von Neumann entropy and the spectrum sanity check.
//! - **classifier**: the separability gate, the pairwise PPT test, and the
//!   resulting classification.

pub mod classifier;
pub mod entropy;

pub use classifier::{
    AnalysisReport, Classification, PAIRS, PairResult, analyze, analyze_family, classify,
};
pub use entropy::{SpectrumCheck, SpectrumWarning, validate_spectrum, von_neumann_entropy};
