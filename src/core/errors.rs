use num_complex::Complex64;
use std::path::PathBuf;
use thiserror::Error;

use crate::experiment::ExperimentId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Trace is not unity: {0}")]
    InvalidTrace(Complex64),

    #[error("Vector is not normalized. Norm squared: {0}")]
    NotNormalized(f64),

    #[error("Invalid dimensions")]
    InvalidDimensions,

    #[error("Dimension mismatch: expected {expected}, got {got_rows}x{got_cols}")]
    DimensionMismatch {
        expected: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("Qubit index {index} out of bounds for {num_qubits} qubits")]
    IndexOutOfBounds { index: usize, num_qubits: usize },

    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),

    #[error("State vector has zero norm ({0}) and cannot be normalized")]
    DegenerateState(f64),

    #[error("Amplitude {0} is not finite")]
    NonFiniteAmplitude(usize),

    #[error("Matrix is not Hermitian")]
    NotHermitian,

    #[error("Partial trace changed the trace from {before} to {after}")]
    TraceNotPreserved { before: f64, after: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid parameter {name} = {value}: must be finite")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("State error: {0}")]
    State(#[from] StateError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No experiment with id {0}")]
    UnknownExperiment(ExperimentId),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
