//! Separability gate, pairwise PPT test, and the final classification.

use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

use crate::analysis::entropy::{
    SpectrumCheck, SpectrumWarning, validate_spectrum, von_neumann_entropy,
};
use crate::config::AnalysisConfig;
use crate::core::errors::{AnalysisError, StateError};
use crate::core::{QuantumState, StateVector, utils};
use crate::families::StateFamily;

pub const NUM_QUBITS: usize = 4;

pub const QUBIT_LABELS: [char; NUM_QUBITS] = ['A', 'B', 'C', 'D'];

/// The six unordered qubit pairs, in reporting order.
pub const PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Terminal state of one analysis run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    FullySeparable,
    /// Every pair fails the PPT test.
    WType,
    /// Not fully separable and not every pair is entangled, zero included.
    GhzType {
        entangled_pairs: usize,
        total_pairs: usize,
    },
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::FullySeparable => "fully_separable",
            Classification::WType => "W-type",
            Classification::GhzType { .. } => "GHZ-type",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::FullySeparable => write!(f, "fully_separable"),
            Classification::WType => write!(f, "W-type (all pairs entangled)"),
            Classification::GhzType {
                entangled_pairs,
                total_pairs,
            } => write!(
                f,
                "GHZ-type ({}/{} pairs entangled)",
                entangled_pairs, total_pairs
            ),
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Decision rule applied after the pairwise stage.
pub fn classify(fully_separable: bool, entangled_pairs: usize, total_pairs: usize) -> Classification {
    if fully_separable {
        Classification::FullySeparable
    } else if entangled_pairs == total_pairs {
        Classification::WType
    } else {
        Classification::GhzType {
            entangled_pairs,
            total_pairs,
        }
    }
}

/// Findings for one qubit pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResult {
    pub entropy: f64,
    pub entangled: bool,
    /// Partial-transpose eigenvalues below zero.
    pub negative_eigenvalues: Vec<f64>,
    pub eigenvalues: Vec<f64>,
    pub pt_eigenvalues: Vec<f64>,
}

/// Result structure of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub state_vector: Vec<Complex64>,
    pub density_matrix_trace: f64,
    pub single_qubit_entropies: [f64; NUM_QUBITS],
    pub is_fully_separable: bool,
    /// Present iff the state is not fully separable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairwise_results: Option<BTreeMap<String, PairResult>>,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entangled_pair_count: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<SpectrumWarning>,
}

pub fn pair_name(i: usize, j: usize) -> String {
    format!("{}{}", QUBIT_LABELS[i], QUBIT_LABELS[j])
}

fn check_spectrum(
    subsystem: String,
    spectrum: &[f64],
    config: &AnalysisConfig,
) -> Option<SpectrumWarning> {
    match validate_spectrum(spectrum, config.spectrum_tolerance) {
        SpectrumCheck::Valid => None,
        check => {
            warn!(%subsystem, ?check, ?spectrum, "eigenvalue spectrum is not a probability distribution");
            Some(SpectrumWarning { subsystem, check })
        }
    }
}

struct PairOutcome {
    name: String,
    result: PairResult,
    warning: Option<SpectrumWarning>,
}

fn analyze_pair(
    rho: &QuantumState,
    (i, j): (usize, usize),
    config: &AnalysisConfig,
) -> Result<PairOutcome, StateError> {
    let name = pair_name(i, j);

    let sub_rho = rho.partial_trace(&[i, j])?;
    let eigenvalues = sub_rho.eigenvalues();
    let warning = check_spectrum(name.clone(), &eigenvalues, config);
    let entropy = von_neumann_entropy(&eigenvalues);

    let pt = sub_rho.transpose_second()?;
    let pt_eigenvalues = utils::hermitian_eigenvalues(&pt);

    // PPT: strictly below zero, no tolerance band
    let negative_eigenvalues: Vec<f64> = pt_eigenvalues
        .iter()
        .copied()
        .filter(|&ev| ev < 0.0)
        .collect();
    let entangled = !negative_eigenvalues.is_empty();

    debug!(pair = %name, entropy, entangled, ?pt_eigenvalues, "pair analyzed");

    Ok(PairOutcome {
        name,
        result: PairResult {
            entropy,
            entangled,
            negative_eigenvalues,
            eigenvalues,
            pt_eigenvalues,
        },
        warning,
    })
}

/// Runs the full decision procedure on a four-qubit pure state.
///
/// The pairwise stage only runs when the separability gate fails.
pub fn analyze(psi: &StateVector, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    if psi.num_qubits() != NUM_QUBITS {
        let dim = psi.amplitudes().len();
        return Err(StateError::DimensionMismatch {
            expected: 1 << NUM_QUBITS,
            got_rows: dim,
            got_cols: 1,
        }
        .into());
    }

    let rho = QuantumState::from_state_vector(psi)?;
    let density_matrix_trace = rho.trace().re;
    debug!(trace = density_matrix_trace, "density matrix built");

    let mut diagnostics = Vec::new();
    let mut single_qubit_entropies = [0.0; NUM_QUBITS];
    for (qubit, entropy) in single_qubit_entropies.iter_mut().enumerate() {
        let reduced = rho.partial_trace(&[qubit])?;
        let spectrum = reduced.eigenvalues();
        diagnostics.extend(check_spectrum(
            QUBIT_LABELS[qubit].to_string(),
            &spectrum,
            config,
        ));
        *entropy = von_neumann_entropy(&spectrum);
    }
    debug!(?single_qubit_entropies, "single-qubit stage done");

    let is_fully_separable = single_qubit_entropies
        .iter()
        .all(|s| s.abs() < config.separability_tolerance);

    if is_fully_separable {
        info!("state is fully separable, skipping pairwise stage");
        return Ok(AnalysisReport {
            state_vector: psi.amplitudes().to_vec(),
            density_matrix_trace,
            single_qubit_entropies,
            is_fully_separable,
            pairwise_results: None,
            classification: Classification::FullySeparable,
            entangled_pair_count: None,
            diagnostics,
        });
    }

    let outcomes: Vec<PairOutcome> = if config.parallel_pairs {
        PAIRS
            .par_iter()
            .map(|&pair| analyze_pair(&rho, pair, config))
            .collect::<Result<_, _>>()?
    } else {
        PAIRS
            .iter()
            .map(|&pair| analyze_pair(&rho, pair, config))
            .collect::<Result<_, _>>()?
    };

    let mut pairwise_results = BTreeMap::new();
    let mut entangled_count = 0;
    for outcome in outcomes {
        if outcome.result.entangled {
            entangled_count += 1;
        }
        diagnostics.extend(outcome.warning);
        pairwise_results.insert(outcome.name, outcome.result);
    }

    let classification = classify(false, entangled_count, PAIRS.len());
    info!(%classification, entangled_count, "state classified");

    Ok(AnalysisReport {
        state_vector: psi.amplitudes().to_vec(),
        density_matrix_trace,
        single_qubit_entropies,
        is_fully_separable,
        pairwise_results: Some(pairwise_results),
        classification,
        entangled_pair_count: Some(entangled_count),
        diagnostics,
    })
}

/// Validates the family parameters, builds the state, and analyzes it.
pub fn analyze_family(
    family: &StateFamily,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let psi = family.build()?;
    analyze(&psi, config)
}
