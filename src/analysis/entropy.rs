use serde::Serialize;
use std::fmt;

/// Default tolerance of [`validate_spectrum`].
pub const SPECTRUM_TOLERANCE: f64 = 1e-6;

/// Von Neumann entropy `S = -Σ λ log₂ λ` of an eigen-spectrum, in bits.
///
/// Eigenvalues `≤ 0` contribute nothing (`0 log 0 = 0`); this also absorbs
/// tiny negative rounding noise that would otherwise produce `NaN`.
pub fn von_neumann_entropy(spectrum: &[f64]) -> f64 {
    -spectrum
        .iter()
        .filter(|&&ev| ev > 0.0)
        .map(|&ev| ev * ev.log2())
        .sum::<f64>()
}

/// Outcome of checking that a spectrum is a probability distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpectrumCheck {
    Valid,
    NegativeEigenvalue { min: f64 },
    BadSum { sum: f64 },
}

impl SpectrumCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, SpectrumCheck::Valid)
    }
}

impl fmt::Display for SpectrumCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectrumCheck::Valid => write!(f, "valid"),
            SpectrumCheck::NegativeEigenvalue { min } => {
                write!(f, "negative eigenvalue {:.6e}", min)
            }
            SpectrumCheck::BadSum { sum } => write!(f, "eigenvalues sum to {:.6}", sum),
        }
    }
}

/// Checks `λᵢ ≥ -tolerance` for every eigenvalue and `|Σλᵢ - 1| ≤ tolerance`.
pub fn validate_spectrum(spectrum: &[f64], tolerance: f64) -> SpectrumCheck {
    let min = spectrum.iter().copied().fold(f64::INFINITY, f64::min);
    if min < -tolerance {
        return SpectrumCheck::NegativeEigenvalue { min };
    }

    let sum: f64 = spectrum.iter().sum();
    if (sum - 1.0).abs() > tolerance {
        return SpectrumCheck::BadSum { sum };
    }

    SpectrumCheck::Valid
}

/// An advisory spectrum failure attached to the subsystem it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpectrumWarning {
    pub subsystem: String,
    pub check: SpectrumCheck,
}
