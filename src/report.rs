//! Human-readable rendering of an [`AnalysisReport`].

use std::fmt;

use crate::analysis::AnalysisReport;
use crate::analysis::classifier::NUM_QUBITS;
use crate::core::utils::basis_label;

fn fmt_values(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Amplitudes:")?;
        for (i, amp) in self.state_vector.iter().enumerate() {
            if amp.norm() > 0.0 {
                writeln!(f, "  |{}>: {:.6}{:+.6}i", basis_label(i, NUM_QUBITS), amp.re, amp.im)?;
            }
        }

        writeln!(f, "Density matrix trace: {:.6}", self.density_matrix_trace)?;
        writeln!(
            f,
            "Single-qubit entropies: {}",
            fmt_values(&self.single_qubit_entropies)
        )?;
        if self.is_fully_separable {
            writeln!(f, "State is fully separable.")?;
        } else {
            writeln!(f, "State is not fully separable (quantum correlations present).")?;
        }

        if let Some(pairs) = &self.pairwise_results {
            for (name, pair) in pairs {
                writeln!(f, "Subsystem {name}:")?;
                writeln!(f, "  eigenvalues: {}", fmt_values(&pair.eigenvalues))?;
                writeln!(f, "  entropy: {:.6}", pair.entropy)?;
                writeln!(f, "  partial transpose eigenvalues: {}", fmt_values(&pair.pt_eigenvalues))?;
                if pair.entangled {
                    writeln!(f, "  entangled (negative partial transpose eigenvalues)")?;
                } else {
                    writeln!(f, "  not entangled")?;
                }
            }
        }

        for warning in &self.diagnostics {
            writeln!(f, "Warning: invalid spectrum for {}: {}", warning.subsystem, warning.check)?;
        }

        write!(f, "Classification: {}", self.classification)
    }
}
