use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::core::errors::StateError;
use crate::core::utils::{self, find_duplicate, trace};

/// Tolerance for the runtime invariants of a reduction (trace, Hermiticity).
pub const INVARIANT_TOLERANCE: f64 = 1e-9;

/// A normalized pure state of an n-qubit register.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    amplitudes: Array1<Complex64>,
    num_qubits: usize,
}

impl StateVector {
    /// Normalizes `amplitudes` into a state vector.
    ///
    /// # Errors
    ///
    /// Returns a `StateError` if:
    /// - The length is not a power of 2 (or is 1).
    /// - The vector has zero norm.
    /// - An amplitude is NaN or infinite.
    pub fn normalized(amplitudes: Array1<Complex64>) -> Result<Self, StateError> {
        let dim = amplitudes.len();
        if dim < 2 || !dim.is_power_of_two() {
            return Err(StateError::InvalidDimensions);
        }

        let amplitudes = utils::normalize(&amplitudes)?;
        Ok(Self {
            amplitudes,
            num_qubits: dim.trailing_zeros() as usize,
        })
    }

    /// Builds `Σ cᵢ|ketᵢ⟩` and normalizes it. All kets must share one dimension.
    pub fn from_kets(terms: &[(f64, Array1<Complex64>)]) -> Result<Self, StateError> {
        let dim = terms
            .first()
            .map(|(_, ket)| ket.len())
            .ok_or(StateError::InvalidDimensions)?;

        let mut psi = Array1::<Complex64>::zeros(dim);
        for (coefficient, ket) in terms {
            if ket.len() != dim {
                return Err(StateError::DimensionMismatch {
                    expected: dim,
                    got_rows: ket.len(),
                    got_cols: 1,
                });
            }
            psi.scaled_add(Complex64::new(*coefficient, 0.0), ket);
        }

        Self::normalized(psi)
    }

    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn norm(&self) -> f64 {
        utils::norm(&self.amplitudes)
    }

    /// Basis label and amplitude of every non-zero amplitude, in index order.
    pub fn nonzero_amplitudes(&self) -> impl Iterator<Item = (String, Complex64)> + '_ {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, amp)| amp.norm() > 0.0)
            .map(|(i, &amp)| (utils::basis_label(i, self.num_qubits), amp))
    }

    /// The pure-state density matrix `|ψ⟩⟨ψ|`.
    pub fn density_matrix(&self) -> QuantumState {
        QuantumState {
            density_matrix: utils::outer_product(&self.amplitudes, &self.amplitudes),
            num_qubits: self.num_qubits,
        }
    }
}

/// A (possibly reduced) density matrix together with its qubit count.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantumState {
    pub density_matrix: Array2<Complex64>,
    pub num_qubits: usize,
}

impl QuantumState {
    /// Validates that the input vector is a valid quantum state.
    fn check_vector_state(vector: &Array1<Complex64>) -> Result<(), StateError> {
        let dim = vector.len();

        // Dimension must be a power of 2
        if !dim.is_power_of_two() {
            return Err(StateError::InvalidDimensions);
        }

        // Sum of squared amplitudes must be 1.
        let norm_sqr: f64 = vector.iter().map(|c| c.norm_sqr()).sum();

        if (norm_sqr - 1.0).abs() > 1e-12 {
            return Err(StateError::NotNormalized(norm_sqr));
        }

        Ok(())
    }

    /// Checks the validity of a density matrix
    fn check_density_matrix(matrix: &Array2<Complex64>) -> Result<(), StateError> {
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(StateError::DimensionMismatch {
                expected: rows,
                got_rows: rows,
                got_cols: cols,
            });
        }
        if !rows.is_power_of_two() {
            return Err(StateError::InvalidDimensions);
        }

        let tr = trace(matrix);
        if (tr - Complex64::new(1.0, 0.0)).norm() > 1e-12 {
            return Err(StateError::InvalidTrace(tr));
        }

        Ok(())
    }

    /// Checks if a given index is within the system QuantumState's range
    fn validate_qubit_index(&self, index: usize) -> Result<(), StateError> {
        if index >= self.num_qubits {
            return Err(StateError::IndexOutOfBounds {
                index,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    fn validate_qubits(&self, qubits: &[usize]) -> Result<(), StateError> {
        for &q in qubits {
            self.validate_qubit_index(q)?;
        }
        if let Some(dup) = find_duplicate(qubits) {
            return Err(StateError::DuplicateQubit(dup));
        }
        Ok(())
    }

    /// Creates a QuantumState from a raw amplitude vector.
    pub fn from_amplitudes(vector: &Array1<Complex64>) -> Result<Self, StateError> {
        Self::check_vector_state(vector)?;

        let dim = vector.len();
        Ok(Self {
            density_matrix: utils::outer_product(vector, vector),
            num_qubits: dim.trailing_zeros() as usize,
        })
    }

    /// Creates a QuantumState from a state vector: `ρ = |ψ⟩⟨ψ|`.
    pub fn from_state_vector(psi: &StateVector) -> Result<Self, StateError> {
        Self::from_amplitudes(psi.amplitudes())
    }

    /// Creates a QuantumState from a generic density matrix.
    pub fn from_density_matrix(matrix: Array2<Complex64>) -> Result<Self, StateError> {
        Self::check_density_matrix(&matrix)?;
        let (rows, _) = matrix.dim();
        // log_2 as rows is power of two
        let num_qubits = rows.trailing_zeros() as usize;

        Ok(Self {
            density_matrix: matrix,
            num_qubits,
        })
    }

    /// Checks if a QuantumState is valid.
    pub fn is_valid(&self) -> Result<(), StateError> {
        Self::check_density_matrix(&self.density_matrix)?;
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.density_matrix.nrows()
    }

    pub fn trace(&self) -> Complex64 {
        trace(&self.density_matrix)
    }

    /// Eigen-spectrum of the density matrix, ascending.
    pub fn eigenvalues(&self) -> Vec<f64> {
        utils::hermitian_eigenvalues(&self.density_matrix)
    }

    /// Reduced density matrix of the qubits in `keep`; all others are traced out.
    ///
    /// The kept qubits appear in ascending index order in the result, whatever
    /// order `keep` lists them in. The output is checked to be Hermitian and to
    /// carry the same trace as `self`.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if:
    /// - An index is out of bounds or repeated.
    /// - The reduction breaks trace preservation or Hermiticity.
    pub fn partial_trace(&self, keep: &[usize]) -> Result<QuantumState, StateError> {
        self.validate_qubits(keep)?;

        let mut kept = keep.to_vec();
        kept.sort_unstable();

        let n = self.num_qubits;
        let traced: Vec<usize> = (0..n).filter(|q| !kept.contains(q)).collect();
        let traced_mask = utils::qubit_mask(&traced, n);

        let reduced_dim = 1 << kept.len();
        let mut reduced = Array2::<Complex64>::zeros((reduced_dim, reduced_dim));

        // Only entries whose traced-out bits agree on both sides survive
        for ((row, col), &val) in self.density_matrix.indexed_iter() {
            if (row & traced_mask) != (col & traced_mask) {
                continue;
            }
            let r = utils::extract_qubit_bits(row, &kept, n);
            let c = utils::extract_qubit_bits(col, &kept, n);
            reduced[[r, c]] += val;
        }

        let before = self.trace().re;
        let after = trace(&reduced).re;
        if (before - after).abs() > INVARIANT_TOLERANCE {
            return Err(StateError::TraceNotPreserved { before, after });
        }
        if !utils::is_hermitian(&reduced, INVARIANT_TOLERANCE) {
            return Err(StateError::NotHermitian);
        }

        Ok(QuantumState {
            density_matrix: reduced,
            num_qubits: kept.len(),
        })
    }

    /// Transposes the row/column index pair of every qubit in `qubits`,
    /// leaving the other qubits' indices untouched.
    ///
    /// The result is generally not positive semi-definite, so it is returned as
    /// a bare matrix rather than a `QuantumState`.
    pub fn partial_transpose(&self, qubits: &[usize]) -> Result<Array2<Complex64>, StateError> {
        self.validate_qubits(qubits)?;

        let mask = utils::qubit_mask(qubits, self.num_qubits);
        let dim = self.dim();

        Ok(Array2::from_shape_fn((dim, dim), |(row, col)| {
            // Swap the masked bits between the row and column index
            let src_row = (row & !mask) | (col & mask);
            let src_col = (col & !mask) | (row & mask);
            self.density_matrix[[src_row, src_col]]
        }))
    }

    /// Partial transpose of a two-qubit state on its second qubit.
    pub fn transpose_second(&self) -> Result<Array2<Complex64>, StateError> {
        if self.num_qubits != 2 {
            return Err(StateError::DimensionMismatch {
                expected: 4,
                got_rows: self.dim(),
                got_cols: self.dim(),
            });
        }
        self.partial_transpose(&[1])
    }
}
