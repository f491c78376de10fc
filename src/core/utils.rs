//! Utility functions for dense complex linear algebra.
//!
//! This module contains helper functions for:
//! - Kronecker products of vectors and matrices.
//! - Normalization, trace, and outer products.
//! - Hermitian eigen-spectra through `nalgebra`.
//! - Bit manipulation between qubit indices and basis-state indices.
//!
//! Basis indices follow the Kronecker order of the factors: qubit 0 is the
//! most significant bit, so `|0110⟩` is index 6 in a four-qubit register.

use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::core::errors::StateError;

/// Computes the Kronecker (tensor) product of two vectors.
///
/// If `a` has length $m$ and `b` has length $p$ the result has length $mp$,
/// with `a`'s index varying slowest.
pub fn kron_vectors(a: &Array1<Complex64>, b: &Array1<Complex64>) -> Array1<Complex64> {
    a.iter()
        .flat_map(|&x| b.iter().map(move |&y| x * y))
        .collect()
}

/// Kronecker product of a sequence of vectors, left to right.
pub fn kron_all(factors: &[Array1<Complex64>]) -> Result<Array1<Complex64>, StateError> {
    let (first, rest) = factors
        .split_first()
        .ok_or(StateError::InvalidDimensions)?;
    Ok(rest
        .iter()
        .fold(first.clone(), |acc, factor| kron_vectors(&acc, factor)))
}

/// Computes the Kronecker (tensor) product of two matrices.
///
/// If `A` is an $m \times n$ matrix and `B` is a $p \times q$ matrix,
/// the result is an $mp \times nq$ matrix.
pub fn kronecker_product(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (m, n) = a.dim();
    let (p, q) = b.dim();

    Array2::from_shape_fn((m * p, n * q), |(r, c)| {
        a[[r / p, c / q]] * b[[r % p, c % q]]
    })
}

/// Euclidean norm of a complex vector.
pub fn norm(v: &Array1<Complex64>) -> f64 {
    v.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt()
}

/// Returns `v / ||v||`.
///
/// The vector is first divided by its largest component magnitude, so the result does not
/// depend on the overall scale of `v`: huge amplitudes cannot overflow the
/// norm and tiny ones are not mistaken for zero.
///
/// Fails with [`StateError::NonFiniteAmplitude`] if any entry is NaN or
/// infinite, and with [`StateError::DegenerateState`] for the zero vector.
pub fn normalize(v: &Array1<Complex64>) -> Result<Array1<Complex64>, StateError> {
    if let Some(index) = v.iter().position(|c| !c.is_finite()) {
        return Err(StateError::NonFiniteAmplitude(index));
    }

    let scale = v
        .iter()
        .flat_map(|c| [c.re.abs(), c.im.abs()])
        .fold(0.0, f64::max);
    if scale == 0.0 {
        return Err(StateError::DegenerateState(scale));
    }

    let scaled = v.mapv(|c| c / scale);
    let n = norm(&scaled);
    Ok(scaled.mapv(|c| c / n))
}

/// Computes the trace of a matrix (sum of diagonal elements).
pub fn trace(matrix: &Array2<Complex64>) -> Complex64 {
    matrix.diag().sum()
}

/// Computes the outer product of two vectors $|a\rangle\langle b|$.
pub fn outer_product(a: &Array1<Complex64>, b: &Array1<Complex64>) -> Array2<Complex64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j].conj())
}

/// Checks if a matrix is Hermitian
pub fn is_hermitian(mat: &Array2<Complex64>, tol: f64) -> bool {
    mat.iter()
        .zip(mat.t().iter())
        .all(|(a, b)| (a - b.conj()).norm() < tol)
}

/// Real eigen-spectrum of a Hermitian matrix, in ascending order.
///
/// The input is symmetrized as $(M + M^\dagger)/2$ before decomposition, so
/// matrices that are Hermitian only up to rounding noise are accepted.
pub fn hermitian_eigenvalues(mat: &Array2<Complex64>) -> Vec<f64> {
    let (rows, cols) = mat.dim();

    // Convert ndarray -> nalgebra, symmetrizing on the way
    let na_mat = DMatrix::from_fn(rows, cols, |r, c| (mat[[r, c]] + mat[[c, r]].conj()) * 0.5);

    let mut eigenvalues: Vec<f64> = na_mat.symmetric_eigenvalues().iter().copied().collect();
    eigenvalues.sort_by(|a, b| a.total_cmp(b));
    eigenvalues
}

/// Bit position of `qubit` inside a basis index of a `num_qubits` register.
pub fn qubit_shift(qubit: usize, num_qubits: usize) -> usize {
    num_qubits - 1 - qubit
}

/// Mask with a 1 at the bit position of every qubit in `qubits`.
pub fn qubit_mask(qubits: &[usize], num_qubits: usize) -> usize {
    qubits
        .iter()
        .fold(0, |mask, &q| mask | (1 << qubit_shift(q, num_qubits)))
}

/// Gathers the bits of `qubits` out of `index` into a compact index.
///
/// The first qubit of `qubits` becomes the most significant bit of the result,
/// so the compact index is a basis index of the subsystem in the given order.
pub fn extract_qubit_bits(index: usize, qubits: &[usize], num_qubits: usize) -> usize {
    qubits.iter().fold(0, |acc, &q| {
        (acc << 1) | ((index >> qubit_shift(q, num_qubits)) & 1)
    })
}

/// Formats a basis index as its ket label, e.g. `6` -> `"0110"` for 4 qubits.
pub fn basis_label(index: usize, num_qubits: usize) -> String {
    format!("{:0width$b}", index, width = num_qubits)
}

/// Find duplicate in a slice of usize
pub fn find_duplicate(indices: &[usize]) -> Option<usize> {
    let mut seen = std::collections::HashSet::new();
    indices.iter().find(|&&idx| !seen.insert(idx)).copied()
}
