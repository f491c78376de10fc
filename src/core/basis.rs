use ndarray::{Array1, array};
use num_complex::Complex64;

use crate::core::errors::StateError;
use crate::core::utils;

/// One of the two computational basis states of a qubit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasisKet {
    Zero,
    One,
}

impl BasisKet {
    /// The ket as a 2-dimensional column vector.
    pub fn vector(self) -> Array1<Complex64> {
        match self {
            BasisKet::Zero => array![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            BasisKet::One => array![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        }
    }
}

/// Builds the product ket of `kets`, first entry as qubit 0.
pub fn product_ket(kets: &[BasisKet]) -> Result<Array1<Complex64>, StateError> {
    let factors: Vec<_> = kets.iter().map(|k| k.vector()).collect();
    utils::kron_all(&factors)
}

/// Parses a ket label such as `"0110"` into a product ket.
pub fn ket(label: &str) -> Result<Array1<Complex64>, StateError> {
    let kets = label
        .chars()
        .map(|ch| match ch {
            '0' => Ok(BasisKet::Zero),
            '1' => Ok(BasisKet::One),
            _ => Err(StateError::InvalidDimensions),
        })
        .collect::<Result<Vec<_>, _>>()?;
    product_ket(&kets)
}
