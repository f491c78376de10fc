//! The two parametrized four-qubit state families.
//!
//! Both families are real linear combinations of the eight kets
//! `|0000⟩, |1111⟩, |0011⟩, |1100⟩, |0101⟩, |1010⟩, |0110⟩, |1001⟩`,
//! normalized after combination.

use serde_json::{Value, json};

use crate::core::errors::{AnalysisError, StateError};
use crate::core::{StateVector, basis};

/// Family selector together with the family's parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StateFamily {
    Gabcd { a: f64, b: f64, c: f64, d: f64 },
    Labc2 { a: f64, b: f64, c: f64 },
}

impl StateFamily {
    pub fn tag(&self) -> &'static str {
        match self {
            StateFamily::Gabcd { .. } => "G_abcd",
            StateFamily::Labc2 { .. } => "L_abc2",
        }
    }

    fn named_parameters(&self) -> Vec<(&'static str, f64)> {
        match *self {
            StateFamily::Gabcd { a, b, c, d } => vec![("a", a), ("b", b), ("c", c), ("d", d)],
            StateFamily::Labc2 { a, b, c } => vec![("a", a), ("b", b), ("c", c)],
        }
    }

    /// Rejects NaN and infinite parameters.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self
            .named_parameters()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
        {
            Some((name, value)) => Err(AnalysisError::InvalidParameter { name, value }),
            None => Ok(()),
        }
    }

    /// Validates the parameters and builds the normalized state.
    pub fn build(&self) -> Result<StateVector, AnalysisError> {
        self.validate()?;
        let psi = match *self {
            StateFamily::Gabcd { a, b, c, d } => build_g_abcd(a, b, c, d)?,
            StateFamily::Labc2 { a, b, c } => build_l_abc2(a, b, c)?,
        };
        Ok(psi)
    }

    /// Parameter bag recorded with an experiment.
    pub fn parameters(&self) -> Value {
        let mut params = serde_json::Map::new();
        for (name, value) in self.named_parameters() {
            params.insert(name.to_string(), json!(value));
        }
        params.insert("state_family".to_string(), json!(self.tag()));
        Value::Object(params)
    }

    pub fn experiment_name(&self) -> String {
        format!("4-qubit {} state analysis", self.tag())
    }

    pub fn experiment_description(&self) -> &'static str {
        "state construction and qubit entanglement analysis"
    }
}

/// `(a+d)/2 (|0000⟩+|1111⟩) + (a-d)/2 (|0011⟩+|1100⟩)
///  + (b+c)/2 (|0101⟩+|1010⟩) + (b-c)/2 (|0110⟩+|1001⟩)`, normalized.
///
/// Fails with [`StateError::DegenerateState`] when `a = b = c = d = 0`.
pub fn build_g_abcd(a: f64, b: f64, c: f64, d: f64) -> Result<StateVector, StateError> {
    let ad_plus = (a + d) / 2.0;
    let ad_minus = (a - d) / 2.0;
    let bc_plus = (b + c) / 2.0;
    let bc_minus = (b - c) / 2.0;

    StateVector::from_kets(&[
        (ad_plus, basis::ket("0000")?),
        (ad_plus, basis::ket("1111")?),
        (ad_minus, basis::ket("0011")?),
        (ad_minus, basis::ket("1100")?),
        (bc_plus, basis::ket("0101")?),
        (bc_plus, basis::ket("1010")?),
        (bc_minus, basis::ket("0110")?),
        (bc_minus, basis::ket("1001")?),
    ])
}

/// `(a+b)/2 (|0000⟩+|1111⟩) + (a-b)/2 (|0011⟩+|1100⟩)
///  + c (|0101⟩+|1010⟩) + |0110⟩`, normalized.
///
/// The unit weight on `|0110⟩` is part of the family, so the combination is
/// never the zero vector.
pub fn build_l_abc2(a: f64, b: f64, c: f64) -> Result<StateVector, StateError> {
    let ab_plus = (a + b) / 2.0;
    let ab_minus = (a - b) / 2.0;

    StateVector::from_kets(&[
        (ab_plus, basis::ket("0000")?),
        (ab_plus, basis::ket("1111")?),
        (ab_minus, basis::ket("0011")?),
        (ab_minus, basis::ket("1100")?),
        (c, basis::ket("0101")?),
        (c, basis::ket("1010")?),
        (1.0, basis::ket("0110")?),
    ])
}
