//! Pauli-string observables and their expectation values
//!
//! A Pauli string is a tensor product of single-qubit Paulis. Character `k`
//! of the textual form acts on qubit `k`, so `"ZIZ"` is `Z₀ ⊗ I₁ ⊗ Z₂`.
//! QAOA terms only ever need `Z` on one qubit or `Z ⊗ Z` on two, which are
//! diagonal and take the probability-weighted fast path.

use crate::dense_state::DenseState;
use crate::error::{Result, StateError};
use crate::kernels;
use num_complex::Complex64;
use std::fmt;
use std::str::FromStr;

/// Single-qubit Pauli operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity operator
    I,
    /// Pauli X (bit flip)
    X,
    /// Pauli Y
    Y,
    /// Pauli Z (phase flip)
    Z,
}

impl Pauli {
    /// Parse a Pauli operator from a character
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            _ => Err(StateError::InvalidPauli { symbol: c }),
        }
    }

    /// Convert to character representation
    pub fn to_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    /// Check if this Pauli is diagonal (I or Z)
    pub fn is_diagonal(self) -> bool {
        matches!(self, Pauli::I | Pauli::Z)
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Tensor product of Pauli operators, one per qubit
///
/// # Example
/// ```
/// use qsplit_state::{DenseState, PauliString};
///
/// let zz = PauliString::zz(3, 0, 2).unwrap();
/// assert_eq!(zz.to_string(), "ZIZ");
///
/// let state = DenseState::new(3).unwrap();
/// assert_eq!(zz.expectation_value(&state).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauliString {
    paulis: Vec<Pauli>,
}

impl PauliString {
    /// Create a Pauli string from a vector of Paulis
    pub fn from_paulis(paulis: Vec<Pauli>) -> Self {
        Self { paulis }
    }

    /// Identity on `num_qubits` qubits
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            paulis: vec![Pauli::I; num_qubits],
        }
    }

    /// `Z` on `qubit`, identity elsewhere
    ///
    /// # Errors
    /// Returns error if `qubit >= num_qubits`
    pub fn single_z(num_qubits: usize, qubit: usize) -> Result<Self> {
        Self::with_z_on(num_qubits, &[qubit])
    }

    /// `Z ⊗ Z` on qubits `a` and `b`, identity elsewhere
    ///
    /// # Errors
    /// Returns error if either qubit is out of range or `a == b`
    pub fn zz(num_qubits: usize, a: usize, b: usize) -> Result<Self> {
        if a == b {
            return Err(StateError::RepeatedQubit { index: a });
        }
        Self::with_z_on(num_qubits, &[a, b])
    }

    fn with_z_on(num_qubits: usize, qubits: &[usize]) -> Result<Self> {
        let mut string = Self::identity(num_qubits);
        for &q in qubits {
            let slot = string
                .paulis
                .get_mut(q)
                .ok_or(StateError::InvalidQubitIndex {
                    index: q,
                    num_qubits,
                })?;
            *slot = Pauli::Z;
        }
        Ok(string)
    }

    /// Get the number of qubits
    pub fn num_qubits(&self) -> usize {
        self.paulis.len()
    }

    /// Get the Pauli operator at a specific qubit
    pub fn get(&self, qubit: usize) -> Option<Pauli> {
        self.paulis.get(qubit).copied()
    }

    /// Number of non-identity factors
    pub fn weight(&self) -> usize {
        self.paulis.iter().filter(|&&p| p != Pauli::I).count()
    }

    /// Check if this Pauli string is diagonal (all I or Z)
    pub fn is_diagonal(&self) -> bool {
        self.paulis.iter().all(|p| p.is_diagonal())
    }

    /// Compute `⟨ψ|P|ψ⟩` as a complex number
    ///
    /// For a normalized state the imaginary part is zero up to rounding;
    /// callers that care can inspect it.
    ///
    /// # Errors
    /// Returns error if the state and string sizes differ
    pub fn expectation(&self, state: &DenseState) -> Result<Complex64> {
        if self.num_qubits() != state.num_qubits() {
            return Err(StateError::DimensionMismatch {
                expected: self.num_qubits(),
                actual: state.num_qubits(),
            });
        }

        let (x_mask, y_mask, z_mask) = self.masks();
        let parallel = state.is_parallel();
        if self.is_diagonal() {
            let value = kernels::z_string_expectation(state.amplitudes(), z_mask, parallel);
            Ok(Complex64::new(value, 0.0))
        } else {
            Ok(kernels::pauli_expectation(
                state.amplitudes(),
                x_mask | y_mask,
                y_mask,
                z_mask,
                parallel,
            ))
        }
    }

    /// Real part of [`PauliString::expectation`]
    pub fn expectation_value(&self, state: &DenseState) -> Result<f64> {
        Ok(self.expectation(state)?.re)
    }

    fn masks(&self) -> (usize, usize, usize) {
        self.paulis
            .iter()
            .enumerate()
            .fold((0, 0, 0), |(x, y, z), (q, p)| match p {
                Pauli::I => (x, y, z),
                Pauli::X => (x | 1 << q, y, z),
                Pauli::Y => (x, y | 1 << q, z),
                Pauli::Z => (x, y, z | 1 << q),
            })
    }
}

impl FromStr for PauliString {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self> {
        let paulis = s.chars().map(Pauli::from_char).collect::<Result<Vec<_>>>()?;
        Ok(Self { paulis })
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for pauli in &self.paulis {
            write!(f, "{}", pauli)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsplit_gates::matrices;

    fn plus_state(num_qubits: usize) -> DenseState {
        let mut state = DenseState::new(num_qubits).unwrap();
        for q in 0..num_qubits {
            state.apply_single_qubit_gate(&matrices::HADAMARD, q).unwrap();
        }
        state
    }

    #[test]
    fn test_pauli_parsing() {
        let p: PauliString = "xIzY".parse().unwrap();
        assert_eq!(p.to_string(), "XIZY");
        assert_eq!(p.weight(), 3);
        assert!(!p.is_diagonal());
        assert_eq!(
            "XQ".parse::<PauliString>(),
            Err(StateError::InvalidPauli { symbol: 'Q' })
        );
    }

    #[test]
    fn test_constructors() {
        let z = PauliString::single_z(3, 1).unwrap();
        assert_eq!(z.to_string(), "IZI");
        assert!(z.is_diagonal());

        assert!(PauliString::single_z(2, 2).is_err());
        assert!(PauliString::zz(2, 1, 1).is_err());
        assert_eq!(PauliString::zz(4, 3, 0).unwrap().to_string(), "ZIIZ");
    }

    #[test]
    fn test_z_on_basis_states() {
        let mut state = DenseState::new(2).unwrap();
        let z0 = PauliString::single_z(2, 0).unwrap();
        assert_eq!(z0.expectation_value(&state).unwrap(), 1.0);

        let x = [
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        ];
        state.apply_single_qubit_gate(&x, 0).unwrap();
        assert_eq!(z0.expectation_value(&state).unwrap(), -1.0);

        let z1 = PauliString::single_z(2, 1).unwrap();
        assert_eq!(z1.expectation_value(&state).unwrap(), 1.0);
        let zz = PauliString::zz(2, 0, 1).unwrap();
        assert_eq!(zz.expectation_value(&state).unwrap(), -1.0);
    }

    #[test]
    fn test_plus_state_expectations() {
        let state = plus_state(2);
        let xx: PauliString = "XX".parse().unwrap();
        let zz = PauliString::zz(2, 0, 1).unwrap();
        assert_relative_eq!(xx.expectation_value(&state).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(zz.expectation_value(&state).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rx_rotated_z() {
        // ⟨0|RX(θ)† Z RX(θ)|0⟩ = cos θ
        let theta = 0.83;
        let mut state = DenseState::new(1).unwrap();
        state
            .apply_single_qubit_gate(&matrices::rotation_x(theta), 0)
            .unwrap();
        let z = PauliString::single_z(1, 0).unwrap();
        let value = z.expectation(&state).unwrap();
        assert_relative_eq!(value.re, theta.cos(), epsilon = 1e-12);
        assert_eq!(value.im, 0.0);

        // ⟨Y⟩ = -sin θ for the same state
        let y: PauliString = "Y".parse().unwrap();
        assert_relative_eq!(y.expectation_value(&state).unwrap(), -theta.sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let state = DenseState::new(2).unwrap();
        let z = PauliString::single_z(3, 0).unwrap();
        assert!(matches!(
            z.expectation(&state),
            Err(StateError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }
}
