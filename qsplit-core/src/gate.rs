//! Gate trait and gate applications

use crate::{QuantumError, QubitId, Result};
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Matrix structure of a gate, used by simulators to pick a kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStructure {
    /// General dense matrix
    Dense,
    /// Single-qubit diagonal matrix `diag(a, b)`
    Diagonal,
    /// Controlled-X; the first operand is the control
    ControlledX,
}

/// Trait for quantum gate operations
///
/// Gates are stateless and reusable across circuits.
///
/// # Example
/// ```
/// use qsplit_core::Gate;
///
/// #[derive(Debug)]
/// struct Hadamard;
///
/// impl Gate for Hadamard {
///     fn name(&self) -> &str { "H" }
///     fn num_qubits(&self) -> usize { 1 }
///     fn is_hermitian(&self) -> bool { true }
/// }
///
/// assert_eq!(Hadamard.description(), "1-qubit gate 'H'");
/// ```
pub trait Gate: Send + Sync + fmt::Debug {
    /// The name of the gate (e.g., "H", "CNOT", "RX")
    fn name(&self) -> &str;

    /// Number of qubits this gate acts on
    fn num_qubits(&self) -> usize;

    /// Whether this gate is hermitian (self-inverse)
    fn is_hermitian(&self) -> bool {
        false
    }

    /// Matrix structure, `Dense` unless the gate knows better
    fn structure(&self) -> GateStructure {
        GateStructure::Dense
    }

    /// Get a description of this gate
    fn description(&self) -> String {
        format!("{}-qubit gate '{}'", self.num_qubits(), self.name())
    }

    /// Unitary matrix as a flattened row-major vector of length `(2^n)^2`
    ///
    /// Returns `None` for gates without a matrix representation.
    fn matrix(&self) -> Option<Vec<Complex64>> {
        None
    }
}

/// A gate applied to specific qubits
#[derive(Clone)]
pub struct GateOp {
    gate: Arc<dyn Gate>,
    qubits: SmallVec<[QubitId; 2]>,
}

impl GateOp {
    /// Create a new gate operation
    ///
    /// # Errors
    /// Returns error if the qubit count doesn't match the gate or a qubit
    /// appears twice.
    pub fn new(gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<Self> {
        if qubits.len() != gate.num_qubits() {
            return Err(QuantumError::invalid_qubit_count(
                gate.name(),
                gate.num_qubits(),
                qubits.len(),
            ));
        }

        for (i, q) in qubits.iter().enumerate() {
            if qubits[i + 1..].contains(q) {
                return Err(QuantumError::DuplicateQubit(*q));
            }
        }

        Ok(Self {
            gate,
            qubits: SmallVec::from_slice(qubits),
        })
    }

    /// Get the gate
    #[inline]
    pub fn gate(&self) -> &Arc<dyn Gate> {
        &self.gate
    }

    /// Get the qubits this operation acts on
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Whether the operation touches `qubit`
    #[inline]
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }
}

impl fmt::Debug for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MockGate {
        name: String,
        num_qubits: usize,
    }

    impl Gate for MockGate {
        fn name(&self) -> &str {
            &self.name
        }

        fn num_qubits(&self) -> usize {
            self.num_qubits
        }
    }

    fn mock(name: &str, num_qubits: usize) -> Arc<dyn Gate> {
        Arc::new(MockGate {
            name: name.to_string(),
            num_qubits,
        })
    }

    #[test]
    fn test_gate_op_creation() {
        let op = GateOp::new(mock("H", 1), &[QubitId::new(0)]).unwrap();
        assert_eq!(op.num_qubits(), 1);
        assert!(op.acts_on(QubitId::new(0)));
        assert!(!op.acts_on(QubitId::new(1)));
        assert_eq!(op.gate().structure(), GateStructure::Dense);
    }

    #[test]
    fn test_gate_op_invalid_qubit_count() {
        let result = GateOp::new(mock("CNOT", 2), &[QubitId::new(0)]);
        assert!(matches!(
            result,
            Err(QuantumError::InvalidQubitCount {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_gate_op_duplicate_qubits() {
        let q0 = QubitId::new(0);
        let result = GateOp::new(mock("CNOT", 2), &[q0, q0]);
        assert!(matches!(result, Err(QuantumError::DuplicateQubit(q)) if q == q0));
    }

    #[test]
    fn test_gate_op_display() {
        let op = GateOp::new(mock("CNOT", 2), &[QubitId::new(0), QubitId::new(1)]).unwrap();
        assert_eq!(format!("{}", op), "CNOT(q0, q1)");
    }
}
