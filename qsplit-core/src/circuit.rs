//! Quantum circuit representation

use crate::gate::Gate;
use crate::{GateOp, QuantumError, QubitId, Result};
use std::fmt;
use std::sync::Arc;

/// A quantum circuit
///
/// Contains a sequence of gate operations applied to qubits. Operations
/// added through [`Circuit::add_moment`] are guaranteed to act on pairwise
/// distinct qubits, so they can be executed in any order.
///
/// # Example
/// ```
/// use qsplit_core::Circuit;
///
/// let circuit = Circuit::new(3);
/// assert_eq!(circuit.num_qubits(), 3);
/// assert_eq!(circuit.len(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<GateOp>,
    num_moments: usize,
}

impl Circuit {
    /// Create a new quantum circuit with the specified number of qubits
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0; use [`Circuit::try_new`] for a fallible version.
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self::with_capacity(num_qubits, 0)
    }

    /// Create a circuit, returning an error for zero qubits
    pub fn try_new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        Ok(Self::with_capacity(num_qubits, 0))
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
            num_moments: 0,
        }
    }

    /// Get the number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of operations in the circuit
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of moments appended with [`Circuit::add_moment`]
    #[inline]
    pub fn num_moments(&self) -> usize {
        self.num_moments
    }

    /// Add a gate operation to the circuit
    ///
    /// # Errors
    /// Returns error if any qubit index is out of bounds or the operation is malformed
    pub fn add_gate(&mut self, gate: Arc<dyn Gate>, qubits: &[QubitId]) -> Result<()> {
        self.check_qubits(qubits)?;
        self.operations.push(GateOp::new(gate, qubits)?);
        Ok(())
    }

    /// Append a group of operations acting on pairwise distinct qubits
    ///
    /// Nothing is appended if validation fails.
    ///
    /// # Errors
    /// Returns [`QuantumError::DuplicateQubit`] if two operations share a qubit,
    /// or an invalid-qubit error for out-of-range operands.
    pub fn add_moment(&mut self, ops: Vec<GateOp>) -> Result<()> {
        let mut seen: Vec<QubitId> = Vec::with_capacity(ops.len());
        for op in &ops {
            self.check_qubits(op.qubits())?;
            for &q in op.qubits() {
                if seen.contains(&q) {
                    return Err(QuantumError::DuplicateQubit(q));
                }
                seen.push(q);
            }
        }

        self.operations.extend(ops);
        self.num_moments += 1;
        Ok(())
    }

    /// Get an iterator over the operations
    pub fn operations(&self) -> impl Iterator<Item = &GateOp> {
        self.operations.iter()
    }

    /// Get a specific operation by index
    pub fn get_operation(&self, index: usize) -> Option<&GateOp> {
        self.operations.get(index)
    }

    /// Count the operations whose gate has the given name
    pub fn count_gates(&self, name: &str) -> usize {
        self.operations
            .iter()
            .filter(|op| op.gate().name() == name)
            .count()
    }

    /// Depth of the circuit under as-soon-as-possible scheduling
    ///
    /// Every operation is placed one layer after the latest operation that
    /// touched any of its qubits.
    pub fn depth(&self) -> usize {
        let mut frontier = vec![0usize; self.num_qubits];
        for op in &self.operations {
            let layer = op
                .qubits()
                .iter()
                .map(|q| frontier[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in op.qubits() {
                frontier[q.index()] = layer;
            }
        }
        frontier.into_iter().max().unwrap_or(0)
    }

    fn check_qubits(&self, qubits: &[QubitId]) -> Result<()> {
        match qubits.iter().find(|q| q.index() >= self.num_qubits) {
            Some(q) => Err(QuantumError::invalid_qubit(q.index(), self.num_qubits)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} operations, depth {})",
            self.num_qubits,
            self.operations.len(),
            self.depth()
        )?;
        for op in &self.operations {
            writeln!(f, "  {}", op)?;
        }
        Ok(())
    }
}
