//! Error types for circuit construction and problem-graph lookups

use crate::{NodeId, QubitId};
use thiserror::Error;

/// Errors that can occur while building circuits or resolving graph data
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuantumError {
    /// Invalid qubit index used
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Gate applied to wrong number of qubits
    #[error("Gate '{gate}' requires {expected} qubits, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Circuit has no qubits
    #[error("Circuit must have at least one qubit")]
    EmptyCircuit,

    /// Duplicate qubit in a gate operation or moment
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),

    /// Node has no entry in the node weight table
    #[error("No weight registered for node {0}")]
    MissingNodeWeight(NodeId),

    /// Edge has no entry in the edge weight table
    #[error("No weight registered for edge ({0}, {1})")]
    MissingEdgeWeight(NodeId, NodeId),

    /// Node is not part of the subgraph a qubit index was built from
    #[error("Node {0} is not part of the subgraph")]
    NodeNotInSubgraph(NodeId),
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create an invalid qubit count error
    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    /// Whether the error comes from a weight-table lookup
    pub fn is_missing_weight(&self) -> bool {
        matches!(self, Self::MissingNodeWeight(_) | Self::MissingEdgeWeight(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_qubit_error() {
        let err = QuantumError::invalid_qubit(5, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("5"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn test_invalid_qubit_count_error() {
        let err = QuantumError::invalid_qubit_count("CNOT", 2, 1);
        let msg = err.to_string();
        assert!(msg.contains("CNOT"));
        assert!(msg.contains("2"));
    }

    #[test]
    fn test_missing_weight_errors() {
        let node = QuantumError::MissingNodeWeight(NodeId::new(4));
        assert!(node.is_missing_weight());
        assert!(node.to_string().contains("n4"));

        let edge = QuantumError::MissingEdgeWeight(NodeId::new(1), NodeId::new(2));
        assert!(edge.is_missing_weight());
        assert!(edge.to_string().contains("(n1, n2)"));

        assert!(!QuantumError::EmptyCircuit.is_missing_weight());
    }
}
