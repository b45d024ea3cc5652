//! Error types for state vector operations

use thiserror::Error;

/// Errors that can occur during state vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Two-qubit operation given the same qubit twice
    #[error("Qubit {index} used as both control and target")]
    RepeatedQubit { index: usize },

    /// Invalid state dimension
    #[error("Invalid state dimension {dimension}, expected power of 2")]
    InvalidDimension { dimension: usize },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// State would not fit in memory
    #[error("{num_qubits} qubits exceeds the supported maximum of {max}")]
    TooManyQubits { num_qubits: usize, max: usize },

    /// Unrecognised Pauli symbol
    #[error("Invalid Pauli symbol '{symbol}'")]
    InvalidPauli { symbol: char },
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;
