//! Error types for the simulator and expectation engine

use qsplit_core::{GraphElement, QuantumError};
use qsplit_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur while building, simulating or aggregating terms
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Circuit construction or graph lookup failed
    #[error(transparent)]
    Circuit(#[from] QuantumError),

    /// State vector operation failed
    #[error(transparent)]
    State(#[from] StateError),

    /// Flat parameter vector does not hold `2 * depth` angles
    #[error("Expected {expected} QAOA parameters (2 x depth), got {actual}")]
    ParameterCount { expected: usize, actual: usize },

    /// A required input was never attached to the engine
    #[error("{0} must be set before computing an expectation")]
    MissingInput(&'static str),

    /// Element has no subgraph in the attached mapping
    #[error("No subgraph registered for element {0}")]
    UnknownElement(GraphElement),

    /// Gate whose structure the simulator has no kernel for
    #[error("Gate '{gate}' has no kernel in this simulator")]
    UnsupportedGate { gate: String },

    /// Thread pool construction failed
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),

    /// History export failed
    #[error("Failed to serialize history: {0}")]
    Serialization(String),
}

impl SimulatorError {
    /// Whether the error comes from a weight-table lookup
    pub fn is_missing_weight(&self) -> bool {
        matches!(self, Self::Circuit(e) if e.is_missing_weight())
    }
}

impl From<rayon::ThreadPoolBuildError> for SimulatorError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err.to_string())
    }
}

impl From<serde_json::Error> for SimulatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsplit_core::NodeId;

    #[test]
    fn test_from_core_error() {
        let err: SimulatorError = QuantumError::MissingNodeWeight(NodeId::new(3)).into();
        assert!(err.is_missing_weight());
        assert_eq!(err.to_string(), "No weight registered for node n3");
    }

    #[test]
    fn test_parameter_count_message() {
        let err = SimulatorError::ParameterCount {
            expected: 4,
            actual: 3,
        };
        assert!(err.to_string().contains("Expected 4"));
        assert!(!err.is_missing_weight());
    }

    #[test]
    fn test_missing_input_message() {
        let err = SimulatorError::MissingInput("QAOA parameters");
        assert_eq!(
            err.to_string(),
            "QAOA parameters must be set before computing an expectation"
        );
    }
}
