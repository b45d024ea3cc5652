//! Core types for the qsplit decomposed-QAOA toolkit
//!
//! This crate provides the fundamental types shared by every other qsplit crate:
//! - [`QubitId`] and [`LocalQubitIndex`]: type-safe qubit addressing and the
//!   per-subgraph node-to-qubit table
//! - [`Gate`] / [`GateOp`]: the gate trait and gate applications
//! - [`Circuit`]: quantum circuit container with moment support
//! - [`graph`]: problem weights, graph elements and their induced subgraphs
//!
//! # Example
//! ```
//! use qsplit_core::{GraphElement, LocalQubitIndex, NodeId, Subgraph};
//!
//! let mut subgraph = Subgraph::new();
//! subgraph.add_edge(NodeId::new(7), NodeId::new(3));
//!
//! let index = LocalQubitIndex::from_subgraph(&subgraph);
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.qubit(NodeId::new(3)).unwrap().index(), 1);
//!
//! let element = GraphElement::edge(NodeId::new(7), NodeId::new(3));
//! assert!(element.is_edge());
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod graph;
pub mod qubit;

pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{Gate, GateOp, GateStructure};
pub use graph::{EdgeKey, ElementGraphs, GraphElement, NodeId, ProblemWeights, Subgraph};
pub use num_complex::Complex64;
pub use qubit::{LocalQubitIndex, QubitId};

/// Type alias for results in qsplit-core
pub type Result<T> = std::result::Result<T, QuantumError>;
