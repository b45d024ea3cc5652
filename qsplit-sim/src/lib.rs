//! Graph-decomposed QAOA expectation engine
//!
//! The QAOA cost expectation of a weighted graph is a sum of per-node `Z` and
//! per-edge `Z⊗Z` terms. This crate evaluates each term on a small circuit
//! restricted to the subgraph that influences it, then sums the weighted
//! results. Only the subgraph's qubits are ever simulated, so graphs far
//! larger than a full state vector allows remain tractable.
//!
//! # Features
//!
//! - **Per-term circuits**: QAOA layers built from a subgraph and shared parameters
//! - **Two strategies**: serial terms with multi-threaded kernels, or a worker
//!   pool with single-threaded kernels
//! - **History**: every total is recorded and can be rendered as a terminal chart
//! - **Telemetry**: `tracing` spans and per-computation statistics
//!
//! # Example
//!
//! ```
//! use qsplit_core::{ElementGraphs, GraphElement, NodeId, ProblemWeights, Subgraph};
//! use qsplit_sim::{EngineConfig, ExpectationEngine};
//!
//! let nodes: Vec<NodeId> = (0..3).map(NodeId::new).collect();
//! let edges = [(nodes[0], nodes[1]), (nodes[1], nodes[2]), (nodes[2], nodes[0])];
//!
//! let weights = ProblemWeights::from_entries(
//!     nodes.iter().map(|&n| (n, 0.5)),
//!     edges.iter().map(|&e| (e, 1.0)),
//! );
//! let triangle = Subgraph::from_parts(nodes.clone(), edges);
//! let graphs: ElementGraphs = nodes
//!     .iter()
//!     .map(|&n| GraphElement::Node(n))
//!     .chain(edges.iter().map(|&(u, v)| GraphElement::Edge(u, v)))
//!     .map(|element| (element, triangle.clone()))
//!     .collect();
//!
//! let mut engine = ExpectationEngine::new(weights, EngineConfig::parallel()).unwrap();
//! engine.set_parameters(1, vec![0.4, 0.3]).unwrap();
//! engine.set_element_graphs(graphs);
//!
//! let energy = engine.compute_expectation().unwrap();
//! assert!(energy.is_finite());
//! println!("{}", engine.visualize());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod pool;
pub mod qaoa;
pub mod simulator;
pub mod statistics;
pub mod term;

pub use config::{EngineConfig, SimulatorConfig};
pub use engine::ExpectationEngine;
pub use error::{Result, SimulatorError};
pub use history::{ExpectationHistory, PlotConfig};
pub use pool::WorkerPool;
pub use qaoa::{random_initial_parameters, QaoaParameters, SubgraphCircuitBuilder};
pub use simulator::Simulator;
pub use statistics::{ComputationStatistics, Strategy};
pub use term::{observable_for, TermContribution, TermEvaluator};
