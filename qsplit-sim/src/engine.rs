//! Decomposed QAOA expectation engine
//!
//! The cost-Hamiltonian expectation is the sum over graph elements of
//! `weight(element) * ⟨Z⟩` (nodes) or `weight(element) * ⟨Z⊗Z⟩` (edges), each
//! evaluated on the small circuit of the element's own subgraph. Terms are
//! independent, so they can run one after another with multi-threaded
//! kernels, or side by side on a worker pool with single-threaded kernels.
//! Both strategies give the same total up to floating-point summation order.
//!
//! # Example
//!
//! ```
//! use qsplit_core::{ElementGraphs, GraphElement, NodeId, ProblemWeights, Subgraph};
//! use qsplit_sim::{EngineConfig, ExpectationEngine};
//!
//! let (a, b) = (NodeId::new(0), NodeId::new(1));
//! let weights = ProblemWeights::from_entries([(a, 1.0), (b, 1.0)], [((a, b), 1.0)]);
//!
//! let mut pair = Subgraph::new();
//! pair.add_edge(a, b);
//! let graphs: ElementGraphs = [
//!     (GraphElement::Node(a), pair.clone()),
//!     (GraphElement::Node(b), pair.clone()),
//!     (GraphElement::Edge(a, b), pair),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut engine = ExpectationEngine::new(weights, EngineConfig::serial()).unwrap();
//! engine.set_parameters(1, vec![0.0, 0.0]).unwrap();
//! engine.set_element_graphs(graphs);
//!
//! let total = engine.compute_expectation().unwrap();
//! assert!(total.abs() < 1e-12);
//! assert_eq!(engine.history().len(), 1);
//! ```

use qsplit_core::{Circuit, ElementGraphs, GraphElement, ProblemWeights};
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::EngineConfig;
use crate::error::{Result, SimulatorError};
use crate::history::{ExpectationHistory, PlotConfig};
use crate::pool::WorkerPool;
use crate::qaoa::QaoaParameters;
use crate::simulator::Simulator;
use crate::statistics::{ComputationStatistics, Strategy};
use crate::term::{TermContribution, TermEvaluator};

/// Computes decomposed QAOA expectations and records their history
///
/// Weights and the strategy flag are fixed at construction. Parameters and
/// the element-to-subgraph mapping are attached before computing and can be
/// replaced between computations. The worker pool is created on the first
/// parallel computation and lives until the engine is dropped.
#[derive(Debug)]
pub struct ExpectationEngine {
    weights: ProblemWeights,
    config: EngineConfig,
    parameters: Option<QaoaParameters>,
    element_graphs: Option<ElementGraphs>,
    history: ExpectationHistory,
    last_statistics: Option<ComputationStatistics>,
    serial_backend: Option<Simulator>,
    worker_pool: Option<WorkerPool>,
}

impl ExpectationEngine {
    /// Create an engine over fixed problem weights
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidConfig`] if the configuration is invalid.
    pub fn new(weights: ProblemWeights, config: EngineConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;
        Ok(Self {
            weights,
            config,
            parameters: None,
            element_graphs: None,
            history: ExpectationHistory::new(),
            last_statistics: None,
            serial_backend: None,
            worker_pool: None,
        })
    }

    /// Attach a flat `[gammas..., betas...]` parameter vector of length `2 * depth`
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::ParameterCount`] on a length mismatch; the
    /// previously attached parameters are kept in that case.
    pub fn set_parameters(&mut self, depth: usize, pargs: Vec<f64>) -> Result<()> {
        self.parameters = Some(QaoaParameters::from_flat(depth, pargs)?);
        Ok(())
    }

    /// Attach already validated parameters
    pub fn set_qaoa_parameters(&mut self, parameters: QaoaParameters) {
        self.parameters = Some(parameters);
    }

    /// Attach the element-to-subgraph mapping
    pub fn set_element_graphs(&mut self, graphs: ElementGraphs) {
        self.element_graphs = Some(graphs);
    }

    /// Problem weights
    pub fn weights(&self) -> &ProblemWeights {
        &self.weights
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Currently attached parameters
    pub fn parameters(&self) -> Option<&QaoaParameters> {
        self.parameters.as_ref()
    }

    /// Currently attached mapping
    pub fn element_graphs(&self) -> Option<&ElementGraphs> {
        self.element_graphs.as_ref()
    }

    /// Strategy selected at construction
    pub fn strategy(&self) -> Strategy {
        if self.config.is_parallel {
            Strategy::Parallel
        } else {
            Strategy::Serial
        }
    }

    /// Totals of every completed computation
    pub fn history(&self) -> &ExpectationHistory {
        &self.history
    }

    /// Statistics of the last computation, if collection is enabled
    pub fn last_statistics(&self) -> Option<&ComputationStatistics> {
        self.last_statistics.as_ref()
    }

    /// Compute the total expectation with the configured strategy
    ///
    /// Appends the total to the history.
    ///
    /// # Errors
    ///
    /// Any failing term fails the whole computation; nothing is recorded.
    pub fn compute_expectation(&mut self) -> Result<f64> {
        match self.strategy() {
            Strategy::Serial => self.compute_serial(),
            Strategy::Parallel => self.compute_parallel(),
        }
    }

    /// Evaluate terms one after another on the multi-threaded backend
    #[instrument(skip(self), fields(terms = tracing::field::Empty))]
    pub fn compute_serial(&mut self) -> Result<f64> {
        self.compute_with(Strategy::Serial)
    }

    /// Evaluate terms on the worker pool, one term per task
    #[instrument(skip(self), fields(terms = tracing::field::Empty))]
    pub fn compute_parallel(&mut self) -> Result<f64> {
        self.compute_with(Strategy::Parallel)
    }

    /// Evaluate every term with the configured strategy without touching the history
    pub fn term_contributions(&mut self) -> Result<Vec<TermContribution>> {
        let strategy = self.strategy();
        self.evaluate_terms(strategy)
    }

    /// The circuit that the term for `element` runs
    ///
    /// # Errors
    ///
    /// Returns an error if inputs are missing, the element has no subgraph,
    /// or a weight is missing.
    pub fn term_circuit(&self, element: &GraphElement) -> Result<Circuit> {
        let (parameters, graphs) = self.inputs()?;
        let subgraph = graphs
            .get(element)
            .ok_or(SimulatorError::UnknownElement(*element))?;
        let evaluator = TermEvaluator::new(&self.weights, parameters);
        Ok(evaluator.circuit(subgraph)?.0)
    }

    /// Render the history with the default [`PlotConfig`]
    pub fn visualize(&self) -> String {
        self.visualize_with(&PlotConfig::default())
    }

    /// Render the history with a custom [`PlotConfig`]
    pub fn visualize_with(&self, config: &PlotConfig) -> String {
        self.history.render(config)
    }

    fn compute_with(&mut self, strategy: Strategy) -> Result<f64> {
        let start = Instant::now();
        let terms = self.evaluate_terms(strategy)?;
        let total: f64 = terms.iter().map(|t| t.contribution).sum();
        let elapsed = start.elapsed();

        tracing::Span::current().record("terms", terms.len());
        info!(
            %strategy,
            terms = terms.len(),
            total,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "computed expectation"
        );

        self.history.record(total);
        if self.config.collect_statistics {
            self.last_statistics = Some(ComputationStatistics {
                strategy,
                num_terms: terms.len(),
                num_workers: match strategy {
                    Strategy::Serial => 1,
                    Strategy::Parallel => self
                        .worker_pool
                        .as_ref()
                        .map_or(1, WorkerPool::num_threads),
                },
                max_term_qubits: terms.iter().map(|t| t.num_qubits).max().unwrap_or(0),
                total,
                elapsed,
            });
        }
        Ok(total)
    }

    fn evaluate_terms(&mut self, strategy: Strategy) -> Result<Vec<TermContribution>> {
        match strategy {
            Strategy::Serial => {
                let backend = match self.serial_backend.take() {
                    Some(backend) => backend,
                    None => Simulator::new(self.config.serial_simulator_config())?,
                };
                let result = self.evaluate_serial(&backend);
                self.serial_backend = Some(backend);
                result
            },
            Strategy::Parallel => {
                let pool = match self.worker_pool.take() {
                    Some(pool) => pool,
                    None => WorkerPool::new(self.config.resolved_worker_threads())?,
                };
                let result = self.evaluate_parallel(&pool);
                self.worker_pool = Some(pool);
                result
            },
        }
    }

    fn evaluate_serial(&self, backend: &Simulator) -> Result<Vec<TermContribution>> {
        let (parameters, graphs) = self.inputs()?;
        let evaluator = self.evaluator(parameters);
        graphs
            .iter()
            .map(|(element, subgraph)| evaluator.evaluate(backend, element, subgraph))
            .collect()
    }

    fn evaluate_parallel(&self, pool: &WorkerPool) -> Result<Vec<TermContribution>> {
        let (parameters, graphs) = self.inputs()?;
        let evaluator = self.evaluator(parameters);
        let backend = Simulator::new(self.config.worker_simulator_config())?;
        pool.try_map(graphs.entries(), |(element, subgraph)| {
            evaluator.evaluate(&backend, element, subgraph)
        })
    }

    fn evaluator<'a>(&'a self, parameters: &'a QaoaParameters) -> TermEvaluator<'a> {
        TermEvaluator::new(&self.weights, parameters)
            .with_residue_tolerance(self.config.residue_tolerance)
    }

    fn inputs(&self) -> Result<(&QaoaParameters, &ElementGraphs)> {
        let parameters = self
            .parameters
            .as_ref()
            .ok_or(SimulatorError::MissingInput("QAOA parameters"))?;
        let graphs = self
            .element_graphs
            .as_ref()
            .ok_or(SimulatorError::MissingInput("element-to-subgraph mapping"))?;
        Ok((parameters, graphs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsplit_core::{NodeId, Subgraph};

    fn n(i: usize) -> NodeId {
        NodeId::new(i)
    }

    /// Path 0-1-2 with one-hop neighbourhood subgraphs
    fn path_engine(config: EngineConfig) -> ExpectationEngine {
        let weights = ProblemWeights::from_entries(
            [(n(0), 0.5), (n(1), -1.0), (n(2), 0.25)],
            [((n(0), n(1)), 1.0), ((n(1), n(2)), -0.75)],
        );

        let mut graphs = ElementGraphs::new();
        graphs.insert(
            GraphElement::Node(n(0)),
            Subgraph::from_parts([n(0)], [(n(0), n(1))]),
        );
        graphs.insert(
            GraphElement::Node(n(1)),
            Subgraph::from_parts([n(1)], [(n(1), n(0)), (n(1), n(2))]),
        );
        graphs.insert(
            GraphElement::Node(n(2)),
            Subgraph::from_parts([n(2)], [(n(2), n(1))]),
        );
        graphs.insert(
            GraphElement::Edge(n(0), n(1)),
            Subgraph::from_parts([n(0), n(1)], [(n(0), n(1)), (n(1), n(2))]),
        );
        graphs.insert(
            GraphElement::Edge(n(1), n(2)),
            Subgraph::from_parts([n(1), n(2)], [(n(0), n(1)), (n(1), n(2))]),
        );

        let mut engine = ExpectationEngine::new(weights, config).unwrap();
        engine.set_element_graphs(graphs);
        engine
    }

    #[test]
    fn test_missing_inputs() {
        let mut engine = ExpectationEngine::new(ProblemWeights::new(), EngineConfig::default()).unwrap();
        assert_eq!(
            engine.compute_expectation(),
            Err(SimulatorError::MissingInput("QAOA parameters"))
        );
        engine.set_parameters(0, vec![]).unwrap();
        assert_eq!(
            engine.compute_expectation(),
            Err(SimulatorError::MissingInput("element-to-subgraph mapping"))
        );
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = EngineConfig::default().with_residue_tolerance(-1.0);
        assert!(matches!(
            ExpectationEngine::new(ProblemWeights::new(), config),
            Err(SimulatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_set_parameters_rejects_bad_length() {
        let mut engine = path_engine(EngineConfig::default());
        engine.set_parameters(1, vec![0.1, 0.2]).unwrap();
        let err = engine.set_parameters(2, vec![0.1, 0.2, 0.3]).unwrap_err();
        assert_eq!(
            err,
            SimulatorError::ParameterCount {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(engine.parameters().unwrap().depth(), 1);
    }

    #[test]
    fn test_strategies_agree() {
        let params = vec![0.3, 1.1, 0.7, 0.2];

        let mut serial = path_engine(EngineConfig::serial().with_kernel_threads(2));
        serial.set_parameters(2, params.clone()).unwrap();
        let mut parallel = path_engine(EngineConfig::parallel().with_worker_threads(3));
        parallel.set_parameters(2, params).unwrap();

        let a = serial.compute_expectation().unwrap();
        let b = parallel.compute_expectation().unwrap();
        assert_relative_eq!(a, b, epsilon = 1e-9);

        assert_eq!(serial.last_statistics().unwrap().strategy, Strategy::Serial);
        let stats = parallel.last_statistics().unwrap();
        assert_eq!(stats.strategy, Strategy::Parallel);
        assert_eq!(stats.num_workers, 3);
        assert_eq!(stats.num_terms, 5);
        assert_eq!(stats.max_term_qubits, 3);
    }

    #[test]
    fn test_pool_is_reused() {
        let mut engine = path_engine(EngineConfig::parallel().with_worker_threads(2));
        engine.set_parameters(1, vec![0.4, 0.9]).unwrap();
        engine.compute_expectation().unwrap();
        let first = engine.worker_pool.clone().unwrap();
        engine.compute_expectation().unwrap();

        let second = engine.worker_pool.as_ref().unwrap();
        assert!(first.same_pool(second));
    }

    #[test]
    fn test_term_contributions_sum_to_total() {
        let mut engine = path_engine(EngineConfig::default());
        engine.set_parameters(1, vec![0.8, 0.35]).unwrap();

        let terms = engine.term_contributions().unwrap();
        assert_eq!(terms.len(), 5);
        assert!(engine.history().is_empty());

        let total: f64 = terms.iter().map(|t| t.contribution).sum();
        assert_relative_eq!(engine.compute_expectation().unwrap(), total, epsilon = 1e-12);
    }

    #[test]
    fn test_term_circuit() {
        let mut engine = path_engine(EngineConfig::default());
        engine.set_parameters(1, vec![0.8, 0.35]).unwrap();

        let circuit = engine.term_circuit(&GraphElement::Edge(n(1), n(0))).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.count_gates("CNOT"), 4);

        assert!(matches!(
            engine.term_circuit(&GraphElement::Node(n(7))),
            Err(SimulatorError::UnknownElement(GraphElement::Node(node))) if node == n(7)
        ));
    }

    #[test]
    fn test_statistics_can_be_disabled() {
        let mut engine = path_engine(EngineConfig::default().with_statistics(false));
        engine.set_parameters(0, vec![]).unwrap();
        engine.compute_expectation().unwrap();
        assert!(engine.last_statistics().is_none());
        assert_eq!(engine.history().len(), 1);
    }
}
