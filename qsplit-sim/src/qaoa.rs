//! QAOA parameters and per-subgraph circuit construction
//!
//! A depth-`p` ansatz is driven by a flat vector of `2p` angles laid out as
//! `[γ₀, …, γ_{p-1}, β₀, …, β_{p-1}]`. Layer `l` uses `γ_l` for both cost
//! sub-layers and `β_l` for the mixer.
//!
//! # Example
//!
//! ```
//! use qsplit_core::{NodeId, ProblemWeights, Subgraph};
//! use qsplit_sim::qaoa::{QaoaParameters, SubgraphCircuitBuilder};
//!
//! let (a, b) = (NodeId::new(0), NodeId::new(1));
//! let weights = ProblemWeights::from_entries([(a, 1.0), (b, 0.5)], [((a, b), 2.0)]);
//! let params = QaoaParameters::from_flat(1, vec![0.4, 0.2]).unwrap();
//!
//! let mut subgraph = Subgraph::new();
//! subgraph.add_edge(a, b);
//!
//! let (circuit, index) = SubgraphCircuitBuilder::new(&weights, &params)
//!     .build(&subgraph)
//!     .unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(index.len(), 2);
//! assert_eq!(circuit.count_gates("CNOT"), 2);
//! ```

use qsplit_core::{
    Circuit, Gate, GateOp, LocalQubitIndex, ProblemWeights, QubitId, Subgraph,
};
use qsplit_gates::{CNot, Hadamard, RotationX, RotationZ};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::Arc;
use tracing::trace;

use crate::error::{Result, SimulatorError};

/// Variational angles of a depth-`p` QAOA ansatz
#[derive(Debug, Clone, PartialEq)]
pub struct QaoaParameters {
    depth: usize,
    values: Vec<f64>,
}

impl QaoaParameters {
    /// Wrap a flat `[gammas..., betas...]` vector
    ///
    /// `depth == 0` with an empty vector is accepted and yields the bare
    /// uniform superposition.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::ParameterCount`] unless `values.len() == 2 * depth`.
    pub fn from_flat(depth: usize, values: Vec<f64>) -> Result<Self> {
        let expected = 2 * depth;
        if values.len() != expected {
            return Err(SimulatorError::ParameterCount {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { depth, values })
    }

    /// Build from separate gamma and beta slices of equal length
    pub fn new(gammas: &[f64], betas: &[f64]) -> Result<Self> {
        if gammas.len() != betas.len() {
            return Err(SimulatorError::ParameterCount {
                expected: 2 * gammas.len(),
                actual: gammas.len() + betas.len(),
            });
        }
        let values = gammas.iter().chain(betas).copied().collect();
        Self::from_flat(gammas.len(), values)
    }

    /// Number of QAOA layers `p`
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Cost-phase angles
    pub fn gammas(&self) -> &[f64] {
        &self.values[..self.depth]
    }

    /// Mixer angles
    pub fn betas(&self) -> &[f64] {
        &self.values[self.depth..]
    }

    /// Flat `[gammas..., betas...]` view
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// `(γ_l, β_l)` for one layer
    pub fn layer(&self, layer: usize) -> Option<(f64, f64)> {
        Some((*self.gammas().get(layer)?, *self.betas().get(layer)?))
    }
}

/// Seeded starting point for an external optimizer
///
/// Gammas are drawn from `[0, π]` and betas from `[0, π/2]`.
pub fn random_initial_parameters(depth: usize, seed: u64) -> QaoaParameters {
    let mut rng = StdRng::seed_from_u64(seed);
    let gammas: Vec<f64> = (0..depth).map(|_| rng.gen_range(0.0..=PI)).collect();
    let betas: Vec<f64> = (0..depth).map(|_| rng.gen_range(0.0..=FRAC_PI_2)).collect();
    QaoaParameters {
        depth,
        values: gammas.into_iter().chain(betas).collect(),
    }
}

/// Builds the QAOA circuit for one subgraph
///
/// Qubits follow the subgraph's node insertion order. Each layer applies
/// `RZ(2γw)` to every node, the `CNOT · RZ(2γw) · CNOT` coupling for every
/// edge that is not a self-loop, and one `RX(2β)` moment over all nodes.
#[derive(Debug, Clone, Copy)]
pub struct SubgraphCircuitBuilder<'a> {
    weights: &'a ProblemWeights,
    params: &'a QaoaParameters,
}

impl<'a> SubgraphCircuitBuilder<'a> {
    /// Create a builder over fixed weights and parameters
    pub fn new(weights: &'a ProblemWeights, params: &'a QaoaParameters) -> Self {
        Self { weights, params }
    }

    /// Build the circuit and the local qubit table it was built against
    ///
    /// # Errors
    ///
    /// Returns an error if the subgraph has no nodes or a node or edge
    /// weight is missing.
    pub fn build(&self, subgraph: &Subgraph) -> Result<(Circuit, LocalQubitIndex)> {
        let index = LocalQubitIndex::from_subgraph(subgraph);
        let num_qubits = index.len();
        let mut circuit = Circuit::try_new(num_qubits)?;

        let hadamard: Arc<dyn Gate> = Arc::new(Hadamard);
        let cnot: Arc<dyn Gate> = Arc::new(CNot);

        circuit.add_moment(
            (0..num_qubits)
                .map(|q| GateOp::new(hadamard.clone(), &[QubitId::new(q)]))
                .collect::<qsplit_core::Result<Vec<_>>>()?,
        )?;

        for (layer, (&gamma, &beta)) in self
            .params
            .gammas()
            .iter()
            .zip(self.params.betas())
            .enumerate()
        {
            let mut cost = Vec::with_capacity(num_qubits);
            for (node, qubit) in index.iter() {
                let angle = 2.0 * gamma * self.weights.node_weight(node)?;
                cost.push(GateOp::new(Arc::new(RotationZ::new(angle)), &[qubit])?);
            }
            circuit.add_moment(cost)?;

            for &(u, v) in subgraph.edges() {
                let (qu, qv) = (index.qubit(u)?, index.qubit(v)?);
                if qu == qv {
                    trace!(layer, node = %u, "skipping self-loop coupling");
                    continue;
                }
                let angle = 2.0 * gamma * self.weights.edge_weight(u, v)?;
                circuit.add_gate(cnot.clone(), &[qu, qv])?;
                circuit.add_gate(Arc::new(RotationZ::new(angle)), &[qv])?;
                circuit.add_gate(cnot.clone(), &[qu, qv])?;
            }

            let mixer: Arc<dyn Gate> = Arc::new(RotationX::new(2.0 * beta));
            circuit.add_moment(
                (0..num_qubits)
                    .map(|q| GateOp::new(mixer.clone(), &[QubitId::new(q)]))
                    .collect::<qsplit_core::Result<Vec<_>>>()?,
            )?;
        }

        Ok((circuit, index))
    }
}
