//! Evaluation of a single Hamiltonian term on its subgraph circuit

use qsplit_core::{Circuit, GraphElement, LocalQubitIndex, ProblemWeights, Subgraph};
use qsplit_state::PauliString;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::Result;
use crate::qaoa::{QaoaParameters, SubgraphCircuitBuilder};
use crate::simulator::Simulator;

/// Result of evaluating one term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermContribution {
    /// Node or edge the term belongs to
    #[serde(serialize_with = "serialize_display")]
    pub element: GraphElement,
    /// Coefficient of the term in the cost Hamiltonian
    pub weight: f64,
    /// `Re⟨ψ|O|ψ⟩` for the term's observable
    pub expectation: f64,
    /// `weight * expectation`
    pub contribution: f64,
    /// Width of the subgraph circuit
    pub num_qubits: usize,
}

impl fmt::Display for TermContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.6} x {:.6} = {:.6} ({} qubits)",
            self.element, self.weight, self.expectation, self.contribution, self.num_qubits
        )
    }
}

fn serialize_display<S: serde::Serializer>(
    element: &GraphElement,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(element)
}

/// Observable for `element` on the subgraph's local qubits
///
/// A node measures `Z` on its qubit, an edge `Z ⊗ Z` on its two endpoints.
/// An edge element whose endpoints coincide measures the identity.
///
/// # Errors
///
/// Returns an error if an endpoint is not part of the subgraph.
pub fn observable_for(element: &GraphElement, index: &LocalQubitIndex) -> Result<PauliString> {
    let width = index.len();
    let observable = match *element {
        GraphElement::Node(node) => PauliString::single_z(width, index.qubit(node)?.index())?,
        GraphElement::Edge(a, b) => {
            let (qa, qb) = (index.qubit(a)?, index.qubit(b)?);
            if qa == qb {
                PauliString::identity(width)
            } else {
                PauliString::zz(width, qa.index(), qb.index())?
            }
        },
    };
    Ok(observable)
}

/// Evaluates `(element, subgraph)` pairs against fixed weights and parameters
///
/// Holds only shared references, so one evaluator can be used from every
/// worker at once.
#[derive(Debug, Clone, Copy)]
pub struct TermEvaluator<'a> {
    weights: &'a ProblemWeights,
    params: &'a QaoaParameters,
    residue_tolerance: f64,
}

impl<'a> TermEvaluator<'a> {
    /// Create an evaluator with the default residue tolerance of `1e-9`
    pub fn new(weights: &'a ProblemWeights, params: &'a QaoaParameters) -> Self {
        Self {
            weights,
            params,
            residue_tolerance: 1e-9,
        }
    }

    /// Set the largest imaginary residue accepted without a warning
    pub fn with_residue_tolerance(mut self, tolerance: f64) -> Self {
        self.residue_tolerance = tolerance;
        self
    }

    /// Circuit for one subgraph, with its local qubit table
    pub fn circuit(&self, subgraph: &Subgraph) -> Result<(Circuit, LocalQubitIndex)> {
        SubgraphCircuitBuilder::new(self.weights, self.params).build(subgraph)
    }

    /// Evaluate `weight(element) * Re⟨ψ|O_element|ψ⟩` on `simulator`
    ///
    /// # Errors
    ///
    /// Returns an error on a missing weight, an element outside its
    /// subgraph, or a simulation failure.
    pub fn evaluate(
        &self,
        simulator: &Simulator,
        element: &GraphElement,
        subgraph: &Subgraph,
    ) -> Result<TermContribution> {
        let weight = self.weights.element_weight(element)?;
        let (circuit, index) = self.circuit(subgraph)?;
        let observable = observable_for(element, &index)?;

        let value = simulator.expectation(&circuit, &observable)?;
        if value.im.abs() > self.residue_tolerance {
            warn!(
                element = %element,
                residue = value.im,
                tolerance = self.residue_tolerance,
                "term expectation has a non-negligible imaginary part"
            );
        }

        let contribution = weight * value.re;
        debug!(
            element = %element,
            qubits = index.len(),
            gates = circuit.len(),
            weight,
            expectation = value.re,
            contribution,
            "evaluated term"
        );

        Ok(TermContribution {
            element: *element,
            weight,
            expectation: value.re,
            contribution,
            num_qubits: index.len(),
        })
    }
}
