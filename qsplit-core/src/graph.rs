//! Problem-graph model: node/edge weights, graph elements and induced subgraphs
//!
//! The decomposition engine never sees the full problem graph. It receives
//! the weight tables of the cost Hamiltonian and an [`ElementGraphs`] table
//! that maps every graph element (a node or an edge) to the subgraph its
//! expectation term is evaluated on. Both are produced by an external
//! graph-weighting component; this module only models them.

use crate::{QuantumError, Result};
use ahash::{AHashMap, AHashSet};
use std::fmt;

/// Identifier of a node in the problem graph
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Create a node identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// The raw identifier
    #[inline]
    pub const fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

/// Unordered pair of nodes, used to key edge weights
///
/// `EdgeKey::new(a, b) == EdgeKey::new(b, a)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    /// Create a key for the edge between `u` and `v`
    pub fn new(u: NodeId, v: NodeId) -> Self {
        if u <= v {
            Self { low: u, high: v }
        } else {
            Self { low: v, high: u }
        }
    }

    /// Endpoints in ascending order
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    /// Whether both endpoints are the same node
    pub fn is_self_loop(&self) -> bool {
        self.low == self.high
    }
}

/// A graph element that contributes one term to the cost Hamiltonian
///
/// Node elements are measured with `Z`, edge elements with `Z⊗Z`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GraphElement {
    /// Single-node term
    Node(NodeId),
    /// Two-node term, endpoints in the order given by the caller
    Edge(NodeId, NodeId),
}

impl GraphElement {
    /// Node element
    pub fn node(id: impl Into<NodeId>) -> Self {
        Self::Node(id.into())
    }

    /// Edge element
    pub fn edge(u: impl Into<NodeId>, v: impl Into<NodeId>) -> Self {
        Self::Edge(u.into(), v.into())
    }

    /// Whether this is an edge element
    pub fn is_edge(&self) -> bool {
        matches!(self, Self::Edge(..))
    }

    /// Endpoint-order-independent form, used to deduplicate elements
    pub fn canonical(&self) -> Self {
        match *self {
            Self::Node(n) => Self::Node(n),
            Self::Edge(u, v) => {
                let (low, high) = EdgeKey::new(u, v).endpoints();
                Self::Edge(low, high)
            },
        }
    }

    /// Nodes the element's observable acts on
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        let (first, second) = match *self {
            Self::Node(n) => (n, None),
            Self::Edge(u, v) => (u, Some(v)),
        };
        std::iter::once(first).chain(second)
    }
}

impl fmt::Display for GraphElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(n) => write!(f, "{}", n),
            Self::Edge(u, v) => write!(f, "({}, {})", u, v),
        }
    }
}

/// A subgraph of the problem graph
///
/// Nodes keep their insertion order, which fixes the local qubit layout of
/// the circuit built for the subgraph. Edges are deduplicated as unordered
/// pairs; self-loops are kept so degenerate inputs round-trip unchanged.
#[derive(Clone, Debug, Default)]
pub struct Subgraph {
    nodes: Vec<NodeId>,
    edges: Vec<(NodeId, NodeId)>,
    node_set: AHashSet<NodeId>,
    edge_set: AHashSet<EdgeKey>,
}

impl Subgraph {
    /// Create an empty subgraph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a subgraph from nodes and edges
    ///
    /// Edge endpoints that are not listed in `nodes` are appended after them.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Self {
        let mut subgraph = Self::new();
        for node in nodes {
            subgraph.add_node(node);
        }
        for (u, v) in edges {
            subgraph.add_edge(u, v);
        }
        subgraph
    }

    /// Add a node; returns false if it was already present
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.node_set.insert(node) {
            self.nodes.push(node);
            true
        } else {
            false
        }
    }

    /// Add an edge, inserting missing endpoints; returns false for duplicates
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        self.add_node(u);
        self.add_node(v);
        if self.edge_set.insert(EdgeKey::new(u, v)) {
            self.edges.push((u, v));
            true
        } else {
            false
        }
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether `node` belongs to the subgraph
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.node_set.contains(&node)
    }

    /// Whether every node of `element` belongs to the subgraph
    pub fn contains_element(&self, element: &GraphElement) -> bool {
        element.nodes().all(|n| self.contains_node(n))
    }
}

/// Weight tables of the cost Hamiltonian
///
/// `H = Σ_v w_v Z_v + Σ_(u,v) w_uv Z_u Z_v`
#[derive(Clone, Debug, Default)]
pub struct ProblemWeights {
    nodes: AHashMap<NodeId, f64>,
    edges: AHashMap<EdgeKey, f64>,
}

impl ProblemWeights {
    /// Create empty weight tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Build weight tables from node and edge entries
    pub fn from_entries(
        nodes: impl IntoIterator<Item = (NodeId, f64)>,
        edges: impl IntoIterator<Item = ((NodeId, NodeId), f64)>,
    ) -> Self {
        let mut weights = Self::new();
        for (node, w) in nodes {
            weights.set_node_weight(node, w);
        }
        for ((u, v), w) in edges {
            weights.set_edge_weight(u, v, w);
        }
        weights
    }

    /// Set the weight of a node
    pub fn set_node_weight(&mut self, node: NodeId, weight: f64) {
        self.nodes.insert(node, weight);
    }

    /// Set the weight of the edge between `u` and `v`
    pub fn set_edge_weight(&mut self, u: NodeId, v: NodeId, weight: f64) {
        self.edges.insert(EdgeKey::new(u, v), weight);
    }

    /// Weight of a node
    ///
    /// # Errors
    /// Returns [`QuantumError::MissingNodeWeight`] if the node has no weight.
    pub fn node_weight(&self, node: NodeId) -> Result<f64> {
        self.nodes
            .get(&node)
            .copied()
            .ok_or(QuantumError::MissingNodeWeight(node))
    }

    /// Weight of the edge between `u` and `v`, in either order
    ///
    /// # Errors
    /// Returns [`QuantumError::MissingEdgeWeight`] if the edge has no weight.
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Result<f64> {
        self.edges
            .get(&EdgeKey::new(u, v))
            .copied()
            .ok_or(QuantumError::MissingEdgeWeight(u, v))
    }

    /// Coefficient of the Hamiltonian term for `element`
    pub fn element_weight(&self, element: &GraphElement) -> Result<f64> {
        match *element {
            GraphElement::Node(n) => self.node_weight(n),
            GraphElement::Edge(u, v) => self.edge_weight(u, v),
        }
    }

    /// Number of weighted nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of weighted edges
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Ordered mapping from graph elements to the subgraphs their terms run on
///
/// Inserting an element that is already present (edges compared as
/// unordered pairs) replaces its subgraph in place.
#[derive(Clone, Debug, Default)]
pub struct ElementGraphs {
    entries: Vec<(GraphElement, Subgraph)>,
    positions: AHashMap<GraphElement, usize>,
}

impl ElementGraphs {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the subgraph for `element`
    ///
    /// Returns the previous subgraph, if any.
    pub fn insert(&mut self, element: GraphElement, subgraph: Subgraph) -> Option<Subgraph> {
        match self.positions.get(&element.canonical()) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, subgraph)),
            None => {
                self.positions.insert(element.canonical(), self.entries.len());
                self.entries.push((element, subgraph));
                None
            },
        }
    }

    /// Subgraph registered for `element`
    pub fn get(&self, element: &GraphElement) -> Option<&Subgraph> {
        self.positions
            .get(&element.canonical())
            .map(|&pos| &self.entries[pos].1)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&GraphElement, &Subgraph)> {
        self.entries.iter().map(|(e, g)| (e, g))
    }

    /// Entries as a slice, in insertion order
    pub fn entries(&self) -> &[(GraphElement, Subgraph)] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Width of the widest subgraph
    pub fn max_subgraph_nodes(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, g)| g.num_nodes())
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<(GraphElement, Subgraph)> for ElementGraphs {
    fn from_iter<I: IntoIterator<Item = (GraphElement, Subgraph)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (element, subgraph) in iter {
            map.insert(element, subgraph);
        }
        map
    }
}
