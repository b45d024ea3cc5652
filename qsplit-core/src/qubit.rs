//! Qubit addressing and per-subgraph qubit tables

use crate::graph::{NodeId, Subgraph};
use crate::{QuantumError, Result};
use smallvec::SmallVec;
use std::fmt;

/// Type-safe identifier for a qubit
///
/// # Example
/// ```
/// use qsplit_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

/// Node-to-qubit table for a single subgraph
///
/// Position `i` of the table holds the node that lives on local qubit `i`.
/// The table is built from the subgraph's node insertion order, so the same
/// global node may sit on different qubits in different subgraphs. It is
/// meant to be built once per term and dropped with it.
///
/// # Example
/// ```
/// use qsplit_core::{LocalQubitIndex, NodeId, Subgraph};
///
/// let mut subgraph = Subgraph::new();
/// subgraph.add_node(NodeId::new(10));
/// subgraph.add_node(NodeId::new(2));
///
/// let index = LocalQubitIndex::from_subgraph(&subgraph);
/// assert_eq!(index.qubit(NodeId::new(10)).unwrap().index(), 0);
/// assert_eq!(index.qubit(NodeId::new(2)).unwrap().index(), 1);
/// assert!(index.qubit(NodeId::new(5)).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalQubitIndex {
    nodes: SmallVec<[NodeId; 8]>,
}

impl LocalQubitIndex {
    /// Build the table from a subgraph's nodes in insertion order
    pub fn from_subgraph(subgraph: &Subgraph) -> Self {
        Self {
            nodes: subgraph.nodes().iter().copied().collect(),
        }
    }

    /// Number of local qubits
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the table is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Local qubit hosting `node`
    ///
    /// # Errors
    /// Returns [`QuantumError::NodeNotInSubgraph`] if the node is not in the table.
    pub fn qubit(&self, node: NodeId) -> Result<QubitId> {
        self.nodes
            .iter()
            .position(|&n| n == node)
            .map(QubitId::new)
            .ok_or(QuantumError::NodeNotInSubgraph(node))
    }

    /// Node hosted on `qubit`, if any
    pub fn node(&self, qubit: QubitId) -> Option<NodeId> {
        self.nodes.get(qubit.index()).copied()
    }

    /// Iterate over `(node, qubit)` pairs in qubit order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, QubitId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, &node)| (node, QubitId::new(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_creation() {
        let q = QubitId::new(5);
        assert_eq!(q.index(), 5);
        assert_eq!(format!("{}", q), "q5");
    }

    #[test]
    fn test_qubit_conversions() {
        let q: QubitId = 5.into();
        let i: usize = q.into();
        assert_eq!(i, 5);
    }

    #[test]
    fn test_local_index_follows_insertion_order() {
        let mut subgraph = Subgraph::new();
        subgraph.add_edge(NodeId::new(9), NodeId::new(4));
        subgraph.add_node(NodeId::new(1));

        let index = LocalQubitIndex::from_subgraph(&subgraph);
        let pairs: Vec<_> = index.iter().map(|(n, q)| (n.value(), q.index())).collect();
        assert_eq!(pairs, vec![(9, 0), (4, 1), (1, 2)]);
        assert_eq!(index.node(QubitId::new(2)), Some(NodeId::new(1)));
        assert_eq!(index.node(QubitId::new(3)), None);
    }

    #[test]
    fn test_local_index_is_per_subgraph() {
        let mut a = Subgraph::new();
        a.add_edge(NodeId::new(0), NodeId::new(1));
        let mut b = Subgraph::new();
        b.add_edge(NodeId::new(1), NodeId::new(2));

        let ia = LocalQubitIndex::from_subgraph(&a);
        let ib = LocalQubitIndex::from_subgraph(&b);
        assert_eq!(ia.qubit(NodeId::new(1)).unwrap(), QubitId::new(1));
        assert_eq!(ib.qubit(NodeId::new(1)).unwrap(), QubitId::new(0));
    }

    #[test]
    fn test_unknown_node() {
        let index = LocalQubitIndex::default();
        assert!(index.is_empty());
        assert_eq!(
            index.qubit(NodeId::new(3)),
            Err(QuantumError::NodeNotInSubgraph(NodeId::new(3)))
        );
    }
}
