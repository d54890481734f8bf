//! The graph structure.
//!
//! [`Graph`] supports directed and undirected edges in the same graph,
//! optional parallel edges and attribute bags on nodes and edges. Edges are
//! added with [`Graph::add_edge`] and its forcing variants, attributes are
//! accessed with [`Graph::add_attr`] and friends and edges are looked up with
//! [`Graph::find_edge`] and [`Graph::find_edges`].
//!
//! # Sharing
//!
//! Adjacency records are reference counted and copied on write. Cloning a
//! graph is therefore the snapshot operation: the clone shares every record
//! with the original and the first edit of either copy duplicates only the
//! records it touches. No edit is ever observable through another clone.

mod adjacency;
mod attr;
pub mod build;
mod compact;
mod edit;
mod iter;
mod query;

use std::{hash::Hash, sync::Arc};

use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;

use crate::core::{
    edge::{EdgeDesc, EdgeKind, EdgeRef},
    error::InvalidDescription,
    id::{EdgeId, IdType, NodeId},
    marker::Direction,
    mode::Mode,
    value::{Attrs, Value, EMPTY_ATTRS},
};

pub(crate) use adjacency::Adjacency;

pub use attr::Target;
pub use build::{Adjacent, Init};
pub use compact::Compaction;
pub use iter::{EdgesIter, Neighbors, Nodes};
pub use query::EdgeQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeEntry {
    pub src: NodeId,
    pub dst: NodeId,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone)]
pub struct Graph<N> {
    pub(crate) mode: Mode,
    pub(crate) lookup: FxHashMap<N, NodeId>,
    pub(crate) nodes: Vec<Option<Arc<Adjacency<N>>>>,
    pub(crate) edges: Vec<Option<EdgeEntry>>,
    pub(crate) node_attrs: FxHashMap<NodeId, Attrs>,
    // Undirected edges keep their attributes under the canonical instance.
    pub(crate) edge_attrs: FxHashMap<EdgeId, Attrs>,
    pub(crate) node_count: usize,
    pub(crate) edge_count: usize,
}

impl<N> Graph<N> {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            lookup: FxHashMap::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            node_attrs: FxHashMap::default(),
            edge_attrs: FxHashMap::default(),
            node_count: 0,
            edge_count: 0,
        }
    }

    /// Undirected graph without parallel edges.
    pub fn simple() -> Self {
        Self::new(Mode::SIMPLE)
    }

    /// Directed graph without parallel edges.
    pub fn digraph() -> Self {
        Self::new(Mode::DIGRAPH)
    }

    /// Undirected graph with parallel edges.
    pub fn multigraph() -> Self {
        Self::new(Mode::MULTIGRAPH)
    }

    /// Directed graph with parallel edges.
    pub fn multidigraph() -> Self {
        Self::new(Mode::MULTIDIGRAPH)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn allows_parallel_edges(&self) -> bool {
        self.mode.parallel_edges
    }

    pub fn is_undirected_by_default(&self) -> bool {
        self.mode.undirected
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges, counting each undirected edge once.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    pub(crate) fn adjacency(&self, id: NodeId) -> Option<&Adjacency<N>> {
        self.nodes.get(id.as_usize())?.as_deref()
    }

    pub(crate) fn entry(&self, id: EdgeId) -> Option<&EdgeEntry> {
        self.edges.get(id.as_usize())?.as_ref()
    }

    pub(crate) fn node_value(&self, id: NodeId) -> Option<&N> {
        self.adjacency(id).map(|adj| &adj.node)
    }

    /// Key of the attribute bag of an edge instance.
    pub(crate) fn attr_key(&self, id: EdgeId) -> EdgeId {
        match self.entry(id).map(|entry| entry.kind) {
            Some(EdgeKind::Undirected {
                mirror,
                canonical: false,
            }) => mirror,
            _ => id,
        }
    }

    pub(crate) fn attrs_of(&self, id: EdgeId) -> &Attrs {
        self.edge_attrs
            .get(&self.attr_key(id))
            .unwrap_or(&EMPTY_ATTRS)
    }

    pub(crate) fn edge_ref(&self, id: EdgeId) -> Option<EdgeRef<'_, N>> {
        let entry = self.entry(id)?;

        Some(EdgeRef {
            id,
            src: self.node_value(entry.src)?,
            dst: self.node_value(entry.dst)?,
            kind: entry.kind,
            attrs: self.attrs_of(id),
        })
    }

    pub fn nodes(&self) -> Nodes<'_, N> {
        Nodes::new(self.nodes.iter())
    }

    /// All edges, each undirected edge represented by its canonical instance
    /// only.
    pub fn edges(&self) -> EdgesIter<'_, N> {
        EdgesIter::all(self)
    }

    pub fn edge(&self, id: EdgeId) -> Option<EdgeRef<'_, N>> {
        self.edge_ref(id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.entry(id).is_some()
    }

    /// The other instance of an undirected edge. `None` for directed or
    /// non-existent edges.
    pub fn mirror_edge(&self, id: EdgeId) -> Option<EdgeId> {
        self.entry(id)?.kind.mirror()
    }

    /// The canonical instance of an edge, which is the edge itself for
    /// directed edges.
    pub fn canonical_edge(&self, id: EdgeId) -> Option<EdgeId> {
        self.entry(id).map(|_| self.attr_key(id))
    }
}

impl<N: Eq + Hash> Graph<N> {
    pub(crate) fn node_id(&self, node: &N) -> Option<NodeId> {
        self.lookup.get(node).copied()
    }

    pub fn has_node(&self, node: &N) -> bool {
        self.lookup.contains_key(node)
    }

    /// Returns `true` if the pair resolves to an edge, see
    /// [`find_edge`](Graph::find_edge).
    pub fn has_edge(&self, src: &N, dst: &N) -> bool {
        match (self.node_id(src), self.node_id(dst)) {
            (Some(src), Some(dst)) => self
                .resolve_between(src, dst, None, self.mode.undirected)
                .is_some(),
            _ => false,
        }
    }

    /// Edge instances leaving the node, including the instances of undirected
    /// edges whose source is this node.
    pub fn out_edges(&self, node: &N) -> EdgesIter<'_, N> {
        self.edges_directed(node, Direction::Outgoing)
    }

    pub fn in_edges(&self, node: &N) -> EdgesIter<'_, N> {
        self.edges_directed(node, Direction::Incoming)
    }

    pub fn edges_directed(&self, node: &N, dir: Direction) -> EdgesIter<'_, N> {
        match self.node_id(node).and_then(|id| self.adjacency(id)) {
            Some(adj) => EdgesIter::around(self, adj, dir),
            None => EdgesIter::empty(self),
        }
    }

    pub fn successors(&self, node: &N) -> Neighbors<'_, N> {
        self.neighbors_directed(node, Direction::Outgoing)
    }

    pub fn predecessors(&self, node: &N) -> Neighbors<'_, N> {
        self.neighbors_directed(node, Direction::Incoming)
    }

    /// Distinct neighbors in the given direction, in the order they were first
    /// connected.
    pub fn neighbors_directed(&self, node: &N, dir: Direction) -> Neighbors<'_, N> {
        let neighbors = self
            .node_id(node)
            .and_then(|id| self.adjacency(id))
            .map(|adj| adj.neighbors(dir));

        Neighbors::new(self, neighbors)
    }

    /// `0` for absent nodes.
    pub fn out_degree(&self, node: &N) -> usize {
        self.degree_directed(node, Direction::Outgoing)
    }

    /// `0` for absent nodes.
    pub fn in_degree(&self, node: &N) -> usize {
        self.degree_directed(node, Direction::Incoming)
    }

    pub fn degree_directed(&self, node: &N, dir: Direction) -> usize {
        self.node_id(node)
            .and_then(|id| self.adjacency(id))
            .map(|adj| adj.degree[dir.index()])
            .unwrap_or_default()
    }

    /// Weight of the described edge, `1` if the edge has no `weight`
    /// attribute. `None` if the description does not resolve.
    pub fn weight(
        &self,
        edge: impl Into<EdgeDesc<N>>,
    ) -> Result<Option<Value>, InvalidDescription> {
        let id = self.find_edge(edge)?;
        Ok(id.and_then(|id| self.edge_ref(id)).map(|edge| edge.weight()))
    }
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

/// Graphs are equal if they have the same mode, the same nodes with the same
/// attributes, and the same edges between the same nodes with the same
/// directedness and attributes. Edge and node handles do not take part, so
/// graphs built by different sequences of edits can be equal.
impl<N: Eq + Hash> PartialEq for Graph<N> {
    fn eq(&self, other: &Self) -> bool {
        if self.mode != other.mode
            || self.node_count != other.node_count
            || self.edge_count != other.edge_count
        {
            return false;
        }

        self.nodes.iter().flatten().all(|adj| {
            let Some(other_id) = other.node_id(&adj.node) else {
                return false;
            };
            let Some(other_adj) = other.adjacency(other_id) else {
                return false;
            };

            let attrs = self
                .node_id(&adj.node)
                .and_then(|id| self.node_attrs.get(&id))
                .unwrap_or(&EMPTY_ATTRS);
            let other_attrs = other.node_attrs.get(&other_id).unwrap_or(&EMPTY_ATTRS);

            if attrs != other_attrs || adj.degree != other_adj.degree {
                return false;
            }

            let out = Direction::Outgoing.index();
            if adj.edges[out].len() != other_adj.edges[out].len() {
                return false;
            }

            adj.edges[out].iter().all(|(neighbor, edges)| {
                let other_neighbor = self
                    .node_value(*neighbor)
                    .and_then(|neighbor| other.node_id(neighbor));

                match other_neighbor {
                    Some(other_neighbor) => same_edges(
                        self,
                        edges,
                        other,
                        other_adj.bucket(other_neighbor, Direction::Outgoing),
                    ),
                    None => false,
                }
            })
        })
    }
}

// Multiset equality of edge instances by directedness and attributes.
fn same_edges<N>(lhs: &Graph<N>, lhs_ids: &[EdgeId], rhs: &Graph<N>, rhs_ids: &[EdgeId]) -> bool {
    if lhs_ids.len() != rhs_ids.len() {
        return false;
    }

    let is_directed = |graph: &Graph<N>, id: EdgeId| {
        graph
            .entry(id)
            .map(|entry| entry.kind.is_directed())
            .unwrap_or_default()
    };

    let mut used = FixedBitSet::with_capacity(rhs_ids.len());

    lhs_ids.iter().all(|lhs_id| {
        let directed = is_directed(lhs, *lhs_id);
        let attrs = lhs.attrs_of(*lhs_id);

        let matching = rhs_ids.iter().enumerate().position(|(i, rhs_id)| {
            !used.contains(i)
                && is_directed(rhs, *rhs_id) == directed
                && rhs.attrs_of(*rhs_id) == attrs
        });

        match matching {
            Some(i) => {
                used.insert(i);
                true
            }
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::check_consistency;

    fn require_send_sync<T: Send + Sync>(_: &T) {}

    #[test]
    fn presets() {
        assert_eq!(Graph::<u8>::simple().mode(), Mode::new(false, true));
        assert_eq!(Graph::<u8>::digraph().mode(), Mode::new(false, false));
        assert_eq!(Graph::<u8>::multigraph().mode(), Mode::new(true, true));
        assert_eq!(Graph::<u8>::multidigraph().mode(), Mode::new(true, false));
        assert_eq!(Graph::<u8>::default().mode(), Mode::SIMPLE);
    }

    #[test]
    fn readers_on_absent_node() {
        let graph = Graph::<&str>::digraph();

        assert!(!graph.has_node(&"a"));
        assert!(!graph.has_edge(&"a", &"b"));
        assert_eq!(graph.out_degree(&"a"), 0);
        assert_eq!(graph.in_degree(&"a"), 0);
        assert_eq!(graph.successors(&"a").count(), 0);
        assert_eq!(graph.in_edges(&"a").count(), 0);
        assert_eq!(graph.weight(("a", "b")), Ok(None));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut graph = Graph::<&str>::digraph();
        graph.add_edge(("a", "b", 1)).unwrap();

        let snapshot = graph.clone();
        graph.add_edge(("a", "b", 2)).unwrap();
        graph.add_edge(("b", "c")).unwrap();

        assert_eq!(snapshot.edge_count(), 1);
        assert_eq!(snapshot.weight(("a", "b")), Ok(Some(Value::Int(1))));
        assert_eq!(snapshot.out_degree(&"b"), 0);
        assert_eq!(graph.weight(("a", "b")), Ok(Some(Value::Int(2))));
        assert_eq!(graph.out_degree(&"b"), 1);

        check_consistency(&snapshot).unwrap();
        check_consistency(&graph).unwrap();
        require_send_sync(&graph);
    }

    #[test]
    fn equality_ignores_handles() {
        let mut lhs = Graph::<&str>::multidigraph();
        lhs.add_edge(("x", "y", 1)).unwrap();
        lhs.add_edge(("z", "y")).unwrap();
        lhs.add_edge(("x", "y", 2)).unwrap();

        let mut rhs = Graph::<&str>::multidigraph();
        rhs.add_node("z");
        rhs.add_edge(("x", "y", 2)).unwrap();
        rhs.add_edge(("x", "y", 1)).unwrap();
        rhs.add_edge(("z", "y")).unwrap();

        assert_eq!(lhs, rhs);

        rhs.add_edge(("x", "y", 2)).unwrap();
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn equality_distinguishes_directedness() {
        let mut lhs = Graph::<&str>::digraph();
        lhs.add_undirected_edge(("a", "b")).unwrap();

        let mut rhs = Graph::<&str>::digraph();
        rhs.add_directed_edge(("a", "b")).unwrap();
        rhs.add_directed_edge(("b", "a")).unwrap();

        assert_eq!(lhs.out_degree(&"a"), rhs.out_degree(&"a"));
        assert_ne!(lhs, rhs);
    }
}
