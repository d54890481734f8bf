use std::hash::Hash;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::graph::Graph;

/// Induced subgraph on the nodes accepted by a filter.
///
/// Kept nodes retain their attributes and every edge between two kept nodes
/// is kept with its directedness and attributes.
///
/// ```
/// use weft::{adapt::Subgraph, graph::Graph};
///
/// let graph = Graph::digraph()
///     .build([("a", "b"), ("b", "c"), ("c", "a")])
///     .unwrap();
///
/// let subgraph = Subgraph::new(graph).filter_node(|node| *node != "c").apply();
///
/// assert_eq!(subgraph.node_count(), 2);
/// assert_eq!(subgraph.edge_count(), 1);
/// ```
pub struct Subgraph<N> {
    graph: Graph<N>,
    #[allow(clippy::type_complexity)]
    filter_node: Box<dyn Fn(&N) -> bool>,
}

impl<N: Clone + Eq + Hash> Subgraph<N> {
    pub fn new(graph: Graph<N>) -> Self {
        Self {
            graph,
            filter_node: Box::new(|_| true),
        }
    }

    pub fn into_inner(self) -> Graph<N> {
        self.graph
    }

    pub fn filter_node<F>(self, predicate: F) -> Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        Self {
            filter_node: Box::new(predicate),
            ..self
        }
    }

    pub fn apply(self) -> Graph<N> {
        let Self { mut graph, filter_node } = self;

        graph.retain_nodes(|node| filter_node(node));

        debug!(
            "Induced subgraph with {} nodes and {} edges",
            graph.node_count, graph.edge_count
        );
        graph
    }
}

impl<N: Clone + Eq + Hash> Graph<N> {
    /// The subgraph induced by the given nodes. Nodes that are not in the
    /// graph are ignored.
    pub fn subgraph(&self, nodes: impl IntoIterator<Item = N>) -> Graph<N> {
        let mut graph = self.clone();
        let keep = nodes.into_iter().collect::<FxHashSet<_>>();

        graph.retain_nodes(|node| keep.contains(node));

        debug!(
            "Induced subgraph with {} nodes and {} edges",
            graph.node_count, graph.edge_count
        );
        graph
    }
}
