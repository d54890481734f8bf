use std::sync::Arc;

use tracing::debug;

use crate::graph::Graph;

/// Reverses the direction of every edge.
///
/// Edge handles and attributes are preserved, only the endpoints of every
/// edge instance are swapped. Undirected edges are symmetric by
/// construction, so transposing swaps the roles of their forward and mirror
/// instances without changing the edge as seen by readers.
///
/// ```
/// use weft::{adapt::Transpose, graph::Graph};
///
/// let graph = Graph::digraph().build([("a", "b"), ("b", "c")]).unwrap();
/// let transposed = Transpose::new(graph.clone()).apply();
///
/// assert!(transposed.has_edge(&"b", &"a"));
/// assert!(!transposed.has_edge(&"a", &"b"));
/// assert_eq!(Transpose::new(transposed).apply(), graph);
/// ```
#[derive(Debug, Clone)]
pub struct Transpose<N> {
    graph: Graph<N>,
}

impl<N: Clone> Transpose<N> {
    pub fn new(graph: Graph<N>) -> Self {
        Self { graph }
    }

    pub fn into_inner(self) -> Graph<N> {
        self.graph
    }

    pub fn apply(self) -> Graph<N> {
        let mut graph = self.graph;

        debug!(
            "Transposing graph with {} nodes and {} edges",
            graph.node_count, graph.edge_count
        );

        for adj in graph.nodes.iter_mut().flatten() {
            Arc::make_mut(adj).transpose();
        }

        for entry in graph.edges.iter_mut().flatten() {
            std::mem::swap(&mut entry.src, &mut entry.dst);
        }

        graph
    }
}

impl<N: Clone> Graph<N> {
    /// Returns the transposed graph, see [`Transpose`].
    pub fn transpose(&self) -> Graph<N> {
        Transpose::new(self.clone()).apply()
    }

    pub fn into_transposed(self) -> Graph<N> {
        Transpose::new(self).apply()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        core::{mode::Mode, value::Value},
        infra::{proptest::graph_in, testing::check_consistency},
    };

    #[test]
    fn reverses_directed_edges() {
        let graph = Graph::multidigraph()
            .build([("a", "b", 1), ("a", "b", 2), ("c", "a", 3)])
            .unwrap();

        let transposed = graph.transpose();

        assert_eq!(transposed.out_degree(&"b"), 2);
        assert_eq!(transposed.in_degree(&"a"), 2);
        assert_eq!(transposed.out_degree(&"a"), 1);
        assert_eq!(transposed.weight(("a", "c")), Ok(Some(Value::Int(3))));
        assert_eq!(transposed.find_edge(("a", "b")), Ok(None));

        // The source graph is not affected.
        assert_eq!(graph.out_degree(&"a"), 2);

        check_consistency(&transposed).unwrap();
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let graph = Graph::simple()
            .build([("a", "b", 1), ("b", "c", 2), ("c", "c", 3)])
            .unwrap();

        let transposed = graph.transpose();

        assert_eq!(transposed, graph);
        assert_eq!(transposed.edge_count(), 3);
        assert!(transposed.edges().all(|edge| !edge.is_directed()));
        check_consistency(&transposed).unwrap();
    }

    #[test]
    fn mixed_edges() {
        let mut graph = Graph::digraph();
        graph.add_edge(("a", "b")).unwrap();
        graph.add_undirected_edge(("b", "c")).unwrap();

        let transposed = graph.clone().into_transposed();

        assert!(transposed.has_edge(&"b", &"a"));
        assert!(transposed.has_edge(&"b", &"c"));
        assert!(transposed.has_edge(&"c", &"b"));
        assert_eq!(transposed.into_transposed(), graph);
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_transpose_involution(graph in graph_in(Mode::MULTIDIGRAPH)) {
            let transposed = graph.transpose();
            prop_assert_eq!(check_consistency(&transposed), Ok(()));
            prop_assert_eq!(transposed.transpose(), graph);
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_transpose_swaps_degrees(graph in graph_in(Mode::DIGRAPH)) {
            let transposed = graph.transpose();

            for node in graph.nodes() {
                prop_assert_eq!(transposed.out_degree(node), graph.in_degree(node));
                prop_assert_eq!(transposed.in_degree(node), graph.out_degree(node));
            }
        }
    }
}
