//! Reclaiming the slots of removed nodes and edges.
//!
//! Removal leaves holes in the node and edge arenas so that stale handles
//! resolve to nothing. [`Graph::compact`] drops the holes and renumbers the
//! remaining handles densely, returning a [`Compaction`] which translates
//! the old handles to the new ones.

use std::{hash::Hash, sync::Arc};

use tracing::debug;

use crate::core::{
    edge::EdgeKind,
    id::{EdgeId, IdType, NodeId},
};

use super::{adjacency::Buckets, Adjacency, EdgeEntry, Graph};

/// Translation of handles issued before [`Graph::compact`] into handles
/// valid after it. Handles of removed nodes and edges translate to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compaction {
    nodes: Vec<Option<NodeId>>,
    edges: Vec<Option<EdgeId>>,
}

fn dense_ids<T, I: IdType>(slots: &[Option<T>]) -> Vec<Option<I>> {
    let mut next = 0;

    slots
        .iter()
        .map(|slot| {
            slot.as_ref().map(|_| {
                let id = I::from_usize(next);
                next += 1;
                id
            })
        })
        .collect()
}

impl Compaction {
    pub fn node(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.as_usize()).copied().flatten()
    }

    pub fn edge(&self, id: EdgeId) -> Option<EdgeId> {
        self.edges.get(id.as_usize()).copied().flatten()
    }

    /// Returns `true` if every handle translates to itself.
    pub fn is_noop(&self) -> bool {
        self.nodes.iter().all(Option::is_some) && self.edges.iter().all(Option::is_some)
    }

    fn buckets(&self, buckets: &Buckets) -> Buckets {
        buckets
            .iter()
            .filter_map(|(neighbor, edges)| {
                let neighbor = self.node(*neighbor)?;
                let edges = edges.iter().filter_map(|id| self.edge(*id)).collect();
                Some((neighbor, edges))
            })
            .collect()
    }
}

impl<N: Clone + Eq + Hash> Graph<N> {
    /// Drops the slots of removed nodes and edges and renumbers the remaining
    /// handles densely.
    ///
    /// Afterwards the memory and the cost of full scans are proportional to
    /// the live graph instead of its edit history. Handles obtained before
    /// the call must be translated through the returned [`Compaction`]; an
    /// untranslated handle may resolve to a different node or edge. Other
    /// clones of the graph keep their own handles.
    ///
    /// ```
    /// use weft::graph::Graph;
    ///
    /// let mut graph = Graph::digraph();
    /// let removed = graph.add_edge(("a", "b")).unwrap();
    /// let kept = graph.add_edge(("b", "c", 2)).unwrap();
    /// graph.remove_edge(removed).unwrap();
    ///
    /// let compaction = graph.compact();
    /// let kept = compaction.edge(kept).unwrap();
    ///
    /// assert_eq!(compaction.edge(removed), None);
    /// assert_eq!(graph.find_edge(("b", "c")), Ok(Some(kept)));
    /// ```
    pub fn compact(&mut self) -> Compaction {
        let compaction = Compaction {
            nodes: dense_ids(&self.nodes),
            edges: dense_ids(&self.edges),
        };

        if compaction.is_noop() {
            return compaction;
        }

        debug!(
            "Compacting graph with {} node slots and {} edge slots",
            self.nodes.len(),
            self.edges.len()
        );

        // Live edges only connect live nodes, so the fallbacks are never taken.
        let node = |id: NodeId| compaction.node(id).unwrap_or(id);
        let edge = |id: EdgeId| compaction.edge(id).unwrap_or(id);

        self.nodes = self
            .nodes
            .iter()
            .flatten()
            .map(|adj| {
                Some(Arc::new(Adjacency {
                    node: adj.node.clone(),
                    edges: [
                        compaction.buckets(&adj.edges[0]),
                        compaction.buckets(&adj.edges[1]),
                    ],
                    degree: adj.degree,
                }))
            })
            .collect();

        self.edges = self
            .edges
            .iter()
            .flatten()
            .map(|entry| {
                let kind = match entry.kind {
                    EdgeKind::Directed => EdgeKind::Directed,
                    EdgeKind::Undirected { mirror, canonical } => EdgeKind::Undirected {
                        mirror: edge(mirror),
                        canonical,
                    },
                };

                Some(EdgeEntry {
                    src: node(entry.src),
                    dst: node(entry.dst),
                    kind,
                })
            })
            .collect();

        for id in self.lookup.values_mut() {
            *id = node(*id);
        }

        self.node_attrs = std::mem::take(&mut self.node_attrs)
            .into_iter()
            .filter_map(|(id, attrs)| Some((compaction.node(id)?, attrs)))
            .collect();

        self.edge_attrs = std::mem::take(&mut self.edge_attrs)
            .into_iter()
            .filter_map(|(id, attrs)| Some((compaction.edge(id)?, attrs)))
            .collect();

        compaction
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        core::value::{Attrs, Value},
        graph::Target,
        infra::{proptest::graph, testing::check_consistency},
    };

    #[test]
    fn churn_is_reclaimed() {
        let mut graph = Graph::digraph();
        graph.add_node(0);

        for i in 1..1000 {
            let id = graph.add_edge((0, i)).unwrap();
            graph.remove_edge(id).unwrap();
            graph.remove_node(&i);
        }

        let directed = graph.add_edge((0, 1000, 3)).unwrap();
        let undirected = graph.add_undirected_edge((1000, 1001)).unwrap();
        graph.add_attr(Target::node(1000), "label", "end").unwrap();

        assert_eq!(graph.nodes.len(), 1002);
        assert_eq!(graph.edges.len(), 1002);

        let compaction = graph.compact();

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let directed = compaction.edge(directed).unwrap();
        let undirected = compaction.edge(undirected).unwrap();

        assert_eq!(graph.weight(directed), Ok(Some(Value::Int(3))));
        assert_eq!(graph.find_edge((1001, 1000)), Ok(graph.mirror_edge(undirected)));
        assert_eq!(
            graph.attr(Target::node(1000), "label"),
            Ok(Some(&Value::from("end")))
        );
        check_consistency(&graph).unwrap();

        assert!(graph.compact().is_noop());
    }

    #[test]
    fn compaction_preserves_graph_and_snapshots() {
        let mut graph = Graph::multigraph();

        let removed = graph.add_edge(("a", "b", 1)).unwrap();
        let kept = graph
            .add_edge(("b", "c", Attrs::from([("color", "red")])))
            .unwrap();
        graph.add_directed_edge(("c", "d")).unwrap();
        graph.add_edge(("x", "c")).unwrap();
        graph.remove_edge(removed).unwrap();
        graph.remove_node(&"x");

        let snapshot = graph.clone();
        let compaction = graph.compact();

        assert_eq!(graph, snapshot);
        assert_eq!(compaction.edge(removed), None);
        assert_eq!(compaction.node(NodeId::from_usize(1000)), None);

        let kept_after = compaction.edge(kept).unwrap();
        assert_eq!(
            graph.attr(kept_after, "color"),
            Ok(Some(&Value::from("red")))
        );

        // The snapshot keeps the handles it was taken with.
        assert_eq!(
            snapshot.attr(kept, "color"),
            Ok(Some(&Value::from("red")))
        );

        check_consistency(&graph).unwrap();
        check_consistency(&snapshot).unwrap();
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_compaction_preserves_graph(graph in graph()) {
            let mut compacted = graph.clone();
            let compaction = compacted.compact();

            prop_assert_eq!(check_consistency(&compacted), Ok(()));
            prop_assert_eq!(compacted.nodes.len(), compacted.node_count());
            prop_assert_eq!(&compacted, &graph);

            for edge in graph.edges() {
                let id = compaction.edge(edge.id).unwrap();
                prop_assert_eq!(compacted.edge(id).map(|edge| edge.attrs), Some(edge.attrs));
            }
        }
    }
}
