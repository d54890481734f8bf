//! Construction of graphs from sequences of initializers.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use weft::graph::{Graph, Init};
//!
//! let adjacency = HashMap::from([("a", vec!["b", "c"]), ("b", vec!["c"])]);
//!
//! let graph = Graph::digraph()
//!     .build([
//!         Init::from(adjacency),
//!         Init::from(("c", "d", 2.5)),
//!         Init::node("e"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(graph.node_count(), 5);
//! assert_eq!(graph.edge_count(), 4);
//! ```

use std::{collections::HashMap, hash::Hash};

use tracing::debug;

use crate::core::{
    edge::EdgeDesc,
    error::InvalidDescription,
    id::{IdType, NodeId},
    value::{Attrs, Value},
};

use super::Graph;

/// A single step of graph construction.
#[derive(Debug, Clone)]
pub enum Init<N> {
    /// Adds the node.
    Node(N),
    /// Adds the edge according to the mode of the graph being built.
    Edge(EdgeDesc<N>),
    /// Adds every listed node and an edge from it to each of its neighbors.
    Adjacency(Vec<(N, Adjacent<N>)>),
    /// Adds all nodes and edges of another graph. The directedness of the
    /// imported edges follows the mode of the graph being built.
    Graph(Graph<N>),
}

/// Neighbors of a node in an adjacency list.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjacent<N> {
    Nodes(Vec<N>),
    Weighted(Vec<(N, Value)>),
}

impl<N> Init<N> {
    pub fn node(node: N) -> Self {
        Init::Node(node)
    }

    pub fn adjacency(list: impl IntoIterator<Item = (N, Vec<N>)>) -> Self {
        Init::Adjacency(
            list.into_iter()
                .map(|(node, neighbors)| (node, Adjacent::Nodes(neighbors)))
                .collect(),
        )
    }

    pub fn weighted_adjacency<W: Into<Value>>(
        list: impl IntoIterator<Item = (N, Vec<(N, W)>)>,
    ) -> Self {
        Init::Adjacency(
            list.into_iter()
                .map(|(node, neighbors)| {
                    let neighbors = neighbors
                        .into_iter()
                        .map(|(neighbor, weight)| (neighbor, weight.into()))
                        .collect();
                    (node, Adjacent::Weighted(neighbors))
                })
                .collect(),
        )
    }
}

impl<N> From<EdgeDesc<N>> for Init<N> {
    fn from(desc: EdgeDesc<N>) -> Self {
        Init::Edge(desc)
    }
}

impl<N> From<(N, N)> for Init<N> {
    fn from(pair: (N, N)) -> Self {
        Init::Edge(pair.into())
    }
}

impl<N> From<(N, N, Attrs)> for Init<N> {
    fn from(triple: (N, N, Attrs)) -> Self {
        Init::Edge(triple.into())
    }
}

macro_rules! impl_weighted_init {
    ($($ty:ty),*) => {
        $(
            impl<N> From<(N, N, $ty)> for Init<N> {
                fn from(triple: (N, N, $ty)) -> Self {
                    Init::Edge(triple.into())
                }
            }
        )*
    };
}

impl_weighted_init!(Value, i64, i32, u32, u8, f64, f32);

impl<N> From<Graph<N>> for Init<N> {
    fn from(graph: Graph<N>) -> Self {
        Init::Graph(graph)
    }
}

impl<N, S> From<HashMap<N, Vec<N>, S>> for Init<N> {
    fn from(map: HashMap<N, Vec<N>, S>) -> Self {
        Init::adjacency(map)
    }
}

impl<N, W: Into<Value>, S, S2> From<HashMap<N, HashMap<N, W, S2>, S>> for Init<N> {
    fn from(map: HashMap<N, HashMap<N, W, S2>, S>) -> Self {
        Init::weighted_adjacency(
            map.into_iter()
                .map(|(node, neighbors)| (node, neighbors.into_iter().collect::<Vec<_>>())),
        )
    }
}

impl<N: Clone + Eq + Hash> Graph<N> {
    /// Applies the initializers in order and returns the resulting graph.
    pub fn build<I: Into<Init<N>>>(
        mut self,
        inits: impl IntoIterator<Item = I>,
    ) -> Result<Self, InvalidDescription> {
        for init in inits {
            self.apply_init(init.into())?;
        }

        debug!(
            "Built graph with {} nodes and {} edges",
            self.node_count, self.edge_count
        );
        Ok(self)
    }

    /// Applies the initializers to this graph. If any of them is invalid,
    /// the graph is left untouched.
    pub fn try_extend<I: Into<Init<N>>>(
        &mut self,
        inits: impl IntoIterator<Item = I>,
    ) -> Result<(), InvalidDescription> {
        *self = self.clone().build(inits)?;
        Ok(())
    }

    fn apply_init(&mut self, init: Init<N>) -> Result<(), InvalidDescription> {
        match init {
            Init::Node(node) => {
                self.add_node(node);
            }
            Init::Edge(desc) => {
                self.add_edge(desc)?;
            }
            Init::Adjacency(list) => {
                for (node, adjacent) in list {
                    self.add_node(node.clone());

                    match adjacent {
                        Adjacent::Nodes(neighbors) => {
                            for neighbor in neighbors {
                                self.add_edge((node.clone(), neighbor))?;
                            }
                        }
                        Adjacent::Weighted(neighbors) => {
                            for (neighbor, weight) in neighbors {
                                self.add_edge((node.clone(), neighbor, weight))?;
                            }
                        }
                    }
                }
            }
            Init::Graph(other) => self.import(&other)?,
        }

        Ok(())
    }

    /// Adds all nodes and then all edges of `other` together with their
    /// attributes.
    ///
    /// Edges are added as directed or undirected according to the mode of
    /// this graph. An undirected edge imported into a directed graph becomes
    /// a pair of opposite directed edges.
    pub fn import(&mut self, other: &Graph<N>) -> Result<(), InvalidDescription> {
        debug!(
            "Importing {} nodes and {} edges",
            other.node_count, other.edge_count
        );

        for (id, adj) in other.nodes.iter().enumerate() {
            let Some(adj) = adj else {
                continue;
            };

            let (node, _) = self.get_or_add_node(adj.node.clone());

            if let Some(attrs) = other.node_attrs.get(&NodeId::from_usize(id)) {
                if !attrs.is_empty() {
                    self.node_attrs.entry(node).or_default().merge(attrs.clone());
                }
            }
        }

        let directed = !self.mode.undirected;

        for edge in other.edges() {
            let desc =
                EdgeDesc::Attributed(edge.src.clone(), edge.dst.clone(), edge.attrs.clone());
            self.add_edge_as(desc, directed)?;

            if directed && !edge.is_directed() && edge.src != edge.dst {
                let desc =
                    EdgeDesc::Attributed(edge.dst.clone(), edge.src.clone(), edge.attrs.clone());
                self.add_edge_as(desc, directed)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::Target, infra::testing::check_consistency};

    #[test]
    fn cross_mode_import_into_undirected() {
        let directed = Graph::digraph()
            .build([("a", "b", 1), ("b", "c", 2)])
            .unwrap();

        let graph = Graph::simple().build([directed]).unwrap();

        assert_eq!(graph.edge_count(), 2);
        for edge in graph.edges() {
            assert!(!edge.is_directed());
            assert!(graph.mirror_edge(edge.id).is_some());
        }

        assert_eq!(graph.weight(("c", "b")), Ok(Some(Value::Int(2))));
        check_consistency(&graph).unwrap();
    }

    #[test]
    fn cross_mode_import_into_directed() {
        let mut undirected = Graph::simple();
        undirected.add_edge(("a", "b", 3)).unwrap();
        undirected.add_edge(("c", "c")).unwrap();
        undirected.add_attr(Target::node("a"), "label", "start").unwrap();

        let graph = Graph::multidigraph().build([undirected]).unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert!(graph.edges().all(|edge| edge.is_directed()));
        assert_eq!(graph.weight(("b", "a")), Ok(Some(Value::Int(3))));
        assert_eq!(
            graph.attr(Target::node("a"), "label"),
            Ok(Some(&Value::from("start")))
        );
        check_consistency(&graph).unwrap();
    }

    #[test]
    fn directed_import_into_simple_merges_opposite_edges() {
        let directed = Graph::digraph()
            .build([
                EdgeDesc::from(("a", "b", Attrs::from([("color", "red")]))),
                EdgeDesc::from(("b", "a", Attrs::from([("label", "x")]))),
            ])
            .unwrap();

        let graph = Graph::simple().build([directed]).unwrap();

        assert_eq!(graph.edge_count(), 1);
        let attrs = graph.attrs(("a", "b")).unwrap();
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn adjacency_lists() {
        let graph = Graph::digraph()
            .build([Init::adjacency([("a", vec!["b", "c"]), ("d", vec![])])])
            .unwrap();

        assert!(graph.has_node(&"d"));
        assert_eq!(graph.out_degree(&"a"), 2);
        assert_eq!(graph.edge_count(), 2);

        let weighted = HashMap::from([("a", HashMap::from([("b", 4), ("c", 1)]))]);
        let graph = Graph::digraph().build([weighted]).unwrap();

        assert_eq!(graph.weight(("a", "b")), Ok(Some(Value::Int(4))));
        assert_eq!(graph.weight(("a", "c")), Ok(Some(Value::Int(1))));
    }

    #[test]
    fn mixed_initializers() {
        let graph = Graph::multigraph()
            .build([
                Init::node("lonely"),
                Init::from(("x", "y")),
                Init::from(("x", "y", 2)),
                Init::from(("y", "z", Attrs::from([("color", "red")]))),
            ])
            .unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.out_degree(&"x"), 2);
    }

    #[test]
    fn invalid_initializer() {
        let result = Graph::digraph().build([("a", "b", Value::from("heavy"))]);
        assert!(result.is_err());

        let mut graph = Graph::digraph().build([("a", "b")]).unwrap();
        let result = graph.try_extend([
            Init::from(("b", "c")),
            Init::from(("c", "d", Value::from("heavy"))),
        ]);

        assert!(result.is_err());
        assert!(!graph.has_node(&"c"));
        assert_eq!(graph.edge_count(), 1);
    }
}
