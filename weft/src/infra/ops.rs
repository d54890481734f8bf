//! Replayable sequences of graph mutations, used by property tests and the
//! fuzzer.

use std::{fmt, hash::Hash};

use crate::{
    core::{edge::EdgeDesc, error::GraphError},
    graph::{Graph, Target},
};

/// Attribute key set by [`MutOp::AddNodeAttr`] and [`MutOp::AddEdgeAttr`].
pub const TAG: &str = "tag";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum MutOp<N> {
    AddNode(N),
    RemoveNode(N),
    AddEdge(N, N, Option<i8>),
    AddDirectedEdge(N, N, Option<i8>),
    AddUndirectedEdge(N, N, Option<i8>),
    RemoveEdge(N, N),
    AddNodeAttr(N, u8),
    AddEdgeAttr(N, N, u8),
    Transpose,
    Compact,
    Clear,
}

fn desc<N>(src: N, dst: N, weight: Option<i8>) -> EdgeDesc<N> {
    match weight {
        Some(weight) => EdgeDesc::from((src, dst, i64::from(weight))),
        None => EdgeDesc::from((src, dst)),
    }
}

fn desc_code<N: fmt::Debug>(src: &N, dst: &N, weight: Option<i8>) -> String {
    match weight {
        Some(weight) => format!("({src:?}, {dst:?}, {weight})"),
        None => format!("({src:?}, {dst:?})"),
    }
}

impl<N: Clone + Eq + Hash> MutOp<N> {
    pub fn apply(self, graph: &mut Graph<N>) -> Result<(), GraphError> {
        match self {
            MutOp::AddNode(node) => {
                graph.add_node(node);
            }
            MutOp::RemoveNode(node) => {
                graph.remove_node(&node);
            }
            MutOp::AddEdge(src, dst, weight) => {
                graph.add_edge(desc(src, dst, weight))?;
            }
            MutOp::AddDirectedEdge(src, dst, weight) => {
                graph.add_directed_edge(desc(src, dst, weight))?;
            }
            MutOp::AddUndirectedEdge(src, dst, weight) => {
                graph.add_undirected_edge(desc(src, dst, weight))?;
            }
            MutOp::RemoveEdge(src, dst) => {
                graph.remove_edge((src, dst))?;
            }
            MutOp::AddNodeAttr(node, tag) => {
                graph.add_attr(Target::Node(node), TAG, tag)?;
            }
            MutOp::AddEdgeAttr(src, dst, tag) => {
                graph.add_attr((src, dst), TAG, tag)?;
            }
            MutOp::Transpose => {
                *graph = std::mem::take(graph).into_transposed();
            }
            MutOp::Compact => {
                graph.compact();
            }
            MutOp::Clear => graph.clear(),
        }

        Ok(())
    }
}

#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct MutOpsSeq<N>(pub Vec<MutOp<N>>);

impl<N> IntoIterator for MutOpsSeq<N> {
    type Item = MutOp<N>;
    type IntoIter = std::vec::IntoIter<MutOp<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<N: Clone + Eq + Hash + fmt::Debug> MutOpsSeq<N> {
    /// Applies the operations and prints them as code, so that a failing
    /// sequence can be turned into a regression test.
    pub fn replay(self, graph: &mut Graph<N>) {
        println!("let mut graph; // Graph::new({:?})", graph.mode());
        println!();

        for op in self {
            match &op {
                MutOp::AddNode(node) => println!("graph.add_node({node:?});"),
                MutOp::RemoveNode(node) => println!("graph.remove_node(&{node:?});"),
                MutOp::AddEdge(src, dst, weight) => {
                    println!("graph.add_edge({});", desc_code(src, dst, *weight))
                }
                MutOp::AddDirectedEdge(src, dst, weight) => {
                    println!("graph.add_directed_edge({});", desc_code(src, dst, *weight))
                }
                MutOp::AddUndirectedEdge(src, dst, weight) => {
                    println!("graph.add_undirected_edge({});", desc_code(src, dst, *weight))
                }
                MutOp::RemoveEdge(src, dst) => println!("graph.remove_edge(({src:?}, {dst:?}));"),
                MutOp::AddNodeAttr(node, tag) => {
                    println!("graph.add_attr(Target::node({node:?}), {TAG:?}, {tag});")
                }
                MutOp::AddEdgeAttr(src, dst, tag) => {
                    println!("graph.add_attr(({src:?}, {dst:?}), {TAG:?}, {tag});")
                }
                MutOp::Transpose => println!("graph = graph.into_transposed();"),
                MutOp::Compact => println!("graph.compact();"),
                MutOp::Clear => println!("graph.clear();"),
            }

            let _ = op.apply(graph);
        }

        println!();
        println!("check_consistency(&graph).unwrap();");
    }
}

impl<N: fmt::Debug> fmt::Debug for MutOpsSeq<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MutOpsSeq(vec![")?;

        for op in self.0.iter() {
            writeln!(f, "    MutOp::{:?},", op)?;
        }

        writeln!(f, "])")?;
        writeln!(f, ".replay(&mut graph);")
    }
}
