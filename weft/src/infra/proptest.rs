//! Strategies generating graphs by random sequences of mutations.

use proptest::{collection::vec, option, prelude::*};

use crate::{core::mode::Mode, graph::Graph};

use super::ops::MutOp;

/// Nodes are drawn from `0..NODE_BOUND` so that random operations frequently
/// hit existing nodes and edges.
pub const NODE_BOUND: u8 = 16;

pub fn node() -> impl Strategy<Value = u8> {
    0..NODE_BOUND
}

pub fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::SIMPLE),
        Just(Mode::DIGRAPH),
        Just(Mode::MULTIGRAPH),
        Just(Mode::MULTIDIGRAPH),
    ]
}

pub fn mut_op() -> impl Strategy<Value = MutOp<u8>> {
    let weight = || option::of(any::<i8>());

    prop_oneof![
        2 => node().prop_map(MutOp::AddNode),
        1 => node().prop_map(MutOp::RemoveNode),
        6 => (node(), node(), weight()).prop_map(|(src, dst, w)| MutOp::AddEdge(src, dst, w)),
        2 => (node(), node(), weight())
            .prop_map(|(src, dst, w)| MutOp::AddDirectedEdge(src, dst, w)),
        2 => (node(), node(), weight())
            .prop_map(|(src, dst, w)| MutOp::AddUndirectedEdge(src, dst, w)),
        2 => (node(), node()).prop_map(|(src, dst)| MutOp::RemoveEdge(src, dst)),
        1 => (node(), any::<u8>()).prop_map(|(node, tag)| MutOp::AddNodeAttr(node, tag)),
        1 => (node(), node(), any::<u8>())
            .prop_map(|(src, dst, tag)| MutOp::AddEdgeAttr(src, dst, tag)),
        1 => Just(MutOp::Transpose),
        1 => Just(MutOp::Compact),
    ]
}

pub fn mut_ops() -> impl Strategy<Value = Vec<MutOp<u8>>> {
    vec(mut_op(), 0..32)
}

/// Graphs in the given mode.
pub fn graph_in(mode: Mode) -> impl Strategy<Value = Graph<u8>> {
    vec(mut_op(), 0..64).prop_map(move |ops| {
        let mut graph = Graph::new(mode);

        for op in ops {
            // Operations on absent targets are expected to fail.
            let _ = op.apply(&mut graph);
        }

        graph
    })
}

/// Graphs in any of the four modes.
pub fn graph() -> impl Strategy<Value = Graph<u8>> {
    mode().prop_flat_map(graph_in)
}
