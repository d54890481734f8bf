use std::hash::Hash;

use thiserror::Error;

use crate::{
    core::{
        id::{EdgeId, IdType, NodeId},
        marker::Direction,
        mode::Mode,
    },
    graph::Graph,
};

pub fn create_complete(mode: Mode, node_count: usize) -> Graph<usize> {
    let mut graph = Graph::new(mode);

    for u in 0..node_count {
        graph.add_node(u);

        for v in 0..node_count {
            if u == v || (mode.undirected && v > u) {
                continue;
            }

            // Descriptions made of two nodes are always valid.
            let _ = graph.add_edge((u, v));
        }
    }

    graph
}

pub fn create_path(mode: Mode, node_count: usize) -> Graph<usize> {
    let mut graph = Graph::new(mode);

    if node_count > 0 {
        graph.add_node(0);
    }

    for v in 1..node_count {
        let _ = graph.add_edge((v - 1, v));
    }

    graph
}

fn dir_name(dir: Direction) -> &'static str {
    match dir {
        Direction::Outgoing => "out",
        Direction::Incoming => "in",
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("node count ({0}) is not equal to number of stored nodes ({1})")]
    NodeCountMismatch(usize, usize),
    #[error("lookup table size ({0}) is not equal to node count ({1})")]
    LookupSizeMismatch(usize, usize),
    #[error("lookup entry points to node {0} holding a different value")]
    LookupInvalid(NodeId),
    #[error("edge count ({0}) is not equal to number of canonical edges ({1})")]
    EdgeCountMismatch(usize, usize),
    #[error("edges iterator count ({0}) is not equal to edge count ({1})")]
    EdgesEdgeCountMismatch(usize, usize),
    #[error("edge {0} has an endpoint that does not exist")]
    DanglingEdge(EdgeId),
    #[error("edge {0} is missing in the {} edges of node {1}", dir_name(*.2))]
    EdgeNotConnected(EdgeId, NodeId, Direction),
    #[error("node {0} lists edge {1} in its {} edges, but the edge does not match", dir_name(*.2))]
    StaleAdjacency(NodeId, EdgeId, Direction),
    #[error("node {0} has an empty bucket for neighbor {1}")]
    EmptyBucket(NodeId, NodeId),
    #[error("{} degree of node {0} ({1}) is not equal to number of its edges ({2})", dir_name(*.3))]
    DegreeMismatch(NodeId, usize, usize, Direction),
    #[error("undirected edge {0} has an invalid mirror")]
    MirrorInvalid(EdgeId),
    #[error("undirected edge {0} and its mirror do not have exactly one canonical instance")]
    CanonicalInvalid(EdgeId),
    #[error("attributes stored for node {0} which does not exist")]
    OrphanNodeAttrs(NodeId),
    #[error("attributes stored for edge {0} which does not exist or is not canonical")]
    OrphanEdgeAttrs(EdgeId),
    #[error("empty attribute bag stored")]
    EmptyAttrs,
    #[error(
        "sum of {} degrees ({0}) is not equal to number of edge instances ({1})",
        dir_name(*.2)
    )]
    HandshakingLemma(usize, usize, Direction),
}

/// Checks every invariant of the graph representation.
pub fn check_consistency<N: Eq + Hash>(graph: &Graph<N>) -> Result<(), ConsistencyCheckError> {
    use ConsistencyCheckError::*;

    let stored_nodes = graph.nodes.iter().flatten().count();
    if stored_nodes != graph.node_count {
        return Err(NodeCountMismatch(graph.node_count, stored_nodes));
    }

    if graph.lookup.len() != graph.node_count {
        return Err(LookupSizeMismatch(graph.lookup.len(), graph.node_count));
    }

    for (node, id) in graph.lookup.iter() {
        if graph.node_value(*id) != Some(node) {
            return Err(LookupInvalid(*id));
        }
    }

    let canonical = graph
        .edges
        .iter()
        .flatten()
        .filter(|entry| entry.kind.is_canonical())
        .count();
    if canonical != graph.edge_count {
        return Err(EdgeCountMismatch(graph.edge_count, canonical));
    }

    let listed = graph.edges().count();
    if listed != graph.edge_count {
        return Err(EdgesEdgeCountMismatch(listed, graph.edge_count));
    }

    let mut instances = 0;

    for (index, entry) in graph.edges.iter().enumerate() {
        let Some(entry) = entry else {
            continue;
        };

        let id = EdgeId::from_usize(index);
        instances += 1;

        let (Some(src), Some(dst)) = (graph.adjacency(entry.src), graph.adjacency(entry.dst))
        else {
            return Err(DanglingEdge(id));
        };

        if !src.bucket(entry.dst, Direction::Outgoing).contains(&id) {
            return Err(EdgeNotConnected(id, entry.src, Direction::Outgoing));
        }

        if !dst.bucket(entry.src, Direction::Incoming).contains(&id) {
            return Err(EdgeNotConnected(id, entry.dst, Direction::Incoming));
        }

        if let Some(mirror) = entry.kind.mirror() {
            let Some(mirror_entry) = graph.entry(mirror) else {
                return Err(MirrorInvalid(id));
            };

            if mirror_entry.kind.mirror() != Some(id)
                || mirror_entry.src != entry.dst
                || mirror_entry.dst != entry.src
            {
                return Err(MirrorInvalid(id));
            }

            if entry.kind.is_canonical() == mirror_entry.kind.is_canonical() {
                return Err(CanonicalInvalid(id));
            }
        }
    }

    let mut degree_sums = [0, 0];

    for (index, adj) in graph.nodes.iter().enumerate() {
        let Some(adj) = adj else {
            continue;
        };

        let node = NodeId::from_usize(index);

        for dir in [Direction::Outgoing, Direction::Incoming] {
            let mut count = 0;

            for (neighbor, edges) in adj.edges[dir.index()].iter() {
                if edges.is_empty() {
                    return Err(EmptyBucket(node, *neighbor));
                }

                for id in edges {
                    let matches = graph.entry(*id).is_some_and(|entry| match dir {
                        Direction::Outgoing => entry.src == node && entry.dst == *neighbor,
                        Direction::Incoming => entry.dst == node && entry.src == *neighbor,
                    });

                    if !matches {
                        return Err(StaleAdjacency(node, *id, dir));
                    }
                }

                count += edges.len();
            }

            if adj.degree[dir.index()] != count {
                return Err(DegreeMismatch(node, adj.degree[dir.index()], count, dir));
            }

            degree_sums[dir.index()] += count;
        }
    }

    // https://en.wikipedia.org/wiki/Handshaking_lemma
    for dir in [Direction::Outgoing, Direction::Incoming] {
        if degree_sums[dir.index()] != instances {
            return Err(HandshakingLemma(degree_sums[dir.index()], instances, dir));
        }
    }

    for (id, attrs) in graph.node_attrs.iter() {
        if graph.adjacency(*id).is_none() {
            return Err(OrphanNodeAttrs(*id));
        }

        if attrs.is_empty() {
            return Err(EmptyAttrs);
        }
    }

    for (id, attrs) in graph.edge_attrs.iter() {
        if !graph.entry(*id).is_some_and(|entry| entry.kind.is_canonical()) {
            return Err(OrphanEdgeAttrs(*id));
        }

        if attrs.is_empty() {
            return Err(EmptyAttrs);
        }
    }

    Ok(())
}
