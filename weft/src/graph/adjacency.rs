use std::hash::BuildHasherDefault;

use indexmap::{map::Keys, IndexMap};
use rustc_hash::FxHasher;

use crate::core::{
    id::{EdgeId, NodeId},
    marker::Direction,
};

pub(crate) type Buckets = IndexMap<NodeId, Vec<EdgeId>, BuildHasherDefault<FxHasher>>;

/// Per-node bookkeeping.
///
/// Edges are grouped by the node on the other side, in both directions. The
/// instances of an undirected edge are listed like any directed edge, so an
/// undirected edge contributes one to both degrees of both its endpoints.
#[derive(Debug, Clone)]
pub(crate) struct Adjacency<N> {
    pub node: N,
    pub edges: [Buckets; 2],
    pub degree: [usize; 2],
}

impl<N> Adjacency<N> {
    pub fn new(node: N) -> Self {
        Self {
            node,
            edges: [Buckets::default(), Buckets::default()],
            degree: [0, 0],
        }
    }

    pub fn bucket(&self, neighbor: NodeId, dir: Direction) -> &[EdgeId] {
        self.edges[dir.index()]
            .get(&neighbor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn neighbors(&self, dir: Direction) -> Keys<'_, NodeId, Vec<EdgeId>> {
        self.edges[dir.index()].keys()
    }

    pub fn connect(&mut self, neighbor: NodeId, edge: EdgeId, dir: Direction) {
        self.edges[dir.index()]
            .entry(neighbor)
            .or_default()
            .push(edge);
        self.degree[dir.index()] += 1;
    }

    pub fn disconnect(&mut self, neighbor: NodeId, edge: EdgeId, dir: Direction) -> bool {
        let edges = &mut self.edges[dir.index()];

        let Some(bucket) = edges.get_mut(&neighbor) else {
            return false;
        };

        let Some(position) = bucket.iter().position(|id| *id == edge) else {
            return false;
        };

        // Keep the insertion order of the remaining edges and neighbors.
        bucket.remove(position);
        if bucket.is_empty() {
            edges.shift_remove(&neighbor);
        }

        self.degree[dir.index()] -= 1;
        true
    }

    pub fn incident_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().flat_map(|buckets| buckets.values().flatten().copied())
    }

    /// Swaps the roles of outgoing and incoming edges.
    pub fn transpose(&mut self) {
        self.edges.swap(0, 1);
        self.degree.swap(0, 1);
    }
}
