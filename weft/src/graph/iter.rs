use std::{iter::Enumerate, slice::Iter, sync::Arc};

use indexmap::map::{Keys, Values};

use crate::core::{
    edge::EdgeRef,
    id::{EdgeId, IdType, NodeId},
    marker::Direction,
    value::Attrs,
};

use super::{Adjacency, EdgeEntry, Graph};

pub struct Nodes<'a, N> {
    inner: Iter<'a, Option<Arc<Adjacency<N>>>>,
}

impl<'a, N> Nodes<'a, N> {
    pub(crate) fn new(inner: Iter<'a, Option<Arc<Adjacency<N>>>>) -> Self {
        Self { inner }
    }
}

impl<N> Clone for Nodes<'_, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, N> Iterator for Nodes<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .find_map(|slot| slot.as_deref().map(|adj| &adj.node))
    }
}

pub struct Neighbors<'a, N> {
    graph: &'a Graph<N>,
    inner: Option<Keys<'a, NodeId, Vec<EdgeId>>>,
}

impl<'a, N> Neighbors<'a, N> {
    pub(crate) fn new(graph: &'a Graph<N>, inner: Option<Keys<'a, NodeId, Vec<EdgeId>>>) -> Self {
        Self { graph, inner }
    }
}

impl<N> Clone for Neighbors<'_, N> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, N> Iterator for Neighbors<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.inner
            .as_mut()?
            .find_map(|neighbor| graph.node_value(*neighbor))
    }
}

// Source of candidate edge ids for edge iterators.
#[derive(Clone)]
pub(crate) enum Candidates<'a> {
    Empty,
    Bucket(Iter<'a, EdgeId>),
    Buckets {
        buckets: Values<'a, NodeId, Vec<EdgeId>>,
        current: Iter<'a, EdgeId>,
    },
    Canonical(Enumerate<Iter<'a, Option<EdgeEntry>>>),
}

impl<'a> Candidates<'a> {
    pub fn bucket(edges: &'a [EdgeId]) -> Self {
        Candidates::Bucket(edges.iter())
    }

    pub fn around<N>(adj: &'a Adjacency<N>, dir: Direction) -> Self {
        let empty: &'a [EdgeId] = &[];

        Candidates::Buckets {
            buckets: adj.edges[dir.index()].values(),
            current: empty.iter(),
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Candidates::Empty => None,
            Candidates::Bucket(edges) => edges.next().copied(),
            Candidates::Buckets { buckets, current } => loop {
                if let Some(id) = current.next() {
                    return Some(*id);
                }

                *current = buckets.next()?.iter();
            },
            Candidates::Canonical(entries) => entries.find_map(|(index, entry)| match entry {
                Some(entry) if entry.kind.is_canonical() => Some(EdgeId::from_usize(index)),
                _ => None,
            }),
        }
    }
}

/// Lazy sequence of edges, optionally filtered by attributes.
///
/// Cloning the iterator restarts the sequence from the current position, so a
/// fresh iterator can be replayed any number of times.
pub struct EdgesIter<'a, N> {
    graph: &'a Graph<N>,
    candidates: Candidates<'a>,
    pattern: Option<Attrs>,
}

impl<'a, N> EdgesIter<'a, N> {
    pub(crate) fn new(
        graph: &'a Graph<N>,
        candidates: Candidates<'a>,
        pattern: Option<Attrs>,
    ) -> Self {
        Self {
            graph,
            candidates,
            pattern,
        }
    }

    pub(crate) fn empty(graph: &'a Graph<N>) -> Self {
        Self::new(graph, Candidates::Empty, None)
    }

    pub(crate) fn all(graph: &'a Graph<N>) -> Self {
        Self::new(
            graph,
            Candidates::Canonical(graph.edges.iter().enumerate()),
            None,
        )
    }

    pub(crate) fn around(graph: &'a Graph<N>, adj: &'a Adjacency<N>, dir: Direction) -> Self {
        Self::new(graph, Candidates::around(adj, dir), None)
    }
}

impl<N> Clone for EdgesIter<'_, N> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            candidates: self.candidates.clone(),
            pattern: self.pattern.clone(),
        }
    }
}

impl<'a, N> Iterator for EdgesIter<'a, N> {
    type Item = EdgeRef<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        let pattern = self.pattern.as_ref();

        self.candidates.find_map(|id| {
            graph.edge_ref(id).filter(|edge| {
                pattern
                    .map(|pattern| pattern.is_submap_of(edge.attrs))
                    .unwrap_or(true)
            })
        })
    }
}
