use std::hash::Hash;

use crate::core::{
    edge::EdgeDesc,
    error::InvalidDescription,
    id::{EdgeId, NodeId},
    marker::Direction,
    value::{Attrs, Value},
};

use super::{iter::Candidates, EdgesIter, Graph};

/// Partial specification of edges: optional endpoints and attributes the
/// edges must carry.
///
/// ```
/// use weft::{core::Attrs, graph::{EdgeQuery, Graph}};
///
/// let graph = Graph::digraph()
///     .build([
///         ("a", "b", Attrs::from([("color", "red")])),
///         ("a", "c", Attrs::from([("color", "blue")])),
///     ])
///     .unwrap();
///
/// let query = EdgeQuery::new().src("a").attr("color", "red");
/// let found = graph.find_edges(&query).map(|edge| *edge.dst).collect::<Vec<_>>();
///
/// assert_eq!(found, vec!["b"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeQuery<N> {
    src: Option<N>,
    dst: Option<N>,
    attrs: Attrs,
}

impl<N> EdgeQuery<N> {
    pub fn new() -> Self {
        Self {
            src: None,
            dst: None,
            attrs: Attrs::new(),
        }
    }

    #[must_use]
    pub fn src(self, src: N) -> Self {
        Self {
            src: Some(src),
            ..self
        }
    }

    #[must_use]
    pub fn dst(self, dst: N) -> Self {
        Self {
            dst: Some(dst),
            ..self
        }
    }

    #[must_use]
    pub fn attr(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            attrs: self.attrs.with(key, value),
            ..self
        }
    }

    #[must_use]
    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs.merge(attrs);
        self
    }
}

impl<N> Default for EdgeQuery<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash> Graph<N> {
    /// Resolves an edge description to the first matching edge instance.
    ///
    /// Endpoint pairs are looked up in the given order first. If the graph is
    /// undirected by default, the reversed order is tried too. The returned
    /// instance is the one found in the adjacency of the source, so for an
    /// undirected edge it may be the mirror.
    pub fn find_edge(
        &self,
        edge: impl Into<EdgeDesc<N>>,
    ) -> Result<Option<EdgeId>, InvalidDescription> {
        self.find_edge_desc(&edge.into())
    }

    pub(crate) fn find_edge_desc(
        &self,
        desc: &EdgeDesc<N>,
    ) -> Result<Option<EdgeId>, InvalidDescription> {
        let pattern = desc.pattern()?;

        let (src, dst) = match desc {
            EdgeDesc::Id(id) => return Ok(self.entry(*id).map(|_| *id)),
            _ => match desc.endpoints() {
                Some(endpoints) => endpoints,
                None => return Ok(None),
            },
        };

        match (self.node_id(src), self.node_id(dst)) {
            (Some(src), Some(dst)) => {
                Ok(self.resolve_between(src, dst, pattern.as_ref(), self.mode.undirected))
            }
            _ => Ok(None),
        }
    }

    /// All edges matching the query, lazily.
    ///
    /// With a source, only the outgoing edges of the source are scanned; with
    /// a destination only, the incoming edges of the destination. Without
    /// either, every edge of the graph is scanned and undirected edges are
    /// reported by their canonical instance.
    pub fn find_edges(&self, query: &EdgeQuery<N>) -> EdgesIter<'_, N> {
        let pattern = (!query.attrs.is_empty()).then(|| query.attrs.clone());

        let src = query.src.as_ref().map(|src| self.node_id(src));
        let dst = query.dst.as_ref().map(|dst| self.node_id(dst));

        let candidates = match (src, dst) {
            // A given endpoint is absent from the graph.
            (Some(None), _) | (_, Some(None)) => Candidates::Empty,
            (Some(Some(src)), Some(Some(dst))) => match self.adjacency(src) {
                Some(adj) => Candidates::bucket(adj.bucket(dst, Direction::Outgoing)),
                None => Candidates::Empty,
            },
            (Some(Some(src)), None) => match self.adjacency(src) {
                Some(adj) => Candidates::around(adj, Direction::Outgoing),
                None => Candidates::Empty,
            },
            (None, Some(Some(dst))) => match self.adjacency(dst) {
                Some(adj) => Candidates::around(adj, Direction::Incoming),
                None => Candidates::Empty,
            },
            (None, None) => Candidates::Canonical(self.edges.iter().enumerate()),
        };

        EdgesIter::new(self, candidates, pattern)
    }

    /// The first edge matching the query.
    pub fn find_edge_by(&self, query: &EdgeQuery<N>) -> Option<EdgeId> {
        self.find_edges(query).next().map(|edge| edge.id)
    }
}

impl<N> Graph<N> {
    pub(crate) fn edge_between(
        &self,
        src: NodeId,
        dst: NodeId,
        pattern: Option<&Attrs>,
    ) -> Option<EdgeId> {
        self.adjacency(src)?
            .bucket(dst, Direction::Outgoing)
            .iter()
            .copied()
            .find(|id| {
                pattern
                    .map(|pattern| pattern.is_submap_of(self.attrs_of(*id)))
                    .unwrap_or(true)
            })
    }

    pub(crate) fn resolve_between(
        &self,
        src: NodeId,
        dst: NodeId,
        pattern: Option<&Attrs>,
        either_order: bool,
    ) -> Option<EdgeId> {
        self.edge_between(src, dst, pattern).or_else(|| {
            if either_order {
                self.edge_between(dst, src, pattern)
            } else {
                None
            }
        })
    }
}
