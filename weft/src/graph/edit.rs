use std::{hash::Hash, sync::Arc};

use tracing::{debug, trace};

use crate::core::{
    edge::{EdgeDesc, EdgeKind},
    error::InvalidDescription,
    id::{EdgeId, IdType, NodeId},
    marker::Direction,
    value::Attrs,
};

use super::{Adjacency, EdgeEntry, Graph};

impl<N: Clone + Eq + Hash> Graph<N> {
    fn adjacency_mut(&mut self, id: NodeId) -> Option<&mut Adjacency<N>> {
        self.nodes.get_mut(id.as_usize())?.as_mut().map(Arc::make_mut)
    }

    pub(crate) fn get_or_add_node(&mut self, node: N) -> (NodeId, bool) {
        if let Some(id) = self.node_id(&node) {
            return (id, false);
        }

        let id = NodeId::from_usize(self.nodes.len());
        self.nodes.push(Some(Arc::new(Adjacency::new(node.clone()))));
        self.lookup.insert(node, id);
        self.node_count += 1;

        trace!("Added node {}", id);
        (id, true)
    }

    /// Adds the node if it is not in the graph yet. Returns `true` if the
    /// node was added.
    pub fn add_node(&mut self, node: N) -> bool {
        self.get_or_add_node(node).1
    }

    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = N>) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Adds an edge, directed or undirected according to the mode of the
    /// graph.
    ///
    /// Missing endpoints are added. If the graph does not allow parallel
    /// edges and the endpoints are already connected, the attributes are
    /// merged into the existing edge instead (existing keys overwritten, new
    /// keys added) and its id is returned.
    ///
    /// ```
    /// use weft::{core::Value, graph::Graph};
    ///
    /// let mut graph = Graph::digraph();
    /// let edge = graph.add_edge(("a", "b", 1)).unwrap();
    ///
    /// assert_eq!(graph.add_edge(("a", "b", 5)), Ok(edge));
    /// assert_eq!(graph.weight(("a", "b")), Ok(Some(Value::Int(5))));
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn add_edge(
        &mut self,
        edge: impl Into<EdgeDesc<N>>,
    ) -> Result<EdgeId, InvalidDescription> {
        let directed = !self.mode.undirected;
        self.add_edge_as(edge.into(), directed)
    }

    /// Adds a directed edge regardless of the mode of the graph.
    pub fn add_directed_edge(
        &mut self,
        edge: impl Into<EdgeDesc<N>>,
    ) -> Result<EdgeId, InvalidDescription> {
        self.add_edge_as(edge.into(), true)
    }

    /// Adds an undirected edge regardless of the mode of the graph. Returns
    /// the id of the canonical instance.
    ///
    /// Without parallel edges, an existing edge between the endpoints in
    /// either order is merged with the new one. Directed edges are replaced
    /// by a single undirected edge carrying all their attributes followed by
    /// the new ones.
    pub fn add_undirected_edge(
        &mut self,
        edge: impl Into<EdgeDesc<N>>,
    ) -> Result<EdgeId, InvalidDescription> {
        self.add_edge_as(edge.into(), false)
    }

    pub(crate) fn add_edge_as(
        &mut self,
        desc: EdgeDesc<N>,
        directed: bool,
    ) -> Result<EdgeId, InvalidDescription> {
        let (src, dst, attrs) = desc.into_parts()?;

        let (src, _) = self.get_or_add_node(src);
        let (dst, _) = self.get_or_add_node(dst);

        if directed {
            Ok(self.merge_or_insert_directed(src, dst, attrs))
        } else {
            Ok(self.merge_or_insert_undirected(src, dst, attrs))
        }
    }

    fn merge_or_insert_directed(
        &mut self,
        src: NodeId,
        dst: NodeId,
        attrs: Option<Attrs>,
    ) -> EdgeId {
        if !self.mode.parallel_edges {
            if let Some(existing) = self.edge_between(src, dst, None) {
                self.merge_attrs(existing, attrs);
                return existing;
            }
        }

        self.insert_directed(src, dst, attrs)
    }

    fn merge_or_insert_undirected(
        &mut self,
        src: NodeId,
        dst: NodeId,
        attrs: Option<Attrs>,
    ) -> EdgeId {
        if self.mode.parallel_edges {
            return self.insert_undirected(src, dst, attrs);
        }

        let mut existing = self.instances_between(src, dst, Direction::Outgoing);
        if src != dst {
            existing.extend(self.instances_between(dst, src, Direction::Outgoing));
        }

        let undirected = existing
            .iter()
            .copied()
            .find(|id| matches!(self.entry(*id), Some(entry) if !entry.kind.is_directed()));

        if let Some(existing) = undirected {
            self.merge_attrs(existing, attrs);
            return self.attr_key(existing);
        }

        if existing.is_empty() {
            return self.insert_undirected(src, dst, attrs);
        }

        // Only directed edges connect the endpoints. They are replaced by a
        // single undirected edge.
        let mut combined = Attrs::new();
        for id in existing {
            if let Some(previous) = self.remove_edge_by_id(id) {
                combined.merge(previous);
            }
        }

        if let Some(attrs) = attrs {
            combined.merge(attrs);
        }

        let id = self.insert_undirected(src, dst, Some(combined));
        trace!("Replaced directed edges between {} and {} with {}", src, dst, id);
        id
    }

    fn instances_between(&self, src: NodeId, dst: NodeId, dir: Direction) -> Vec<EdgeId> {
        self.adjacency(src)
            .map(|adj| adj.bucket(dst, dir).to_vec())
            .unwrap_or_default()
    }

    fn merge_attrs(&mut self, id: EdgeId, attrs: Option<Attrs>) {
        let key = self.attr_key(id);

        if let Some(attrs) = attrs.filter(|attrs| !attrs.is_empty()) {
            self.edge_attrs.entry(key).or_default().merge(attrs);
        }

        trace!("Merged into edge {}", key);
    }

    fn store_attrs(&mut self, id: EdgeId, attrs: Option<Attrs>) {
        if let Some(attrs) = attrs.filter(|attrs| !attrs.is_empty()) {
            self.edge_attrs.insert(id, attrs);
        }
    }

    fn insert_directed(&mut self, src: NodeId, dst: NodeId, attrs: Option<Attrs>) -> EdgeId {
        let id = EdgeId::from_usize(self.edges.len());

        self.edges.push(Some(EdgeEntry {
            src,
            dst,
            kind: EdgeKind::Directed,
        }));
        self.connect(id, src, dst);
        self.store_attrs(id, attrs);
        self.edge_count += 1;

        trace!("Added directed edge {} from {} to {}", id, src, dst);
        id
    }

    fn insert_undirected(&mut self, src: NodeId, dst: NodeId, attrs: Option<Attrs>) -> EdgeId {
        let forward = EdgeId::from_usize(self.edges.len());
        let mirror = EdgeId::from_usize(self.edges.len() + 1);

        self.edges.push(Some(EdgeEntry {
            src,
            dst,
            kind: EdgeKind::Undirected {
                mirror,
                canonical: true,
            },
        }));
        self.edges.push(Some(EdgeEntry {
            src: dst,
            dst: src,
            kind: EdgeKind::Undirected {
                mirror: forward,
                canonical: false,
            },
        }));

        self.connect(forward, src, dst);
        self.connect(mirror, dst, src);
        self.store_attrs(forward, attrs);
        self.edge_count += 1;

        trace!(
            "Added undirected edge {} (mirror {}) between {} and {}",
            forward,
            mirror,
            src,
            dst
        );
        forward
    }

    fn connect(&mut self, id: EdgeId, src: NodeId, dst: NodeId) {
        if let Some(adj) = self.adjacency_mut(src) {
            adj.connect(dst, id, Direction::Outgoing);
        }
        if let Some(adj) = self.adjacency_mut(dst) {
            adj.connect(src, id, Direction::Incoming);
        }
    }

    fn detach(&mut self, id: EdgeId) {
        let Some(entry) = self.edges.get_mut(id.as_usize()).and_then(Option::take) else {
            return;
        };

        if let Some(adj) = self.adjacency_mut(entry.src) {
            adj.disconnect(entry.dst, id, Direction::Outgoing);
        }
        if let Some(adj) = self.adjacency_mut(entry.dst) {
            adj.disconnect(entry.src, id, Direction::Incoming);
        }
    }

    /// Removes the edge together with its mirror. Returns its attribute bag,
    /// or `None` if the edge does not exist.
    pub(crate) fn remove_edge_by_id(&mut self, id: EdgeId) -> Option<Attrs> {
        let entry = *self.entry(id)?;
        let key = self.attr_key(id);

        self.detach(id);
        if let Some(mirror) = entry.kind.mirror() {
            self.detach(mirror);
        }

        self.edge_count -= 1;
        trace!("Removed edge {} from {} to {}", id, entry.src, entry.dst);

        Some(self.edge_attrs.remove(&key).unwrap_or_default())
    }

    /// Removes the described edge, both instances for an undirected one.
    ///
    /// Returns the attributes of the removed edge, or `None` if the
    /// description did not resolve to an edge.
    pub fn remove_edge(
        &mut self,
        edge: impl Into<EdgeDesc<N>>,
    ) -> Result<Option<Attrs>, InvalidDescription> {
        let id = self.find_edge_desc(&edge.into())?;
        Ok(id.and_then(|id| self.remove_edge_by_id(id)))
    }

    /// Removes all described edges and returns how many were removed.
    ///
    /// Every description is validated before any edge is removed.
    pub fn remove_edges<E: Into<EdgeDesc<N>>>(
        &mut self,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<usize, InvalidDescription> {
        let descs = edges.into_iter().map(Into::into).collect::<Vec<_>>();
        for desc in descs.iter() {
            desc.pattern()?;
        }

        let mut removed = 0;
        for desc in descs {
            if let Some(id) = self.find_edge_desc(&desc)? {
                self.remove_edge_by_id(id);
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Removes the node with all its incident edges. Returns `true` if the
    /// node was in the graph.
    pub fn remove_node(&mut self, node: &N) -> bool {
        let Some(id) = self.node_id(node) else {
            return false;
        };

        let incident = self
            .adjacency(id)
            .map(|adj| adj.incident_edges().collect::<Vec<_>>())
            .unwrap_or_default();

        // Mirrors and self-loops are listed twice, the second removal is a
        // no-op.
        for edge in incident {
            self.remove_edge_by_id(edge);
        }

        self.nodes[id.as_usize()] = None;
        self.lookup.remove(node);
        self.node_attrs.remove(&id);
        self.node_count -= 1;

        trace!("Removed node {}", id);
        true
    }

    /// Removes the nodes and returns how many of them were in the graph.
    pub fn remove_nodes(&mut self, nodes: impl IntoIterator<Item = N>) -> usize {
        nodes
            .into_iter()
            .filter(|node| self.remove_node(node))
            .count()
    }

    /// Keeps only the nodes for which the predicate returns `true`.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&N) -> bool) {
        let removed = self
            .nodes()
            .filter(|node| !keep(node))
            .cloned()
            .collect::<Vec<_>>();

        self.remove_nodes(removed);
    }

    /// Removes all nodes, edges and attributes. The mode is kept.
    pub fn clear(&mut self) {
        debug!(
            "Clearing graph with {} nodes and {} edges",
            self.node_count, self.edge_count
        );
        *self = Self::new(self.mode);
    }
}
