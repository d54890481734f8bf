use std::hash::Hash;

use tracing::trace;

use crate::core::{
    edge::EdgeDesc,
    error::{InvalidTarget, InvalidTargetKind},
    id::{EdgeId, NodeId},
    value::{Attrs, Value, EMPTY_ATTRS},
};

use super::Graph;

/// Subject of an attribute operation: a node or an edge description.
#[derive(Debug, Clone, PartialEq)]
pub enum Target<N> {
    Node(N),
    Edge(EdgeDesc<N>),
}

impl<N> Target<N> {
    pub fn node(node: N) -> Self {
        Target::Node(node)
    }

    pub fn edge(edge: impl Into<EdgeDesc<N>>) -> Self {
        Target::Edge(edge.into())
    }
}

impl<N> From<EdgeId> for Target<N> {
    fn from(id: EdgeId) -> Self {
        Target::Edge(EdgeDesc::Id(id))
    }
}

impl<N> From<EdgeDesc<N>> for Target<N> {
    fn from(desc: EdgeDesc<N>) -> Self {
        Target::Edge(desc)
    }
}

impl<N> From<(N, N)> for Target<N> {
    fn from(pair: (N, N)) -> Self {
        Target::Edge(pair.into())
    }
}

impl<N> From<(N, N, Attrs)> for Target<N> {
    fn from(triple: (N, N, Attrs)) -> Self {
        Target::Edge(triple.into())
    }
}

macro_rules! impl_weighted_target {
    ($($ty:ty),*) => {
        $(
            impl<N> From<(N, N, $ty)> for Target<N> {
                fn from(triple: (N, N, $ty)) -> Self {
                    Target::Edge(triple.into())
                }
            }
        )*
    };
}

impl_weighted_target!(Value, i64, i32, u32, u8, f64, f32);

// Attribute storage slot a target resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Node(NodeId),
    Edge(EdgeId),
}

impl<N: Eq + Hash> Graph<N> {
    fn resolve_target(&self, target: &Target<N>) -> Result<Key, InvalidTarget> {
        match target {
            Target::Node(node) => self
                .node_id(node)
                .map(Key::Node)
                .ok_or(InvalidTarget::new(InvalidTargetKind::NodeAbsent)),
            Target::Edge(desc) => self
                .find_edge_desc(desc)?
                .map(|id| Key::Edge(self.attr_key(id)))
                .ok_or(InvalidTarget::new(InvalidTargetKind::EdgeAbsent)),
        }
    }

    fn bag(&self, key: Key) -> Option<&Attrs> {
        match key {
            Key::Node(id) => self.node_attrs.get(&id),
            Key::Edge(id) => self.edge_attrs.get(&id),
        }
    }

    fn bag_mut(&mut self, key: Key) -> &mut Attrs {
        match key {
            Key::Node(id) => self.node_attrs.entry(id).or_default(),
            Key::Edge(id) => self.edge_attrs.entry(id).or_default(),
        }
    }

    fn drop_if_empty(&mut self, key: Key) {
        match key {
            Key::Node(id) => {
                if self.node_attrs.get(&id).is_some_and(Attrs::is_empty) {
                    self.node_attrs.remove(&id);
                }
            }
            Key::Edge(id) => {
                if self.edge_attrs.get(&id).is_some_and(Attrs::is_empty) {
                    self.edge_attrs.remove(&id);
                }
            }
        }
    }

    /// Sets an attribute of a node or an edge. Returns the previous value.
    ///
    /// The target must exist; attribute operations never add nodes or edges.
    /// Attributes of an undirected edge are shared by both its instances.
    ///
    /// ```
    /// use weft::{core::Value, graph::{Graph, Target}};
    ///
    /// let mut graph = Graph::simple();
    /// graph.add_edge(("a", "b")).unwrap();
    ///
    /// graph.add_attr(("a", "b"), "color", "red").unwrap();
    /// graph.add_attr(Target::node("a"), "label", "start").unwrap();
    ///
    /// assert_eq!(graph.attr(("b", "a"), "color"), Ok(Some(&Value::from("red"))));
    /// assert!(graph.add_attr(Target::node("z"), "label", "none").is_err());
    /// ```
    pub fn add_attr(
        &mut self,
        target: impl Into<Target<N>>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, InvalidTarget> {
        let slot = self.resolve_target(&target.into())?;
        let key = key.into();

        trace!("Setting attribute {} on {:?}", key, slot);
        Ok(self.bag_mut(slot).insert(key, value))
    }

    /// Merges a bag into the attributes of a node or an edge.
    pub fn add_attrs(
        &mut self,
        target: impl Into<Target<N>>,
        attrs: Attrs,
    ) -> Result<(), InvalidTarget> {
        let slot = self.resolve_target(&target.into())?;

        if !attrs.is_empty() {
            self.bag_mut(slot).merge(attrs);
        }

        Ok(())
    }

    /// Removes an attribute and returns its value.
    pub fn remove_attr(
        &mut self,
        target: impl Into<Target<N>>,
        key: &str,
    ) -> Result<Option<Value>, InvalidTarget> {
        let slot = self.resolve_target(&target.into())?;

        let removed = match slot {
            Key::Node(id) => self.node_attrs.get_mut(&id).and_then(|bag| bag.remove(key)),
            Key::Edge(id) => self.edge_attrs.get_mut(&id).and_then(|bag| bag.remove(key)),
        };
        self.drop_if_empty(slot);

        Ok(removed)
    }

    pub fn attr(
        &self,
        target: impl Into<Target<N>>,
        key: &str,
    ) -> Result<Option<&Value>, InvalidTarget> {
        let slot = self.resolve_target(&target.into())?;
        Ok(self.bag(slot).and_then(|bag| bag.get(key)))
    }

    /// All attributes of a node or an edge, possibly empty.
    pub fn attrs(&self, target: impl Into<Target<N>>) -> Result<&Attrs, InvalidTarget> {
        let slot = self.resolve_target(&target.into())?;
        Ok(self.bag(slot).unwrap_or(&EMPTY_ATTRS))
    }

    /// Sets the attribute on every given node.
    ///
    /// All nodes are resolved first, so either every node receives the
    /// attribute or, if some node is absent, none does.
    pub fn add_attr_to_nodes(
        &mut self,
        nodes: impl IntoIterator<Item = N>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), InvalidTarget> {
        let slots = nodes
            .into_iter()
            .map(|node| self.resolve_target(&Target::Node(node)))
            .collect::<Result<Vec<_>, _>>()?;

        self.set_on_all(slots, key.into(), value.into());
        Ok(())
    }

    /// Sets the attribute on every described edge, with the same all-or-none
    /// semantics as [`add_attr_to_nodes`](Graph::add_attr_to_nodes).
    pub fn add_attr_to_edges<E: Into<EdgeDesc<N>>>(
        &mut self,
        edges: impl IntoIterator<Item = E>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), InvalidTarget> {
        let slots = edges
            .into_iter()
            .map(|edge| self.resolve_target(&Target::Edge(edge.into())))
            .collect::<Result<Vec<_>, _>>()?;

        self.set_on_all(slots, key.into(), value.into());
        Ok(())
    }

    fn set_on_all(&mut self, slots: Vec<Key>, key: String, value: Value) {
        for slot in slots {
            self.bag_mut(slot).insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::core::error::InvalidDescriptionKind;

    #[test]
    fn node_attrs() {
        let mut graph = Graph::digraph();
        graph.add_node("a");

        assert_eq!(graph.add_attr(Target::node("a"), "color", "red"), Ok(None));
        assert_eq!(
            graph.add_attr(Target::node("a"), "color", "blue"),
            Ok(Some(Value::from("red")))
        );
        assert_eq!(
            graph.attr(Target::node("a"), "color"),
            Ok(Some(&Value::from("blue")))
        );
        assert_eq!(graph.attr(Target::node("a"), "size"), Ok(None));

        assert_eq!(
            graph.remove_attr(Target::node("a"), "color"),
            Ok(Some(Value::from("blue")))
        );
        assert!(graph.node_attrs.is_empty());
        assert_eq!(graph.attrs(Target::node("a")), Ok(&Attrs::new()));
    }

    #[test]
    fn edge_attrs_shared_by_mirror() {
        let mut graph = Graph::simple();
        let id = graph.add_edge(("a", "b")).unwrap();
        let mirror = graph.mirror_edge(id).unwrap();

        graph.add_attr(mirror, "color", "red").unwrap();
        graph.add_attrs(id, Attrs::from([("weight", 3)])).unwrap();

        assert_eq!(graph.attr(id, "color"), Ok(Some(&Value::from("red"))));
        assert_eq!(graph.attrs(mirror).unwrap().len(), 2);
        assert_eq!(graph.weight(("b", "a")), Ok(Some(Value::Int(3))));
        assert_eq!(graph.edge_attrs.len(), 1);
    }

    #[test]
    fn weighted_description_as_target() {
        let mut graph = Graph::multidigraph();
        let light = graph.add_edge(("a", "b", 1)).unwrap();
        let heavy = graph.add_edge(("a", "b", 5)).unwrap();

        graph.add_attr(("a", "b", 5), "color", "red").unwrap();

        assert_eq!(graph.attr(heavy, "color"), Ok(Some(&Value::from("red"))));
        assert_eq!(graph.attr(light, "color"), Ok(None));
        assert_eq!(
            graph.attr(("a", "b", 5.0), "color"),
            Ok(Some(&Value::from("red")))
        );
        assert_eq!(
            graph.remove_attr(("a", "b", Value::Int(5)), "color"),
            Ok(Some(Value::from("red")))
        );
        assert_matches!(
            graph.attrs(("a", "b", 3)),
            Err(InvalidTarget {
                kind: InvalidTargetKind::EdgeAbsent
            })
        );
    }

    #[test]
    fn attrs_do_not_alter_structure() {
        let mut graph = Graph::digraph();
        graph.add_edge(("a", "b")).unwrap();
        let before = graph.edges().map(|edge| edge.id).collect::<Vec<_>>();

        graph.add_attr(("a", "b"), "color", "red").unwrap();

        assert_eq!(graph.edges().map(|edge| edge.id).collect::<Vec<_>>(), before);
        assert_eq!(graph.out_degree(&"a"), 1);
    }

    #[test]
    fn invalid_targets() {
        let mut graph = Graph::digraph();
        graph.add_edge(("a", "b", 1)).unwrap();

        assert_matches!(
            graph.add_attr(Target::node("z"), "color", "red"),
            Err(InvalidTarget {
                kind: InvalidTargetKind::NodeAbsent
            })
        );
        assert_matches!(
            graph.attr(("b", "a"), "weight"),
            Err(InvalidTarget {
                kind: InvalidTargetKind::EdgeAbsent
            })
        );
        assert_matches!(
            graph.attrs(Target::edge(("a", "b", Value::from("x")))),
            Err(InvalidTarget {
                kind: InvalidTargetKind::Description(InvalidDescriptionKind::NonNumericWeight)
            })
        );
        assert_matches!(
            graph.remove_attr(EdgeId::from(42), "weight"),
            Err(InvalidTarget {
                kind: InvalidTargetKind::EdgeAbsent
            })
        );

        assert!(!graph.has_node(&"z"));
    }

    #[test]
    fn bulk_is_all_or_nothing() {
        let mut graph = Graph::digraph();
        graph.add_edge(("a", "b")).unwrap();
        graph.add_edge(("b", "c")).unwrap();

        assert!(graph
            .add_attr_to_nodes(["a", "z"], "visited", true)
            .is_err());
        assert_eq!(graph.attrs(Target::node("a")), Ok(&Attrs::new()));

        graph.add_attr_to_nodes(["a", "c"], "visited", true).unwrap();
        assert_eq!(
            graph.attr(Target::node("c"), "visited"),
            Ok(Some(&Value::Bool(true)))
        );

        assert!(graph
            .add_attr_to_edges([("a", "b"), ("c", "a")], "weight", 2)
            .is_err());
        assert_eq!(graph.weight(("a", "b")), Ok(Some(Value::Int(1))));

        graph
            .add_attr_to_edges([("a", "b"), ("b", "c")], "weight", 2)
            .unwrap();
        assert!(graph
            .edges()
            .all(|edge| edge.weight() == Value::Int(2)));
    }
}
