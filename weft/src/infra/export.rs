use std::{
    collections::HashMap,
    fmt::Display,
    hash::Hash,
    io::{self, Cursor, Write},
};

use crate::{
    core::{
        id::{IdType, NodeId},
        value::Attrs,
    },
    graph::Graph,
};

pub trait Export<G> {
    fn export<W: Write>(&self, graph: &G, out: &mut W) -> io::Result<()>;
}

/// Graphviz DOT export.
///
/// The graph is written as `graph` if all its edges are undirected and its
/// mode is undirected, otherwise as `digraph` with undirected edges rendered
/// with `dir=none`. Attributes are rendered as DOT attributes.
pub struct Dot<N> {
    name: String,
    get_node_label: Box<dyn Fn(&N) -> String>,
}

impl<N> Dot<N> {
    pub fn new<F>(name: Option<String>, get_node_label: F) -> Self
    where
        F: Fn(&N) -> String + 'static,
    {
        Self {
            name: name.unwrap_or_else(|| String::from("G")),
            get_node_label: Box::new(get_node_label),
        }
    }

    pub fn to_string(&self, graph: &Graph<N>) -> String
    where
        N: Eq + Hash,
    {
        let mut cursor = Cursor::new(Vec::new());
        self.export(graph, &mut cursor)
            .expect("writing to vec in cursor does not fail");

        String::from_utf8(cursor.into_inner()).expect("dot format is text format")
    }
}

impl<N: Display> Dot<N> {
    pub fn with_display(name: Option<String>) -> Self {
        Self::new(name, |n| format!("{n}"))
    }
}

impl<N: Eq + Hash> Export<Graph<N>> for Dot<N> {
    fn export<W: Write>(&self, graph: &Graph<N>, out: &mut W) -> io::Result<()> {
        let directed =
            !graph.is_undirected_by_default() || graph.edges().any(|edge| edge.is_directed());

        if directed {
            out.write_all(b"digraph ")?;
        } else {
            out.write_all(b"graph ")?;
        }

        let mut indexer = Indexer::new();

        out.write_all(self.name.as_bytes())?;
        out.write_all(b" {\n")?;

        for (id, adj) in graph.nodes.iter().enumerate() {
            let Some(adj) = adj else {
                continue;
            };

            let id = NodeId::from_usize(id);
            let mut attrs = vec![format!("label={:?}", (self.get_node_label)(&adj.node))];
            attrs.extend(render_attrs(graph.node_attrs.get(&id)));

            writeln!(out, "    v{} [{}];", indexer.get(id), attrs.join(", "))?;
        }

        let line = if directed { "->" } else { "--" };

        for edge in graph.edges() {
            let (Some(src), Some(dst)) = (graph.node_id(edge.src), graph.node_id(edge.dst)) else {
                continue;
            };

            let mut attrs = render_attrs(Some(edge.attrs));
            if directed && !edge.is_directed() {
                attrs.push(String::from("dir=none"));
            }

            write!(out, "    v{} {} v{}", indexer.get(src), line, indexer.get(dst))?;
            if attrs.is_empty() {
                writeln!(out, ";")?;
            } else {
                writeln!(out, " [{}];", attrs.join(", "))?;
            }
        }

        out.write_all(b"}\n")?;

        Ok(())
    }
}

fn render_attrs(attrs: Option<&Attrs>) -> Vec<String> {
    attrs
        .into_iter()
        .flatten()
        .map(|(key, value)| {
            let value = match value.as_str() {
                Some(s) => format!("{s:?}"),
                None => value.to_string(),
            };

            if key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                format!("{key}={value}")
            } else {
                format!("{key:?}={value}")
            }
        })
        .collect()
}

impl<N: Display + Eq + Hash> Graph<N> {
    /// The graph in Graphviz DOT format, see [`Dot`].
    pub fn to_dot(&self) -> String {
        Dot::with_display(None).to_string(self)
    }
}

#[derive(Debug)]
struct Indexer(HashMap<NodeId, usize>);

impl Indexer {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&mut self, id: NodeId) -> usize {
        let new_idx = self.0.len();
        *self.0.entry(id).or_insert(new_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Target;

    #[test]
    fn undirected() {
        let mut graph = Graph::simple();
        graph.add_edge(("a", "b", 2)).unwrap();
        graph.add_attr(Target::node("a"), "color", "red").unwrap();

        assert_eq!(
            graph.to_dot(),
            concat!(
                "graph G {\n",
                "    v0 [label=\"a\", color=\"red\"];\n",
                "    v1 [label=\"b\"];\n",
                "    v0 -- v1 [weight=2];\n",
                "}\n",
            )
        );
    }

    #[test]
    fn mixed() {
        let mut graph = Graph::digraph();
        graph.add_edge(("a", "b")).unwrap();
        graph
            .add_undirected_edge(("b", "c", Attrs::from([("edge label", "x")])))
            .unwrap();

        let dot = Dot::new(Some(String::from("Mixed")), |n: &&str| n.to_uppercase())
            .to_string(&graph);

        assert_eq!(
            dot,
            concat!(
                "digraph Mixed {\n",
                "    v0 [label=\"A\"];\n",
                "    v1 [label=\"B\"];\n",
                "    v2 [label=\"C\"];\n",
                "    v0 -> v1;\n",
                "    v1 -> v2 [\"edge label\"=\"x\", dir=none];\n",
                "}\n",
            )
        );
    }
}
