//! Persistent graph with directed, undirected and mixed edges, optional
//! parallel edges and attributes on nodes and edges.
//!
//! ```
//! use weft::prelude::*;
//!
//! let mut graph = Graph::digraph();
//! graph.add_edge(("A", "B", 1)).unwrap();
//! graph.add_edge(("B", "C", 2)).unwrap();
//!
//! let snapshot = graph.clone();
//! graph.add_edge(("A", "B", 5)).unwrap();
//!
//! assert_eq!(graph.weight(("A", "B")), Ok(Some(Value::Int(5))));
//! assert_eq!(snapshot.weight(("A", "B")), Ok(Some(Value::Int(1))));
//! assert_eq!(graph.edges().count(), 2);
//! ```

pub mod adapt;
pub mod core;
pub mod graph;
pub mod infra;

pub mod prelude {
    pub use crate::{
        core::{Attrs, EdgeDesc, EdgeId, EdgeRef, Mode, NodeId, Value},
        graph::{EdgeQuery, Graph, Init, Target},
    };
}
