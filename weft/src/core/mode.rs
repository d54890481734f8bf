/// The two flags fixed when a graph is created.
///
/// `parallel_edges` decides whether adding an edge between already connected
/// endpoints creates a new edge or merges the attributes into the existing
/// one. `undirected` decides the directedness of edges added by
/// [`Graph::add_edge`](crate::graph::Graph::add_edge); the forcing variants
/// ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode {
    pub parallel_edges: bool,
    pub undirected: bool,
}

impl Mode {
    pub const SIMPLE: Mode = Mode::new(false, true);
    pub const DIGRAPH: Mode = Mode::new(false, false);
    pub const MULTIGRAPH: Mode = Mode::new(true, true);
    pub const MULTIDIGRAPH: Mode = Mode::new(true, false);

    pub const fn new(parallel_edges: bool, undirected: bool) -> Self {
        Self {
            parallel_edges,
            undirected,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::SIMPLE
    }
}
