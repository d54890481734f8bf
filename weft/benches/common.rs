#![allow(dead_code)]

use fastrand::Rng;
use weft::{core::Mode, graph::Graph};

pub const RANDOM_SEED: u64 = 0xef6f79ed30ba75a;

pub const MODES: [&str; 4] = ["simple", "digraph", "multigraph", "multidigraph"];

pub fn mode(name: &str) -> Mode {
    match name {
        "digraph" => Mode::DIGRAPH,
        "multigraph" => Mode::MULTIGRAPH,
        "multidigraph" => Mode::MULTIDIGRAPH,
        _ => Mode::SIMPLE,
    }
}

pub struct RandomEdges {
    v: usize,
    w: usize,
    n: usize,
    p: f32,
}

impl RandomEdges {
    pub fn new(node_bound: usize, p: f32) -> Self {
        Self {
            v: 1,
            w: usize::MAX,
            n: node_bound,
            p,
        }
    }

    // Geometric skipping over the pairs of the lower triangle.
    pub fn next_edge(&mut self, rng: &mut Rng) -> Option<(usize, usize)> {
        let Self { v, w, n, p } = self;

        if *v >= *n {
            return None;
        }

        let r = rng.f32();
        *w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - *p).log10()).floor() as usize;

        while *w >= *v && *v < *n {
            *w -= *v;
            *v += 1;
        }

        if *v < *n {
            Some((*v, *w))
        } else {
            None
        }
    }
}

pub fn random_graph(mode: Mode, node_count: usize, density: f32, rng: &mut Rng) -> Graph<usize> {
    let mut graph = Graph::new(mode);
    graph.add_nodes(0..node_count);

    let mut edges = RandomEdges::new(node_count, density);

    while let Some((u, v)) = edges.next_edge(rng) {
        let _ = graph.add_edge((u, v, f64::from(rng.f32())));
    }

    graph
}
