mod common;

use common::{mode, random_graph, RandomEdges, MODES, RANDOM_SEED};
use fastrand::Rng;
use weft::graph::{EdgeQuery, Graph};

fn main() {
    divan::main();
}

#[divan::bench(consts = [100, 1000], args = MODES)]
fn add_remove<const N: usize>(mode_name: &str) {
    let mut rng = Rng::with_seed(RANDOM_SEED);
    let density = 0.1;

    let mut graph = Graph::new(mode(mode_name));
    graph.add_nodes(0..N);

    let mut edges = RandomEdges::new(N, density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        let _ = graph.add_edge((u, v, f64::from(rng.f32())));
    }

    for _ in 0..(N / 4) {
        graph.remove_node(&rng.usize(..N));
    }

    let mut edges = RandomEdges::new(N / 4, density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        let _ = graph.remove_edge((u, v));
    }
}

#[divan::bench(consts = [100, 1000], args = MODES)]
fn snapshot_then_edit<const N: usize>(bencher: divan::Bencher, mode_name: &str) {
    let mut rng = Rng::with_seed(RANDOM_SEED);
    let graph = random_graph(mode(mode_name), N, 0.1, &mut rng);

    bencher.bench_local(|| {
        let mut snapshot = graph.clone();
        let _ = snapshot.add_edge((0, N - 1, 1));
        snapshot
    });
}

#[divan::bench(consts = [100, 1000])]
fn transpose<const N: usize>(bencher: divan::Bencher) {
    let mut rng = Rng::with_seed(RANDOM_SEED);
    let graph = random_graph(mode("multidigraph"), N, 0.1, &mut rng);

    bencher.bench_local(|| graph.transpose());
}

#[divan::bench(consts = [100, 1000])]
fn query_by_source<const N: usize>(bencher: divan::Bencher) {
    let mut rng = Rng::with_seed(RANDOM_SEED);
    let graph = random_graph(mode("digraph"), N, 0.1, &mut rng);

    bencher.bench_local(|| {
        (0..N)
            .map(|src| {
                graph
                    .find_edges(&EdgeQuery::new().src(src).attr("weight", 0.5))
                    .count()
            })
            .sum::<usize>()
    });
}
