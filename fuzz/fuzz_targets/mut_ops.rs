#![no_main]

use libfuzzer_sys::fuzz_target;

use weft::{
    core::Mode,
    graph::Graph,
    infra::{ops::MutOpsSeq, testing::check_consistency},
};

fuzz_target!(|ops: MutOpsSeq<u8>| {
    for mode in [
        Mode::SIMPLE,
        Mode::DIGRAPH,
        Mode::MULTIGRAPH,
        Mode::MULTIDIGRAPH,
    ] {
        let mut graph = Graph::new(mode);

        for op in ops.clone() {
            let _ = op.apply(&mut graph);
            check_consistency(&graph)
                .as_ref()
                .map_err(ToString::to_string)
                .unwrap();
        }
    }
});
