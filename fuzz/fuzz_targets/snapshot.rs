#![no_main]

use libfuzzer_sys::fuzz_target;

use weft::{
    core::Mode,
    graph::Graph,
    infra::{ops::MutOpsSeq, testing::check_consistency},
};

// Edits applied after taking a snapshot must never be observable through it.
fuzz_target!(|input: (MutOpsSeq<u8>, MutOpsSeq<u8>)| {
    let (before, after) = input;

    for mode in [Mode::SIMPLE, Mode::MULTIDIGRAPH] {
        let mut graph = Graph::new(mode);
        for op in before.clone() {
            let _ = op.apply(&mut graph);
        }

        let snapshot = graph.clone();
        let expected = graph.to_dot();

        for op in after.clone() {
            let _ = op.apply(&mut graph);
        }

        assert_eq!(snapshot.to_dot(), expected);
        check_consistency(&snapshot)
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();
    }
});
