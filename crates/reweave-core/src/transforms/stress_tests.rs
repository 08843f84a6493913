//! Stress tests — systematically exercise the passes on varied graph shapes.
//!
//! These tests generate graphs programmatically with varying chain lengths,
//! cast arities, and type mixes, then verify:
//! 1. No panics, and output stays well-formed
//! 2. Worklist step counts stay bounded by the graph size (termination)
//! 3. Passes are idempotent (second run reports no changes)

use crate::ir::builder::GraphBuilder;
use crate::ir::{Graph, Module, OpKind, Type};
use crate::pipeline::{PassConfig, Transform};
use crate::transforms::reconcile_casts::reconcile_graph;
use crate::transforms::util::test_helpers::assert_well_formed;
use crate::transforms::{default_pipeline, ReconcileCasts};

/// Distinct stage representations to chain through.
fn stage_types() -> Vec<Type> {
    vec![
        Type::Struct("obj".into()),
        Type::Word,
        Type::Handle("rt".into()),
        Type::Int(64),
        Type::String,
        Type::Bool,
    ]
}

/// A chain of `k` casts from an argument of `types[0]` through distinct
/// intermediate types and back to `types[0]`, anchored by a sink.
fn build_round_trip_chain(k: usize) -> Graph {
    let types = stage_types();
    assert!(k < types.len());
    let mut b = GraphBuilder::new("chain");
    let origin = b.argument(types[0].clone());
    let mut current = origin;
    for i in 1..k {
        current = b.cast1(current, types[i].clone());
    }
    current = b.cast1(current, types[0].clone());
    b.sink("io.print", &[current]);
    b.build()
}

/// A chain of `k` casts that never revisits a type, anchored by a sink.
fn build_one_way_chain(k: usize) -> Graph {
    let types = stage_types();
    assert!(k < types.len());
    let mut b = GraphBuilder::new("one_way");
    let mut current = b.argument(types[0].clone());
    for ty in types.iter().take(k + 1).skip(1) {
        current = b.cast1(current, ty.clone());
    }
    b.sink("io.print", &[current]);
    b.build()
}

/// A ring of `n` casts, each consuming the previous one's result, with a
/// sink keeping the ring alive. No slot can resolve.
fn build_cast_ring(n: usize) -> Graph {
    let types = stage_types();
    assert!(n <= types.len());
    let mut g = Graph::new("ring");
    let seed = g.add_argument(types[0].clone());
    let casts: Vec<_> = (0..n)
        .map(|i| {
            g.add_op(
                OpKind::Cast,
                true,
                vec![seed],
                vec![types[(i + 1) % n].clone()],
            )
        })
        .collect();
    for i in 0..n {
        let prev = casts[(i + n - 1) % n];
        let prev_out = g.op(prev).results[0];
        g.replace_operand(casts[i], 0, prev_out);
    }
    let anchor = g.op(casts[0]).results[0];
    g.add_op(OpKind::Opaque("io.print".into()), false, vec![anchor], vec![]);
    g
}

/// A single wide cast where every even slot is an identity and every odd
/// slot is a genuine conversion.
fn build_wide_cast(slots: usize) -> Graph {
    let mut b = GraphBuilder::new("wide");
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for i in 0..slots {
        if i % 2 == 0 {
            inputs.push(b.argument(Type::Word));
            outputs.push(Type::Word);
        } else {
            inputs.push(b.argument(Type::Int(32)));
            outputs.push(Type::Bool);
        }
    }
    let outs = b.cast(&inputs, &outputs);
    b.sink("io.print", &outs);
    b.build()
}

#[test]
fn round_trip_chains_fold_within_step_budget() {
    for k in 1..=4 {
        let mut g = build_round_trip_chain(k);
        let origin = g.arguments()[0];
        let stats = reconcile_graph(&mut g).unwrap();
        assert_well_formed(&g);
        assert!(stats.changed, "chain of {k} should fold");
        assert!(g.cast_ops().is_empty(), "chain of {k} left casts behind");
        // Each cast is popped at most twice: once seeded, once after the
        // rewrite that kills its consumer.
        assert!(
            stats.steps <= 2 * k,
            "chain of {k} took {} steps",
            stats.steps
        );
        // The sink survives and consumes the original value.
        let (_, sink) = g.live_ops().next().unwrap();
        assert_eq!(sink.operands, vec![origin]);
    }
}

#[test]
fn one_way_chains_survive_untouched() {
    for k in 1..=5 {
        let mut g = build_one_way_chain(k);
        let stats = reconcile_graph(&mut g).unwrap();
        assert_well_formed(&g);
        assert!(!stats.changed);
        assert_eq!(g.cast_ops().len(), k);
        assert_eq!(stats.steps, k, "no rewrite should re-enqueue anything");
    }
}

#[test]
fn cast_rings_terminate() {
    for n in 2..=6 {
        let mut g = build_cast_ring(n);
        let stats = reconcile_graph(&mut g).unwrap();
        assert_well_formed(&g);
        assert!(!stats.changed);
        assert_eq!(g.cast_ops().len(), n);
        assert!(stats.steps <= n + 1, "ring of {n} took {} steps", stats.steps);
    }
}

#[test]
fn wide_casts_narrow_to_unresolved_slots() {
    for slots in 2..=8 {
        let mut g = build_wide_cast(slots);
        let stats = reconcile_graph(&mut g).unwrap();
        assert_well_formed(&g);
        assert!(stats.changed);
        let casts = g.cast_ops();
        assert_eq!(casts.len(), 1);
        let narrowed = g.op(casts[0]);
        assert_eq!(narrowed.operands.len(), slots / 2);
        assert_eq!(narrowed.results.len(), slots / 2);
    }
}

#[test]
fn reconcile_is_idempotent_across_shapes() {
    let shapes: Vec<Graph> = (1..=4)
        .map(build_round_trip_chain)
        .chain((1..=4).map(build_one_way_chain))
        .chain((2..=5).map(build_cast_ring))
        .chain((2..=6).map(build_wide_cast))
        .collect();

    for graph in shapes {
        let mut module = Module::new("test");
        module.add_graph(graph);
        let first = ReconcileCasts.apply(module).unwrap();
        let second = ReconcileCasts.apply(first.module).unwrap();
        assert!(!second.changed, "second run must be a no-op");
        for (_, graph) in second.module.graphs.iter() {
            assert_well_formed(graph);
        }
    }
}

#[test]
fn default_pipeline_settles_at_fixpoint() {
    let mut module = Module::new("test");
    module.add_graph(build_round_trip_chain(3));
    module.add_graph(build_wide_cast(4));
    // A dead pure chain for dead op elimination to chew on.
    let mut b = GraphBuilder::new("scraps");
    let c = b.source("const.i32", Type::Int(32));
    b.pure_op("arith.neg", &[c], &[Type::Int(32)]);
    module.add_graph(b.build());

    let mut config = PassConfig::default();
    config.fixpoint = true;
    let pipeline = default_pipeline(&config);

    let settled = pipeline.run(module).unwrap();
    for (_, graph) in settled.graphs.iter() {
        assert_well_formed(graph);
    }
    let before = settled.to_string();
    let again = pipeline.run(settled).unwrap();
    assert_eq!(again.to_string(), before);
}
