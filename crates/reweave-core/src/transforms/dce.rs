use std::collections::{HashSet, VecDeque};

use crate::error::CoreError;
use crate::ir::{Graph, Module, OpId, ValueDef};
use crate::pipeline::{Transform, TransformResult};

use super::util::is_trivially_dead;

/// Dead op elimination — erases pure ops whose results are all unused.
///
/// Erasing an op can strip the last use from its operands' producers, so
/// those are re-examined worklist-style until nothing else dies. Effectful
/// ops (sinks, calls into later stages) are pinned regardless of use count.
pub struct DeadOpElimination;

/// Eliminate dead ops in a single graph. Returns true if any were erased.
fn eliminate_graph(graph: &mut Graph) -> bool {
    let mut changed = false;
    let mut worklist: VecDeque<OpId> = graph.live_ops().map(|(op, _)| op).collect();
    let mut queued: HashSet<OpId> = worklist.iter().copied().collect();

    while let Some(op) = worklist.pop_front() {
        queued.remove(&op);
        if graph.is_erased(op) || !is_trivially_dead(graph, op) {
            continue;
        }
        let operands = graph.op(op).operands.clone();
        graph.erase_op(op);
        changed = true;
        for operand in operands {
            if let ValueDef::Result { op: producer, .. } = graph.value(operand).def {
                if !graph.is_erased(producer) && queued.insert(producer) {
                    worklist.push_back(producer);
                }
            }
        }
    }
    changed
}

impl Transform for DeadOpElimination {
    fn name(&self) -> &str {
        "dead-op-elimination"
    }

    fn apply(&self, mut module: Module) -> Result<TransformResult, CoreError> {
        let mut changed = false;
        for graph_id in module.graphs.keys().collect::<Vec<_>>() {
            changed |= eliminate_graph(&mut module.graphs[graph_id]);
        }
        Ok(TransformResult { module, changed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::builder::GraphBuilder;
    use crate::ir::Type;
    use crate::transforms::util::test_helpers::assert_well_formed;

    fn apply(graph: Graph) -> (Graph, bool) {
        let mut module = Module::new("test");
        let id = module.add_graph(graph);
        let result = DeadOpElimination.apply(module).unwrap();
        let graph = result.module.graphs[id].clone();
        assert_well_formed(&graph);
        (graph, result.changed)
    }

    /// A pure chain feeding nothing is removed bottom-up.
    #[test]
    fn dead_pure_chain_removed() {
        let mut b = GraphBuilder::new("g");
        let c = b.source("const.i32", Type::Int(32));
        let _unused = b.pure_op("arith.neg", &[c], &[Type::Int(32)]);

        let (g, changed) = apply(b.build());
        assert!(changed);
        assert_eq!(g.live_op_count(), 0);
    }

    /// Ops feeding a sink stay, and so does the sink.
    #[test]
    fn used_ops_kept() {
        let mut b = GraphBuilder::new("g");
        let c = b.source("const.i32", Type::Int(32));
        let n = b.pure_op("arith.neg", &[c], &[Type::Int(32)]);
        b.sink("io.print", &[n[0]]);

        let (g, changed) = apply(b.build());
        assert!(!changed);
        assert_eq!(g.live_op_count(), 3);
    }

    /// An effectful op with an unused result is pinned.
    #[test]
    fn effectful_op_with_unused_result_kept() {
        let mut g = Graph::new("g");
        let a = g.add_argument(Type::Word);
        g.add_op(
            crate::ir::OpKind::Opaque("rt.release".into()),
            false,
            vec![a],
            vec![Type::Bool],
        );

        let (g, changed) = apply(g);
        assert!(!changed);
        assert_eq!(g.live_op_count(), 1);
    }
}
