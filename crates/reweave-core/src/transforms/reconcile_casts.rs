use std::collections::VecDeque;

use crate::entity::{EntityRef, SecondaryMap};
use crate::error::CoreError;
use crate::ir::{Graph, Module, OpId, OpKind, Type, ValueDef, ValueId};
use crate::pipeline::{Transform, TransformResult};

use super::util::is_trivially_dead;

/// Cast reconciliation — simplifies and eliminates the placeholder casts
/// that staged lowering leaves between representations.
///
/// Cast ops are processed worklist-style. For each cast, every input slot
/// is traced backward through its chain of producing casts; when the chain
/// reaches a value whose type already matches the paired output type, the
/// output's consumers take that value directly. A cast whose slots all
/// forward is erased, a partially-forwarded cast is narrowed to its
/// leftover slots, and a cast nobody consumes is dropped outright.
///
/// ```text
/// %1 = cast(%0) : (A) -> (B)
/// %2 = cast(%1) : (B) -> (C)
/// %3 = cast(%2) : (C) -> (A)
/// ```
///
/// Here `%0` stands in for `%3` and all three casts fold away. Casts that
/// represent genuine conversions (no round-trip anywhere upstream) survive
/// for a later stage to lower.
pub struct ReconcileCasts;

/// Lookup from cast-produced values to the live cast producing them.
/// Kept consistent as casts are erased and narrowed.
struct CastIndex {
    producer: SecondaryMap<ValueId, OpId>,
}

impl CastIndex {
    fn build(graph: &Graph) -> Self {
        let mut index = CastIndex {
            producer: SecondaryMap::new(),
        };
        for op in graph.cast_ops() {
            index.insert(graph, op);
        }
        index
    }

    /// The live cast producing `value`, if any.
    fn producing_cast(&self, value: ValueId) -> Option<OpId> {
        self.producer.get(value).copied()
    }

    fn insert(&mut self, graph: &Graph, op: OpId) {
        for &result in &graph.op(op).results {
            self.producer.insert(result, op);
        }
    }

    fn remove(&mut self, graph: &Graph, op: OpId) {
        for &result in &graph.op(op).results {
            self.producer.remove(result);
        }
    }
}

/// Outcome of tracing one input slot of a cast.
enum Resolution {
    /// The chain round-trips: forward the paired output's consumers to this
    /// root value.
    Resolved(ValueId),
    /// No round-trip; the slot keeps its cast.
    Unresolved,
}

/// FIFO worklist with at-most-once membership, backed by a presence map
/// over the same stable op indices.
struct Worklist {
    queue: VecDeque<OpId>,
    pending: SecondaryMap<OpId, ()>,
}

impl Worklist {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            pending: SecondaryMap::new(),
        }
    }

    fn enqueue(&mut self, op: OpId) {
        if !self.pending.contains_key(op) {
            self.pending.insert(op, ());
            self.queue.push_back(op);
        }
    }

    fn pop(&mut self) -> Option<OpId> {
        let op = self.queue.pop_front()?;
        self.pending.remove(op);
        Some(op)
    }
}

fn inconsistent(graph: &Graph, op: OpId, message: &str) -> CoreError {
    CoreError::Inconsistent {
        graph: graph.name.clone(),
        op: format!("op{}", op.index()),
        message: message.to_string(),
    }
}

/// Walk backward from input `start` until a value of type `want` turns up.
///
/// The walk crosses producing casts slot for slot, so it only passes
/// through casts whose input and output arities line up 1:1. `chain`
/// carries the ops visited so far, the target first; revisiting one is a
/// cycle and leaves the slot unresolved. A matching root produced by an op
/// on the chain is also rejected — forwarding consumers to it would dangle
/// once the chain is deleted.
fn trace_chain(
    graph: &Graph,
    index: &CastIndex,
    target: OpId,
    start: ValueId,
    want: &Type,
) -> Result<Resolution, CoreError> {
    let mut chain: Vec<OpId> = vec![target];
    let mut current = start;
    loop {
        let data = graph.try_value(current).ok_or_else(|| {
            inconsistent(graph, target, "operand refers to a value outside the graph")
        })?;
        if data.ty == *want {
            let rooted_in_chain = match data.def {
                ValueDef::Result { op, .. } => chain.contains(&op),
                ValueDef::Argument { .. } => false,
            };
            return Ok(if rooted_in_chain {
                Resolution::Unresolved
            } else {
                Resolution::Resolved(current)
            });
        }
        let Some(prev) = index.producing_cast(current) else {
            // Non-cast producer of the wrong type: a genuine conversion.
            return Ok(Resolution::Unresolved);
        };
        if chain.contains(&prev) {
            // Cycle: abandon this slot.
            return Ok(Resolution::Unresolved);
        }
        let prev_data = graph.op(prev);
        if prev_data.operands.len() != prev_data.results.len() {
            return Ok(Resolution::Unresolved);
        }
        let Some(slot) = prev_data.results.iter().position(|&r| r == current) else {
            return Err(inconsistent(
                graph,
                prev,
                "cast index maps a value its op does not produce",
            ));
        };
        chain.push(prev);
        current = prev_data.operands[slot];
    }
}

/// Queue the live casts feeding `op`, so upstream chains get another look
/// after `op` changes.
fn enqueue_operand_casts(graph: &Graph, index: &CastIndex, op: OpId, worklist: &mut Worklist) {
    for &operand in &graph.op(op).operands {
        if let Some(producer) = index.producing_cast(operand) {
            worklist.enqueue(producer);
        }
    }
}

/// Counters from one driver run. `steps` is the number of worklist pops;
/// stress tests bound it to show termination.
pub(crate) struct ReconcileStats {
    pub(crate) changed: bool,
    pub(crate) steps: usize,
}

/// Per-graph fixpoint driver.
pub(crate) fn reconcile_graph(graph: &mut Graph) -> Result<ReconcileStats, CoreError> {
    let mut index = CastIndex::build(graph);
    let mut worklist = Worklist::new();
    for op in graph.cast_ops() {
        worklist.enqueue(op);
    }

    let mut stats = ReconcileStats {
        changed: false,
        steps: 0,
    };
    while let Some(op) = worklist.pop() {
        stats.steps += 1;
        if graph.is_erased(op) {
            // Stale entry from an earlier rewrite.
            continue;
        }

        // Dead-node cleanup: a cast nobody consumes just goes away, and its
        // producers may become dead in turn.
        if is_trivially_dead(graph, op) {
            enqueue_operand_casts(graph, &index, op, &mut worklist);
            index.remove(graph, op);
            graph.erase_op(op);
            stats.changed = true;
            continue;
        }

        let data = graph.op(op);
        if data.operands.len() != data.results.len() {
            // No 1:1 slot pairing; this cast never resolves.
            continue;
        }
        let slots: Vec<(ValueId, ValueId)> = data
            .operands
            .iter()
            .copied()
            .zip(data.results.iter().copied())
            .collect();

        // Trace every input slot, in declared order.
        let mut resolutions = Vec::with_capacity(slots.len());
        for &(input, output) in &slots {
            let want = graph.ty(output).clone();
            resolutions.push(trace_chain(graph, &index, op, input, &want)?);
        }
        let resolved = resolutions
            .iter()
            .filter(|r| matches!(r, Resolution::Resolved(_)))
            .count();
        if resolved == 0 {
            continue;
        }

        enqueue_operand_casts(graph, &index, op, &mut worklist);

        if resolved == slots.len() {
            // Fully reconciled: forward every output and erase.
            for (&(_, output), resolution) in slots.iter().zip(&resolutions) {
                if let Resolution::Resolved(root) = resolution {
                    graph.replace_all_uses(output, *root);
                }
            }
        } else {
            // Partially reconciled: rebuild the unresolved subset as a
            // fresh, narrower cast, preserving slot order and types.
            let mut operands = Vec::new();
            let mut result_tys = Vec::new();
            for (&(input, output), resolution) in slots.iter().zip(&resolutions) {
                if matches!(resolution, Resolution::Unresolved) {
                    operands.push(input);
                    result_tys.push(graph.ty(output).clone());
                }
            }
            let narrowed = graph.add_op(OpKind::Cast, true, operands, result_tys);
            index.insert(graph, narrowed);
            worklist.enqueue(narrowed);

            let narrowed_results = graph.op(narrowed).results.clone();
            let mut next = 0;
            for (&(_, output), resolution) in slots.iter().zip(&resolutions) {
                match resolution {
                    Resolution::Resolved(root) => graph.replace_all_uses(output, *root),
                    Resolution::Unresolved => {
                        graph.replace_all_uses(output, narrowed_results[next]);
                        next += 1;
                    }
                }
            }
        }
        index.remove(graph, op);
        graph.erase_op(op);
        stats.changed = true;
    }
    Ok(stats)
}

impl Transform for ReconcileCasts {
    fn name(&self) -> &str {
        "reconcile-casts"
    }

    fn apply(&self, mut module: Module) -> Result<TransformResult, CoreError> {
        let mut changed = false;
        for graph_id in module.graphs.keys().collect::<Vec<_>>() {
            changed |= reconcile_graph(&mut module.graphs[graph_id])?.changed;
        }
        Ok(TransformResult { module, changed })
    }
}
