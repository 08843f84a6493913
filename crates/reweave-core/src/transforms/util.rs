use crate::ir::{Graph, OpId};

/// A pure op none of whose results has uses. Erasable without changing
/// observable behavior.
pub fn is_trivially_dead(graph: &Graph, op: OpId) -> bool {
    let data = graph.op(op);
    data.pure && data.results.iter().all(|&r| graph.uses(r).is_empty())
}

#[cfg(test)]
pub mod test_helpers {
    use crate::ir::{Graph, Use, ValueDef};

    /// Check the structural invariants that transforms rely on and must
    /// preserve: def links, use lists, and operand slots all agree, and
    /// vacated ops hold no references into the live graph.
    pub fn assert_well_formed(graph: &Graph) {
        for op in graph.op_ids() {
            let data = graph.op(op);
            if graph.is_erased(op) {
                for &result in &data.results {
                    assert!(
                        graph.uses(result).is_empty(),
                        "erased op {op:?} has a result with live uses"
                    );
                }
                continue;
            }
            for (index, &operand) in data.operands.iter().enumerate() {
                let slot = Use {
                    op,
                    index: index as u32,
                };
                assert!(
                    graph.try_value(operand).is_some(),
                    "op {op:?} operand {index} refers to a missing value"
                );
                assert!(
                    graph.uses(operand).contains(&slot),
                    "op {op:?} operand {index} is not registered in the use list"
                );
            }
            for (index, &result) in data.results.iter().enumerate() {
                assert_eq!(
                    graph.value(result).def,
                    ValueDef::Result {
                        op,
                        index: index as u32,
                    },
                    "op {op:?} result {index} has a mismatched def link"
                );
            }
        }

        for value in graph.value_ids() {
            let data = graph.value(value);
            match data.def {
                ValueDef::Argument { index } => {
                    assert_eq!(
                        graph.arguments().get(index as usize),
                        Some(&value),
                        "argument value {value:?} has a stale index"
                    );
                }
                ValueDef::Result { op, index } => {
                    let producer = graph.op(op);
                    assert_eq!(
                        producer.results.get(index as usize),
                        Some(&value),
                        "value {value:?} not listed by its producer"
                    );
                    if graph.is_erased(op) {
                        assert!(
                            graph.uses(value).is_empty(),
                            "value {value:?} of an erased op still has uses"
                        );
                    }
                }
            }
            for u in graph.uses(value) {
                assert!(
                    !graph.is_erased(u.op),
                    "value {value:?} is used by erased op {:?}",
                    u.op
                );
                assert_eq!(
                    graph.op(u.op).operands.get(u.index as usize),
                    Some(&value),
                    "use list of {value:?} points at the wrong operand slot"
                );
            }
        }
    }
}
