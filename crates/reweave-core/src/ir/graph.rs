use serde::{Deserialize, Serialize};

use crate::entity::PrimaryMap;

use super::op::{OpData, OpId, OpKind};
use super::ty::Type;
use super::value::{Use, ValueData, ValueDef, ValueId};

/// A dataflow graph — the unit a transform operates on.
///
/// Ops and values live in append-only arenas addressed by stable ids.
/// Erasing an op vacates its slot instead of removing it, so ids held in
/// worklists and side tables never dangle while a transform is mid-flight.
/// Values are never removed at all; a value whose producer was erased simply
/// has no remaining uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub name: String,
    values: PrimaryMap<ValueId, ValueData>,
    ops: PrimaryMap<OpId, OpData>,
    args: Vec<ValueId>,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: PrimaryMap::new(),
            ops: PrimaryMap::new(),
            args: Vec::new(),
        }
    }

    /// Add a graph argument of the given type. Returns its value.
    pub fn add_argument(&mut self, ty: Type) -> ValueId {
        let index = self.args.len() as u32;
        let value = self.values.push(ValueData {
            ty,
            def: ValueDef::Argument { index },
            uses: Vec::new(),
        });
        self.args.push(value);
        value
    }

    pub fn arguments(&self) -> &[ValueId] {
        &self.args
    }

    /// Append an op. Allocates one result value per entry in `result_tys`
    /// and registers the op in each operand's use list.
    ///
    /// # Panics
    /// Panics if an operand id does not belong to this graph.
    pub fn add_op(
        &mut self,
        kind: OpKind,
        pure: bool,
        operands: Vec<ValueId>,
        result_tys: Vec<Type>,
    ) -> OpId {
        let op = self.ops.push(OpData {
            kind,
            operands,
            results: Vec::new(),
            pure,
            erased: false,
        });

        let mut results = Vec::with_capacity(result_tys.len());
        for (index, ty) in result_tys.into_iter().enumerate() {
            results.push(self.values.push(ValueData {
                ty,
                def: ValueDef::Result {
                    op,
                    index: index as u32,
                },
                uses: Vec::new(),
            }));
        }
        self.ops[op].results = results;

        for (index, &operand) in self.ops[op].operands.clone().iter().enumerate() {
            self.values[operand].uses.push(Use {
                op,
                index: index as u32,
            });
        }
        op
    }

    pub fn op(&self, op: OpId) -> &OpData {
        &self.ops[op]
    }

    pub fn try_op(&self, op: OpId) -> Option<&OpData> {
        self.ops.get(op)
    }

    pub fn is_erased(&self, op: OpId) -> bool {
        self.ops[op].erased
    }

    pub fn value(&self, value: ValueId) -> &ValueData {
        &self.values[value]
    }

    pub fn try_value(&self, value: ValueId) -> Option<&ValueData> {
        self.values.get(value)
    }

    pub fn ty(&self, value: ValueId) -> &Type {
        &self.values[value].ty
    }

    /// Live consumers of a value, in registration order.
    pub fn uses(&self, value: ValueId) -> &[Use] {
        &self.values[value].uses
    }

    /// All op slots, vacated ones included.
    pub fn op_ids(&self) -> impl Iterator<Item = OpId> + '_ {
        self.ops.keys()
    }

    /// All values ever created, including results of erased ops.
    pub fn value_ids(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.values.keys()
    }

    pub fn live_ops(&self) -> impl Iterator<Item = (OpId, &OpData)> {
        self.ops.iter().filter(|(_, data)| !data.erased)
    }

    pub fn live_op_count(&self) -> usize {
        self.live_ops().count()
    }

    /// Enumerate every live cast op, in id order.
    pub fn cast_ops(&self) -> Vec<OpId> {
        self.live_ops()
            .filter(|(_, data)| data.is_cast())
            .map(|(op, _)| op)
            .collect()
    }

    /// Rewire one operand slot, keeping use lists in sync.
    pub fn replace_operand(&mut self, op: OpId, index: usize, new: ValueId) {
        let old = self.ops[op].operands[index];
        if old == new {
            return;
        }
        let slot = Use {
            op,
            index: index as u32,
        };
        self.values[old].uses.retain(|u| *u != slot);
        self.ops[op].operands[index] = new;
        self.values[new].uses.push(slot);
    }

    /// Redirect every use of `old` to `new`.
    pub fn replace_all_uses(&mut self, old: ValueId, new: ValueId) {
        if old == new {
            return;
        }
        let uses = std::mem::take(&mut self.values[old].uses);
        for u in &uses {
            self.ops[u.op].operands[u.index as usize] = new;
        }
        self.values[new].uses.extend(uses);
    }

    /// Erase an op, vacating its arena slot. Unregisters the op from its
    /// operands' use lists.
    ///
    /// # Panics
    /// Panics if a result still has uses — callers must redirect consumers
    /// first — or if the op is already erased.
    pub fn erase_op(&mut self, op: OpId) {
        assert!(!self.ops[op].erased, "op erased twice");
        for &result in &self.ops[op].results {
            assert!(
                self.values[result].uses.is_empty(),
                "erasing op with live uses of its results"
            );
        }
        for (index, &operand) in self.ops[op].operands.clone().iter().enumerate() {
            let slot = Use {
                op,
                index: index as u32,
            };
            self.values[operand].uses.retain(|u| *u != slot);
        }
        self.ops[op].erased = true;
    }
}
