use serde::{Deserialize, Serialize};

use crate::define_entity;

use super::value::ValueId;

define_entity!(OpId);

/// What an op is. Transforms only ever distinguish casts from everything
/// else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpKind {
    /// Placeholder conversion inserted between lowering stages. Declares an
    /// input and an output type signature but is never materialized into
    /// real code; reconciliation must eliminate it or a later stage must
    /// lower it.
    Cast,
    /// Any other operation, identified by name (e.g. `"io.print"`).
    /// Transforms treat these as black boxes and only rewire their
    /// operands.
    Opaque(String),
}

/// An op in the dataflow graph.
///
/// Operand and result arity and the declared types are fixed at creation;
/// only liveness changes (see `Graph::erase_op`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpData {
    pub kind: OpKind,
    pub operands: Vec<ValueId>,
    pub results: Vec<ValueId>,
    /// Pure ops can be erased when unused; effectful ops are pinned.
    pub pure: bool,
    /// Vacated arena slot: the op is deleted but the slot survives so op
    /// ids held in worklists and indexes stay stable.
    #[serde(default)]
    pub(crate) erased: bool,
}

impl OpData {
    pub fn is_cast(&self) -> bool {
        matches!(self.kind, OpKind::Cast)
    }
}
