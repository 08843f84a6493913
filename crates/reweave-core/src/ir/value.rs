use serde::{Deserialize, Serialize};

use crate::define_entity;

use super::op::OpId;
use super::ty::Type;

define_entity!(ValueId);

/// Where a value comes from: exactly one producer, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueDef {
    /// Result slot `index` of op `op`.
    Result { op: OpId, index: u32 },
    /// Graph argument `index` (produced outside the graph).
    Argument { index: u32 },
}

/// One operand slot of one op — an entry in a value's use list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Use {
    pub op: OpId,
    pub index: u32,
}

/// A value in the graph: its type, its producer, and its live consumers.
///
/// The use list is maintained by `Graph`'s mutation methods; transforms
/// redirect consumers through `Graph::replace_all_uses` rather than touching
/// it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueData {
    pub ty: Type,
    pub def: ValueDef,
    #[serde(default)]
    pub(crate) uses: Vec<Use>,
}
