pub mod builder;
pub mod graph;
pub mod module;
pub mod op;
pub mod printer;
pub mod ty;
pub mod value;

pub use graph::Graph;
pub use module::{GraphId, Module};
pub use op::{OpData, OpId, OpKind};
pub use ty::Type;
pub use value::{Use, ValueData, ValueDef, ValueId};
