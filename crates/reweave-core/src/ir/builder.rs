use super::graph::Graph;
use super::op::{OpId, OpKind};
use super::ty::Type;
use super::value::ValueId;

/// Builder for constructing a single [`Graph`].
///
/// Thin convenience layer over `Graph::add_op` used by frontends and tests;
/// ops are appended in call order.
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: Graph::new(name),
        }
    }

    /// Add a graph argument of the given type.
    pub fn argument(&mut self, ty: Type) -> ValueId {
        self.graph.add_argument(ty)
    }

    /// Emit a placeholder cast from `inputs` to `result_tys`. Returns the
    /// result values, one per output type.
    pub fn cast(&mut self, inputs: &[ValueId], result_tys: &[Type]) -> Vec<ValueId> {
        let op = self.graph.add_op(
            OpKind::Cast,
            true,
            inputs.to_vec(),
            result_tys.to_vec(),
        );
        self.graph.op(op).results.clone()
    }

    /// Single-input single-output cast convenience.
    pub fn cast1(&mut self, input: ValueId, result_ty: Type) -> ValueId {
        self.cast(&[input], std::slice::from_ref(&result_ty))[0]
    }

    /// Emit a pure op. Erasable by DCE when its results go unused.
    pub fn pure_op(
        &mut self,
        name: &str,
        operands: &[ValueId],
        result_tys: &[Type],
    ) -> Vec<ValueId> {
        let op = self.graph.add_op(
            OpKind::Opaque(name.to_string()),
            true,
            operands.to_vec(),
            result_tys.to_vec(),
        );
        self.graph.op(op).results.clone()
    }

    /// Emit a pure producer with no operands (a constant, a load from an
    /// earlier stage's environment). Returns its single result.
    pub fn source(&mut self, name: &str, ty: Type) -> ValueId {
        self.pure_op(name, &[], std::slice::from_ref(&ty))[0]
    }

    /// Emit an effectful consumer with no results. Never erased.
    pub fn sink(&mut self, name: &str, operands: &[ValueId]) -> OpId {
        self.graph.add_op(
            OpKind::Opaque(name.to_string()),
            false,
            operands.to_vec(),
            Vec::new(),
        )
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
