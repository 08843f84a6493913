use std::fmt;

use crate::entity::EntityRef;

use super::graph::Graph;
use super::module::Module;
use super::op::{OpData, OpKind};
use super::ty::Type;
use super::value::ValueId;

fn fmt_type(ty: &Type, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ty {
        Type::Bool => write!(f, "bool"),
        Type::Int(bits) => write!(f, "i{bits}"),
        Type::UInt(bits) => write!(f, "u{bits}"),
        Type::Float(bits) => write!(f, "f{bits}"),
        Type::String => write!(f, "string"),
        Type::Word => write!(f, "word"),
        Type::Array(elem) => {
            write!(f, "[")?;
            fmt_type(elem, f)?;
            write!(f, "]")
        }
        Type::Tuple(elems) => {
            write!(f, "(")?;
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                fmt_type(elem, f)?;
            }
            write!(f, ")")
        }
        Type::Struct(name) => write!(f, "{name}"),
        Type::Handle(name) => write!(f, "!{name}"),
    }
}

fn fmt_value(value: ValueId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "%{}", value.index())
}

fn fmt_value_list(values: &[ValueId], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, &v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        fmt_value(v, f)?;
    }
    Ok(())
}

fn fmt_signature(graph: &Graph, op: &OpData, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, " : (")?;
    for (i, &v) in op.operands.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        fmt_type(graph.ty(v), f)?;
    }
    write!(f, ") -> (")?;
    for (i, &v) in op.results.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        fmt_type(graph.ty(v), f)?;
    }
    write!(f, ")")
}

/// Textual rendering of a graph. Vacated op slots are skipped, so the
/// printed form is stable across reconciliation for the surviving ops.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph @{}(", self.name)?;
        for (i, &arg) in self.arguments().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt_value(arg, f)?;
            write!(f, ": ")?;
            fmt_type(self.ty(arg), f)?;
        }
        writeln!(f, ") {{")?;
        for (_, op) in self.live_ops() {
            write!(f, "  ")?;
            if !op.results.is_empty() {
                fmt_value_list(&op.results, f)?;
                write!(f, " = ")?;
            }
            match &op.kind {
                OpKind::Cast => write!(f, "cast(")?,
                OpKind::Opaque(name) => write!(f, "{name}(")?,
            }
            fmt_value_list(&op.operands, f)?;
            write!(f, ")")?;
            fmt_signature(self, op, f)?;
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module @{}", self.name)?;
        for (_, graph) in self.graphs.iter() {
            writeln!(f, "{graph}")?;
        }
        Ok(())
    }
}
