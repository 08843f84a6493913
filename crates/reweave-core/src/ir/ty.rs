use serde::{Deserialize, Serialize};

/// A resolved type in the IR.
///
/// Staged lowering moves values between representations; a value's type
/// records which stage's representation it currently carries. Type equality
/// (the derived `PartialEq`) is what cast reconciliation uses to decide
/// whether a chain of placeholder casts round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// Boolean.
    Bool,
    /// Signed integer with bit width.
    Int(u8),
    /// Unsigned integer with bit width.
    UInt(u8),
    /// Floating point with bit width (32 or 64).
    Float(u8),
    /// UTF-8 string.
    String,
    /// Pointer-sized machine word — the post-lowering representation most
    /// high-level types collapse into.
    Word,
    /// Array of a uniform element type.
    Array(Box<Type>),
    /// Tuple of types.
    Tuple(Vec<Type>),
    /// Named struct reference.
    Struct(String),
    /// Opaque handle owned by a later lowering stage (runtime pointers,
    /// descriptors). Only that stage can look inside.
    Handle(String),
}
