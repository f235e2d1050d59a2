//! Per-file expression types.

use protoget_parser::parser::NodeIndex;
use rustc_hash::FxHashMap;

use crate::intern::TypeInterner;
use crate::types::TypeId;

/// Static type of every typed expression node in one file.
pub type ExprTypes = FxHashMap<NodeIndex, TypeId>;

/// Read-only type information for one file: the shared interner plus that
/// file's expression types.
#[derive(Clone, Copy)]
pub struct TypeInfo<'a> {
    pub interner: &'a TypeInterner,
    pub exprs: &'a ExprTypes,
}

impl<'a> TypeInfo<'a> {
    pub fn new(interner: &'a TypeInterner, exprs: &'a ExprTypes) -> Self {
        TypeInfo { interner, exprs }
    }

    /// Static type of `expr`; `None` for untyped nodes such as package
    /// names, type names and unresolvable expressions.
    #[inline]
    pub fn type_of(&self, expr: NodeIndex) -> Option<TypeId> {
        self.exprs.get(&expr).copied()
    }
}
