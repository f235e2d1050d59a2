//! Decides whether a selector is a direct read of a message field.

use protoget_parser::parser::NodeIndex;
use protoget_parser::parser::syntax_kind_ext::SELECTOR_EXPRESSION;
use tracing::trace;

use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// The field name if `access` is `x.F` where `x` is a pointer to a
    /// message record that declares `F`.
    ///
    /// The base must implement the marker interface and be a pointer to a
    /// named struct. Method selections and promoted names that the record
    /// does not declare itself are not fields here. Untyped bases are
    /// skipped.
    pub fn checked_field(&self, access: NodeIndex) -> Option<&'a str> {
        let arena = self.ctx.arena;
        let node = arena.get(access)?;
        if node.kind != SELECTOR_EXPRESSION {
            return None;
        }
        let selector = arena.get_selector(node)?;
        let field = arena.identifier_text(selector.name_or_argument)?;
        let base = self.ctx.types.type_of(selector.expression)?;

        let interner = self.ctx.types.interner;
        let shape = interner.shape(base, self.ctx.marker);
        if !shape.implements_marker() {
            return None;
        }
        let Some(record) = shape.record() else {
            trace!(ty = %interner.display(base), "marker type is not a pointer to a record");
            return None;
        };
        record.has_field(field).then_some(field)
    }
}
