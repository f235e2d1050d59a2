//! Lazy scan of a file for direct message field reads.

use std::iter::FusedIterator;

use protoget_common::diagnostics::quote;
use protoget_common::{Diagnostic, TextEdit};
use protoget_parser::parser::{NodeIndex, Preorder, preorder};
use protoget_parser::{RenderError, render};
use tracing::trace;

use crate::context::{DIAGNOSTIC_SOURCE, FIX_MESSAGE};
use crate::state::CheckerState;
use crate::write_context::WriteContexts;

/// Yields one diagnostic per flagged access, in pre-order. A render failure
/// is yielded once and ends the scan.
pub struct AccessScan<'s, 'a> {
    state: &'s CheckerState<'a>,
    nodes: Preorder<'a>,
    writes: WriteContexts,
    done: bool,
}

impl<'s, 'a> AccessScan<'s, 'a> {
    pub(crate) fn new(state: &'s CheckerState<'a>, root: NodeIndex) -> Self {
        let arena = state.ctx.arena;
        AccessScan {
            state,
            nodes: preorder(arena, root),
            writes: WriteContexts::build(arena, root),
            done: false,
        }
    }

    fn report(&self, access: NodeIndex, field: &str) -> Result<Diagnostic, RenderError> {
        let arena = self.state.ctx.arena;
        let node = arena.get(access).ok_or(RenderError::MissingNode(access))?;
        let selector = arena
            .get_selector(node)
            .ok_or(RenderError::MissingNode(access))?;
        let name = arena
            .get(selector.name_or_argument)
            .ok_or(RenderError::MissingNode(selector.name_or_argument))?;

        let text = render(arena, access)?;
        let edit = TextEdit::replace(name.span(), format!("Get{field}()"));
        Ok(Diagnostic::error(
            self.state.ctx.file_name.as_str(),
            node.span(),
            format!("protoget: {}", quote(&text)),
            DIAGNOSTIC_SOURCE,
        )
        .with_fix(FIX_MESSAGE, vec![edit]))
    }
}

impl Iterator for AccessScan<'_, '_> {
    type Item = Result<Diagnostic, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let arena = self.state.ctx.arena;
        while let Some(index) = self.nodes.next() {
            let Some(field) = self.state.checked_field(index) else {
                continue;
            };
            if self.writes.is_write_context(arena, index) {
                trace!(field, "skipping write to message field");
                continue;
            }
            let result = self.report(index, field);
            if result.is_err() {
                self.done = true;
            }
            return Some(result);
        }
        self.done = true;
        None
    }
}

impl FusedIterator for AccessScan<'_, '_> {}
