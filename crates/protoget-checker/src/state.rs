//! `CheckerState`: entry points for checking one file.

use protoget_common::Diagnostic;
use protoget_parser::RenderError;
use protoget_parser::parser::{NodeArena, NodeIndex};
use protoget_types::{TypeId, TypeInfo};
use tracing::debug;

use crate::access_scan::AccessScan;
use crate::context::CheckerContext;

// =============================================================================
// CheckerState
// =============================================================================

/// Checker for a single parsed and type-resolved file.
///
/// The state only borrows the syntax tree and type information, so one
/// state per file can run in parallel over a shared `ProgramTypes`.
pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        types: TypeInfo<'a>,
        file_name: impl Into<String>,
        marker: TypeId,
    ) -> Self {
        CheckerState {
            ctx: CheckerContext {
                arena,
                types,
                file_name: file_name.into(),
                marker,
            },
        }
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Lazily scan the subtree at `root` for direct field reads.
    pub fn scan(&self, root: NodeIndex) -> AccessScan<'_, 'a> {
        AccessScan::new(self, root)
    }

    /// Check a whole file, stopping at the first render failure.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.ctx.file_name))]
    pub fn check_source_file(&self, root: NodeIndex) -> Result<Vec<Diagnostic>, RenderError> {
        let diagnostics = self.scan(root).collect::<Result<Vec<_>, _>>()?;
        debug!(count = diagnostics.len(), "checked file");
        Ok(diagnostics)
    }
}
