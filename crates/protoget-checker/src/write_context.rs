//! Write-context detection.
//!
//! A field access is in write context when it is the target of a plain or
//! compound assignment, an increment or decrement, or a `for ... = range`
//! clause, or when it has its address taken.
//! The access may be wrapped in parentheses, or be the base of a longer
//! selector/call chain that ends in such a target (`m.Inner.X = 1`).
//! Short variable declarations (`:=`) only ever bind identifiers and never
//! count.

use protoget_parser::parser::syntax_kind_ext::{
    ASSIGNMENT_STATEMENT, CALL_EXPRESSION, FOR_RANGE_STATEMENT, PARENTHESIZED_EXPRESSION,
    SELECTOR_EXPRESSION, UNARY_EXPRESSION,
};
use protoget_parser::parser::{NodeArena, NodeIndex, preorder};
use protoget_scanner::SyntaxKind;
use rustc_hash::FxHashSet;
use tracing::trace;

/// Write targets of one file, with outer parentheses stripped.
#[derive(Debug, Default)]
pub struct WriteContexts {
    assigned: FxHashSet<NodeIndex>,
    address_taken: FxHashSet<NodeIndex>,
}

impl WriteContexts {
    /// Collect every assignment target and `&` operand under `root`.
    pub fn build(arena: &NodeArena, root: NodeIndex) -> WriteContexts {
        let mut contexts = WriteContexts::default();

        for index in preorder(arena, root) {
            let Some(node) = arena.get(index) else {
                continue;
            };
            match node.kind {
                ASSIGNMENT_STATEMENT => {
                    let Some(assignment) = arena.get_assignment(node) else {
                        continue;
                    };
                    if assignment.operator_token == SyntaxKind::ColonEqualsToken as u16 {
                        continue;
                    }
                    for target in assignment.left.iter() {
                        contexts.assigned.insert(arena.skip_parentheses(target));
                    }
                }
                FOR_RANGE_STATEMENT => {
                    let Some(range) = arena.get_range_statement(node) else {
                        continue;
                    };
                    if range.operator_token != SyntaxKind::EqualsToken as u16 {
                        continue;
                    }
                    for target in range.left.iter() {
                        contexts.assigned.insert(arena.skip_parentheses(target));
                    }
                }
                UNARY_EXPRESSION => {
                    let Some(unary) = arena.get_unary_expr(node) else {
                        continue;
                    };
                    if unary.operator == SyntaxKind::AmpersandToken as u16 {
                        contexts
                            .address_taken
                            .insert(arena.skip_parentheses(unary.operand));
                    }
                }
                _ => {}
            }
        }

        trace!(
            assigned = contexts.assigned.len(),
            address_taken = contexts.address_taken.len(),
            "collected write targets"
        );
        contexts
    }

    /// Whether `expr` is itself a write target, ignoring parentheses.
    pub fn is_target(&self, arena: &NodeArena, expr: NodeIndex) -> bool {
        let expr = arena.skip_parentheses(expr);
        self.assigned.contains(&expr) || self.address_taken.contains(&expr)
    }

    pub fn is_assigned(&self, expr: NodeIndex) -> bool {
        self.assigned.contains(&expr)
    }

    pub fn is_address_taken(&self, expr: NodeIndex) -> bool {
        self.address_taken.contains(&expr)
    }

    /// Whether the access `expr` is written to.
    ///
    /// Walks outward while the current node is the callee of a call, the
    /// base of a selector, or wrapped in parentheses, and reports a write if
    /// any node on that chain is a target. Index expressions end the walk:
    /// `m.Tags[0] = x` reads `m.Tags`.
    pub fn is_write_context(&self, arena: &NodeArena, expr: NodeIndex) -> bool {
        let mut current = expr;
        loop {
            if self.is_target(arena, current) {
                return true;
            }
            let parent = arena.parent_of(current);
            let Some(parent_node) = arena.get(parent) else {
                return false;
            };
            let continues = match parent_node.kind {
                CALL_EXPRESSION => arena
                    .get_call_expr(parent_node)
                    .is_some_and(|call| call.expression == current),
                SELECTOR_EXPRESSION => arena
                    .get_selector(parent_node)
                    .is_some_and(|selector| selector.expression == current),
                PARENTHESIZED_EXPRESSION => true,
                _ => false,
            };
            if !continues {
                return false;
            }
            current = parent;
        }
    }
}
