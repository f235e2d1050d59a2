//! Lazy pre-order traversal.

use super::base::NodeIndex;
use super::node::NodeArena;

/// Pre-order iterator over a subtree: a parent is yielded before its
/// children, children in source order.
pub struct Preorder<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeIndex>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let index = self.stack.pop()?;
        self.stack.extend(self.arena.children(index).into_iter().rev());
        Some(index)
    }
}

/// Walk the subtree rooted at `root` in pre-order.
pub fn preorder(arena: &NodeArena, root: NodeIndex) -> Preorder<'_> {
    let mut stack = Vec::new();
    if arena.get(root).is_some() {
        stack.push(root);
    }
    Preorder { arena, stack }
}
