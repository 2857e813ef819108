//! Tri-state check propagation.
//!
//! Checking a node pushes the value down to its subtree and recomputes every
//! ancestor from its direct children. Check-disabled nodes (disabled, or with
//! a locked checkbox) are barriers in both directions: they are never
//! recomputed, never overwritten, and never counted when a parent is
//! recomputed.

use log::trace;

use crate::forest::Forest;
use crate::node::NodeId;
use crate::traverse;

/// Re-apply a node's current checked value to its ancestors and descendants.
pub fn conduct(forest: &mut Forest, id: NodeId) {
    let Some(checked) = forest.get(id).map(|n| n.checked) else {
        return;
    };
    conduct_up(forest, id);
    conduct_down(forest, id, checked);
}

/// Recompute every ancestor of `id` from its direct children, nearest first.
pub fn conduct_up(forest: &mut Forest, id: NodeId) {
    let mut current = forest.parent(id);
    while let Some(parent) = current {
        let locked = forest.get(parent).is_none_or(|p| p.is_check_disabled());
        if !locked && let Some((checked, half_checked)) = children_state(forest, parent) {
            trace!(
                "conduct_up: {} checked={} half={}",
                parent, checked, half_checked
            );
            if let Some(node) = forest.get_mut(parent) {
                node.set_checked(checked, half_checked);
            }
        }
        current = forest.parent(parent);
    }
}

/// Derive a parent's `(checked, half_checked)` from its enabled children.
///
/// Returns `None` when every child is check-disabled, leaving the parent as
/// it was.
fn children_state(forest: &Forest, parent: NodeId) -> Option<(bool, bool)> {
    let mut enabled = forest
        .children(parent)
        .iter()
        .filter_map(|&c| forest.get(c))
        .filter(|c| !c.is_check_disabled())
        .peekable();
    enabled.peek()?;

    let mut all_checked = true;
    let mut any_checked = false;
    for child in enabled {
        all_checked &= child.checked && !child.half_checked;
        any_checked |= child.checked || child.half_checked;
    }

    if all_checked {
        Some((true, false))
    } else {
        Some((false, any_checked))
    }
}

/// Push `value` onto `id` and its subtree, stopping at check-disabled nodes.
pub fn conduct_down(forest: &mut Forest, id: NodeId, value: bool) {
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        let Some(node) = forest.get_mut(current) else {
            continue;
        };
        if node.is_check_disabled() {
            continue;
        }
        node.set_checked(value, false);
        stack.extend(node.children.iter().copied());
    }
}

/// Re-run [`conduct`] for every currently checked node, in pre-order.
///
/// Does nothing in strict mode, where parents and children are independent.
pub fn refresh_check_state(forest: &mut Forest, check_strictly: bool) {
    if check_strictly {
        return;
    }
    let checked = traverse::collect(forest, |n| n.checked, |_| true);
    trace!("refresh_check_state: {} checked nodes", checked.len());
    for id in checked {
        conduct(forest, id);
    }
}
