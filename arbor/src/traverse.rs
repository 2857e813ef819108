//! Depth-first walks over a forest.
//!
//! Walks use an explicit stack, so very deep trees do not grow the call
//! stack.

use crate::forest::Forest;
use crate::node::{Node, NodeId};

/// What a visitor wants after seeing a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children.
    Continue,
    /// Skip the node's subtree and move on to its next sibling.
    SkipChildren,
}

/// Visit `start` and their descendants in pre-order.
pub fn walk<F>(forest: &Forest, start: &[NodeId], mut visit: F)
where
    F: FnMut(NodeId, &Node) -> Walk,
{
    let mut stack: Vec<NodeId> = start.iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let Some(node) = forest.get(id) else {
            continue;
        };
        if visit(id, node) == Walk::Continue {
            stack.extend(node.children.iter().rev().copied());
        }
    }
}

/// Pre-order list of every node reachable from the roots.
pub fn pre_order(forest: &Forest) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(forest.len());
    walk(forest, forest.roots(), |id, _| {
        out.push(id);
        Walk::Continue
    });
    out
}

/// Pre-order list of the nodes accepted by `keep`, with `descend` deciding
/// whether to enter each visited node's subtree.
pub fn collect<K, D>(forest: &Forest, mut keep: K, mut descend: D) -> Vec<NodeId>
where
    K: FnMut(&Node) -> bool,
    D: FnMut(&Node) -> bool,
{
    let mut out = Vec::new();
    walk(forest, forest.roots(), |id, node| {
        if keep(node) {
            out.push(id);
        }
        if descend(node) {
            Walk::Continue
        } else {
            Walk::SkipChildren
        }
    });
    out
}

/// Pre-order list of the leaves reachable from the roots.
pub fn leaves(forest: &Forest) -> Vec<NodeId> {
    collect(forest, Node::is_leaf, |_| true)
}
