//! Tree state engine.

use std::collections::HashSet;

use log::{debug, info};

use crate::check;
use crate::config::TreeConfig;
use crate::drag::{self, DropPosition};
use crate::error::TreeError;
use crate::forest::Forest;
use crate::geometry::Rect;
use crate::node::{Node, NodeId, TreeNode};
use crate::search;
use crate::traverse;

/// Work scheduled to run on the next turn, see [`TreeStateEngine::run_deferred`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Re-run the check cascade for every checked node.
    RefreshCheckState,
}

/// Authoritative state behind an interactive tree widget.
///
/// `TreeStateEngine` owns a forest and exposes every operation that changes
/// it:
/// - selection (single or multi, by node or by key)
/// - tri-state checking with cascade to ancestors and descendants
/// - expansion and search-driven ancestor expansion
/// - drag-and-drop reordering
///
/// Derived lists (selected, checked, ...) are computed from the node flags on
/// every call, so they can never go stale.
///
/// # Example
///
/// ```
/// use arbor::{TreeNode, TreeStateEngine};
///
/// let mut engine = TreeStateEngine::new();
/// engine
///     .init_tree(vec![
///         TreeNode::new("a", "A")
///             .child(TreeNode::new("b", "B"))
///             .child(TreeNode::new("c", "C")),
///     ])
///     .unwrap();
/// engine.run_deferred();
///
/// let b = engine.find("b").unwrap();
/// engine.set_node_checked(b, true);
/// assert_eq!(engine.half_checked_keys(), vec!["a"]);
/// ```
#[derive(Debug, Default)]
pub struct TreeStateEngine {
    forest: Forest,
    config: TreeConfig,
    /// Node being dragged.
    selected_node: Option<NodeId>,
    /// Node currently hovered by a drag.
    target_node: Option<NodeId>,
    deferred: Option<Deferred>,
}

impl TreeStateEngine {
    /// Create an engine with an empty forest and default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given config.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn check_strictly(&self) -> bool {
        self.config.check_strictly
    }

    /// Switch strict checking on or off. Existing flags are left as they are.
    pub fn set_check_strictly(&mut self, strict: bool) {
        self.config.check_strictly = strict;
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Replace the whole forest.
    ///
    /// Drag state is cleared and a check cascade refresh is scheduled for the
    /// next [`run_deferred`](Self::run_deferred), so callers can finish wiring
    /// the new tree first. On error the current forest is kept.
    pub fn init_tree(&mut self, roots: Vec<TreeNode>) -> Result<(), TreeError> {
        let forest = Forest::from_nodes(roots)?;
        info!(
            "init_tree: {} roots, {} nodes",
            forest.roots().len(),
            forest.len()
        );
        self.forest = forest;
        self.selected_node = None;
        self.target_node = None;
        self.deferred = Some(Deferred::RefreshCheckState);
        Ok(())
    }

    /// Whether a deferred task is waiting for the next turn.
    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Run the pending deferred task, if any. Returns the task that ran.
    pub fn run_deferred(&mut self) -> Option<Deferred> {
        let task = self.deferred.take()?;
        match task {
            Deferred::RefreshCheckState => self.refresh_check_state(),
        }
        debug!("run_deferred: {:?}", task);
        Some(task)
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn roots(&self) -> &[NodeId] {
        self.forest.roots()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.forest.get(id)
    }

    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.forest.find(key)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.forest.parent(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.forest.children(id)
    }

    pub fn len(&self) -> usize {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    pub(crate) fn keys_of(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.forest.get(id))
            .map(|n| n.key.clone())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Derived lists
    // -------------------------------------------------------------------------

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        traverse::collect(&self.forest, |n| n.selected, |_| true)
    }

    /// Checked nodes. Outside strict mode the subtree of a checked node is
    /// not listed, since it is checked as a whole.
    pub fn checked_nodes(&self) -> Vec<NodeId> {
        let strict = self.config.check_strictly;
        traverse::collect(&self.forest, |n| n.checked, |n| strict || !n.checked)
    }

    /// Half-checked nodes. Always empty in strict mode.
    pub fn half_checked_nodes(&self) -> Vec<NodeId> {
        if self.config.check_strictly {
            return Vec::new();
        }
        traverse::collect(&self.forest, |n| n.half_checked, |_| true)
    }

    pub fn expanded_nodes(&self) -> Vec<NodeId> {
        traverse::collect(&self.forest, |n| n.expanded, |_| true)
    }

    pub fn matched_nodes(&self) -> Vec<NodeId> {
        traverse::collect(&self.forest, |n| n.matched, |_| true)
    }

    pub fn selected_keys(&self) -> Vec<String> {
        self.keys_of(&self.selected_nodes())
    }

    pub fn checked_keys(&self) -> Vec<String> {
        self.keys_of(&self.checked_nodes())
    }

    pub fn half_checked_keys(&self) -> Vec<String> {
        self.keys_of(&self.half_checked_nodes())
    }

    pub fn expanded_keys(&self) -> Vec<String> {
        self.keys_of(&self.expanded_nodes())
    }

    pub fn matched_keys(&self) -> Vec<String> {
        self.keys_of(&self.matched_nodes())
    }

    // -------------------------------------------------------------------------
    // Key reconciliation
    // -------------------------------------------------------------------------

    /// Select exactly the nodes whose key is in `keys`.
    ///
    /// In single mode only the last matching node, in pre-order, stays
    /// selected.
    pub fn calc_selected_keys<S: AsRef<str>>(&mut self, keys: &[S], multiple: bool) {
        let wanted = self.resolve_keys(keys, "calc_selected_keys");
        let order = traverse::pre_order(&self.forest);
        let keep_single = if multiple {
            None
        } else {
            order.iter().rev().copied().find(|id| wanted.contains(id))
        };
        for id in order {
            let selected = match keep_single {
                Some(single) => id == single,
                None => wanted.contains(&id),
            };
            if let Some(node) = self.forest.get_mut(id) {
                node.set_selected(selected);
            }
        }
    }

    /// Expand exactly the nodes whose key is in `keys`.
    pub fn calc_expanded_keys<S: AsRef<str>>(&mut self, keys: &[S]) {
        let wanted = self.resolve_keys(keys, "calc_expanded_keys");
        for id in traverse::pre_order(&self.forest) {
            if let Some(node) = self.forest.get_mut(id) {
                node.set_expanded(wanted.contains(&id));
            }
        }
    }

    /// Check exactly the nodes whose key is in `keys`, then re-run the
    /// cascade unless `strict`. The strict flag becomes the engine's mode.
    pub fn calc_checked_keys<S: AsRef<str>>(&mut self, keys: &[S], strict: bool) {
        self.config.check_strictly = strict;
        let wanted = self.resolve_keys(keys, "calc_checked_keys");
        for id in traverse::pre_order(&self.forest) {
            if let Some(node) = self.forest.get_mut(id) {
                node.set_checked(wanted.contains(&id), false);
            }
        }
        self.refresh_check_state();
    }

    fn resolve_keys<S: AsRef<str>>(&self, keys: &[S], op: &str) -> HashSet<NodeId> {
        let mut ids = HashSet::with_capacity(keys.len());
        for key in keys {
            match self.forest.find(key.as_ref()) {
                Some(id) => {
                    ids.insert(id);
                }
                None => debug!("{}: ignoring unknown key '{}'", op, key.as_ref()),
            }
        }
        ids
    }

    // -------------------------------------------------------------------------
    // Node commands
    // -------------------------------------------------------------------------

    /// Select a node in response to user activation.
    ///
    /// Single mode replaces the selection, multi mode adds the node to it.
    /// Activating an already-selected node changes nothing. Disabled and
    /// unselectable nodes are ignored.
    pub fn set_node_active(&mut self, id: NodeId, multiple: bool) {
        let Some(node) = self.forest.get(id) else {
            debug!("set_node_active: unknown node {}", id);
            return;
        };
        if node.disabled || !node.selectable {
            debug!("set_node_active: {} is not selectable", id);
            return;
        }

        if multiple {
            if let Some(node) = self.forest.get_mut(id) {
                node.set_selected(true);
            }
            return;
        }

        for previous in self.selected_nodes() {
            if let Some(node) = self.forest.get_mut(previous) {
                node.set_selected(false);
            }
        }
        if let Some(node) = self.forest.get_mut(id) {
            node.set_selected(true);
        }
    }

    /// Check or uncheck a node and cascade unless in strict mode.
    ///
    /// Check-disabled nodes are ignored.
    pub fn set_node_checked(&mut self, id: NodeId, checked: bool) {
        let Some(node) = self.forest.get_mut(id) else {
            debug!("set_node_checked: unknown node {}", id);
            return;
        };
        if node.is_check_disabled() {
            debug!("set_node_checked: {} is check-disabled", id);
            return;
        }
        node.set_checked(checked, false);
        if !self.config.check_strictly {
            check::conduct(&mut self.forest, id);
        }
    }

    /// Expand or collapse one node.
    pub fn set_node_expanded(&mut self, id: NodeId, expanded: bool) {
        match self.forest.get_mut(id) {
            Some(node) => node.set_expanded(expanded),
            None => debug!("set_node_expanded: unknown node {}", id),
        }
    }

    // -------------------------------------------------------------------------
    // Check cascade
    // -------------------------------------------------------------------------

    /// Re-apply a node's checked value to its ancestors and descendants.
    pub fn conduct(&mut self, id: NodeId) {
        check::conduct(&mut self.forest, id);
    }

    /// Re-run the cascade for every checked node. No-op in strict mode.
    pub fn refresh_check_state(&mut self) {
        check::refresh_check_state(&mut self.forest, self.config.check_strictly);
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Match titles against `query` and expand the ancestors of every match.
    /// Returns the number of matches.
    pub fn search_expand(&mut self, query: Option<&str>) -> usize {
        search::search_expand(&mut self.forest, query)
    }

    // -------------------------------------------------------------------------
    // Drag and drop
    // -------------------------------------------------------------------------

    /// Record the node being dragged.
    pub fn set_selected_node(&mut self, node: Option<NodeId>) {
        self.selected_node = node.filter(|&id| self.forest.get(id).is_some());
    }

    /// The node being dragged.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected_node
    }

    /// Record the node currently hovered by a drag.
    pub fn set_target_node(&mut self, node: Option<NodeId>) {
        self.target_node = node.filter(|&id| self.forest.get(id).is_some());
    }

    pub fn target_node(&self) -> Option<NodeId> {
        self.target_node
    }

    /// Classify a pointer position against the hovered row's bounds.
    pub fn calc_drop_position(&self, pointer_y: f32, target: &Rect) -> DropPosition {
        drag::calc_drop_position(pointer_y, target, &self.config.drop_zone)
    }

    /// Move the dragged node relative to `target`.
    ///
    /// `drag_pos` is `-1` (before), `0` (inside) or `1` (after). Anything
    /// else, a missing target, a missing drag source, or a target inside the
    /// dragged subtree leaves the forest untouched. Returns whether the move
    /// was applied.
    pub fn drop_and_apply(&mut self, target: Option<NodeId>, drag_pos: i32) -> bool {
        let Some(target) = target else {
            debug!("drop_and_apply: no target");
            return false;
        };
        match DropPosition::try_from(drag_pos) {
            Ok(position) => self.drop_node(target, position),
            Err(err) => {
                debug!("drop_and_apply: {}", err);
                false
            }
        }
    }

    /// Typed form of [`drop_and_apply`](Self::drop_and_apply).
    pub fn drop_node(&mut self, target: NodeId, position: DropPosition) -> bool {
        let Some(source) = self.selected_node else {
            debug!("drop_node: no drag source");
            return false;
        };
        self.target_node = Some(target);
        drag::drop_and_apply(
            &mut self.forest,
            source,
            target,
            position,
            self.config.check_strictly,
        )
    }

    /// Recompute levels for the subtree rooted at `id`.
    pub fn reset_node_level(&mut self, id: NodeId) {
        self.forest.reset_level(id);
    }

    /// Re-run the upward cascade from every leaf.
    pub fn refresh_drag_node(&mut self) {
        drag::refresh_drag_node(&mut self.forest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TreeStateEngine {
        let mut engine = TreeStateEngine::new();
        engine
            .init_tree(vec![
                TreeNode::new("a", "A")
                    .child(TreeNode::new("b", "B").checked(true))
                    .child(TreeNode::new("c", "C")),
            ])
            .unwrap();
        engine
    }

    #[test]
    fn test_init_tree_defers_cascade() {
        let mut engine = engine();
        assert!(engine.has_deferred());
        assert!(engine.half_checked_keys().is_empty());

        assert_eq!(engine.run_deferred(), Some(Deferred::RefreshCheckState));
        assert_eq!(engine.half_checked_keys(), vec!["a"]);
        assert!(!engine.has_deferred());
        assert_eq!(engine.run_deferred(), None);
    }

    #[test]
    fn test_init_tree_error_keeps_forest() {
        let mut engine = engine();
        let result = engine.init_tree(vec![TreeNode::new("x", "X"), TreeNode::new("x", "Y")]);
        assert!(matches!(result, Err(TreeError::DuplicateKey(_))));
        assert!(engine.find("a").is_some());
    }

    #[test]
    fn test_init_tree_clears_drag_state() {
        let mut engine = engine();
        let b = engine.find("b").unwrap();
        engine.set_selected_node(Some(b));
        engine.set_target_node(Some(b));
        engine.init_tree(Vec::new()).unwrap();
        assert_eq!(engine.selected_node(), None);
        assert_eq!(engine.target_node(), None);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let mut engine = engine();
        let b = engine.find("b").unwrap();
        engine.init_tree(vec![TreeNode::new("b", "B")]).unwrap();
        engine.set_node_active(b, false);
        assert!(engine.selected_nodes().is_empty());
        engine.set_selected_node(Some(b));
        assert_eq!(engine.selected_node(), None);
    }
}
