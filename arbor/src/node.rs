use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

/// Identifies one forest built by [`crate::Forest`].
///
/// Every call to `init_tree` produces a fresh forest id, so node ids handed out
/// before a re-initialisation never resolve against the new forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForestId(usize);

impl ForestId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for ForestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a node owned by a [`crate::Forest`].
///
/// Handles are plain copies and never own the node they point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) forest: ForestId,
    pub(crate) index: usize,
}

impl NodeId {
    /// Position of the node in its forest's arena.
    pub fn index(self) -> usize {
        self.index
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.forest.0, self.index)
    }
}

/// A node living inside a forest.
///
/// Flags are read through the accessors; they only change through the
/// engine, which keeps the check cascade and drag state consistent.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) key: String,
    pub(crate) title: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) level: usize,

    pub(crate) selected: bool,
    pub(crate) checked: bool,
    pub(crate) half_checked: bool,
    pub(crate) expanded: bool,
    pub(crate) matched: bool,
    pub(crate) disabled: bool,
    pub(crate) disable_checkbox: bool,
    pub(crate) selectable: bool,
}

impl Node {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Owner of this node, `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Depth in the forest (0 = root).
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_half_checked(&self) -> bool {
        self.half_checked
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_disable_checkbox(&self) -> bool {
        self.disable_checkbox
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Whether the node blocks the check cascade in both directions.
    pub fn is_check_disabled(&self) -> bool {
        self.disabled || self.disable_checkbox
    }

    /// Set the checked state. A checked node is never half-checked.
    pub(crate) fn set_checked(&mut self, checked: bool, half_checked: bool) {
        self.checked = checked;
        self.half_checked = !checked && half_checked;
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_matched(&mut self, matched: bool) {
        self.matched = matched;
    }
}

/// Owned description of a node and its subtree, handed to `init_tree`.
///
/// # Example
///
/// ```
/// use arbor::TreeNode;
///
/// let project = TreeNode::new("project", "project")
///     .expanded(true)
///     .child(TreeNode::new("readme", "README.md"))
///     .child(TreeNode::new("locked", "Cargo.lock").disable_checkbox(true));
/// assert_eq!(project.children.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeNode {
    pub key: String,
    pub title: String,
    pub children: Vec<TreeNode>,
    pub checked: bool,
    pub selected: bool,
    pub expanded: bool,
    pub disabled: bool,
    pub disable_checkbox: bool,
    pub selectable: bool,
}

impl Default for TreeNode {
    fn default() -> Self {
        Self {
            key: String::new(),
            title: String::new(),
            children: Vec::new(),
            checked: false,
            selected: false,
            expanded: false,
            disabled: false,
            disable_checkbox: false,
            selectable: true,
        }
    }
}

impl TreeNode {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Append a child.
    pub fn child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children in order.
    pub fn children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Lock the checkbox while leaving the row selectable.
    pub fn disable_checkbox(mut self, disable_checkbox: bool) -> Self {
        self.disable_checkbox = disable_checkbox;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }
}
