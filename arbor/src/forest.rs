//! Arena that owns every node of a tree widget.
//!
//! Ownership is strictly tree-shaped: a node id appears in exactly one
//! `children` list, or in `roots`. Parent links are plain ids kept next to
//! the ownership lists and are updated by [`Forest::attach`] and
//! [`Forest::detach`].

use std::collections::HashMap;

use crate::error::TreeError;
use crate::node::{ForestId, Node, NodeId, TreeNode};

#[derive(Debug, Clone, Default)]
pub struct Forest {
    id: ForestId,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    index: HashMap<String, NodeId>,
}

impl Forest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from owned root descriptions.
    ///
    /// Levels and parent links are derived from the nesting. Keys must be
    /// unique across the whole input.
    pub fn from_nodes(roots: Vec<TreeNode>) -> Result<Self, TreeError> {
        let mut forest = Self::new();
        // Depth-first so the arena order is pre-order.
        let mut stack: Vec<(TreeNode, Option<NodeId>)> =
            roots.into_iter().rev().map(|n| (n, None)).collect();

        while let Some((input, parent)) = stack.pop() {
            let id = forest.push(&input, parent)?;
            match parent.and_then(|p| forest.get_mut(p)) {
                Some(owner) => owner.children.push(id),
                None => forest.roots.push(id),
            }
            for child in input.children.into_iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        Ok(forest)
    }

    /// Decode a JSON array of [`TreeNode`] and build a forest from it.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let roots: Vec<TreeNode> = serde_json::from_str(json)?;
        Self::from_nodes(roots)
    }

    fn push(&mut self, input: &TreeNode, parent: Option<NodeId>) -> Result<NodeId, TreeError> {
        if self.index.contains_key(&input.key) {
            return Err(TreeError::DuplicateKey(input.key.clone()));
        }
        let level = parent
            .and_then(|p| self.get(p))
            .map(|p| p.level + 1)
            .unwrap_or(0);
        let id = NodeId {
            forest: self.id,
            index: self.nodes.len(),
        };
        self.nodes.push(Node {
            key: input.key.clone(),
            title: input.title.clone(),
            parent,
            children: Vec::new(),
            level,
            selected: input.selected,
            checked: input.checked,
            half_checked: false,
            expanded: input.expanded,
            matched: false,
            disabled: input.disabled,
            disable_checkbox: input.disable_checkbox,
            selectable: input.selectable,
        });
        self.index.insert(input.key.clone(), id);
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn id(&self) -> ForestId {
        self.id
    }

    /// Root nodes in display order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Resolve a node id. Ids from another forest never resolve.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.forest != self.id {
            return None;
        }
        self.nodes.get(id.index)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.forest != self.id {
            return None;
        }
        self.nodes.get_mut(id.index)
    }

    /// Find a node by key.
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Number of nodes owned by the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Iterate from the node's parent up to its root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            forest: self,
            next: self.parent(id),
        }
    }

    /// Whether `ancestor` owns `id` directly or transitively.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Sibling list that owns `id`: its parent's children, or the roots.
    pub fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => &self.roots,
        }
    }

    /// Index of the node within its sibling list.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.get(id)?;
        self.siblings(id).iter().position(|&s| s == id)
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Remove a node from its owner, keeping the order of the remaining
    /// siblings. The node keeps its own subtree and becomes parentless.
    pub(crate) fn detach(&mut self, id: NodeId) -> bool {
        let Some(position) = self.position(id) else {
            return false;
        };
        match self.parent(id) {
            Some(parent) => {
                if let Some(owner) = self.get_mut(parent) {
                    owner.children.remove(position);
                }
            }
            None => {
                self.roots.remove(position);
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
        true
    }

    /// Insert a detached node under `parent` (or among the roots) at `index`,
    /// appending when `index` is `None` or past the end.
    pub(crate) fn attach(&mut self, id: NodeId, parent: Option<NodeId>, index: Option<usize>) {
        let list = match parent {
            Some(p) => match self.get_mut(p) {
                Some(owner) => &mut owner.children,
                None => return,
            },
            None => &mut self.roots,
        };
        let at = index.unwrap_or(list.len()).min(list.len());
        list.insert(at, id);
        if let Some(node) = self.get_mut(id) {
            node.parent = parent;
        }
    }

    /// Recompute levels top-down for the subtree rooted at `id`.
    pub(crate) fn reset_level(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let level = self
                .parent(current)
                .and_then(|p| self.get(p))
                .map(|p| p.level + 1)
                .unwrap_or(0);
            let Some(node) = self.get_mut(current) else {
                continue;
            };
            node.level = level;
            stack.extend(node.children.iter().copied());
        }
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    forest: &'a Forest,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.forest.parent(current);
        Some(current)
    }
}
