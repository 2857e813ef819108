//! Drag-and-drop reordering.
//!
//! A drop is classified against the hovered row ([`calc_drop_position`]) and
//! then applied to the forest ([`drop_and_apply`]): the dragged node is
//! detached from its owner and re-attached before, after, or inside the
//! target. Levels are recomputed for the affected subtree and, outside strict
//! mode, the check cascade is re-run from every leaf so ancestors reflect the
//! new structure.

use log::debug;

use crate::check;
use crate::config::DropZone;
use crate::error::TreeError;
use crate::forest::Forest;
use crate::geometry::Rect;
use crate::node::NodeId;
use crate::traverse;

/// Where a dragged node lands relative to the hovered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropPosition {
    /// Insert as the previous sibling (`-1`).
    Before,
    /// Append as the last child (`0`).
    Inside,
    /// Insert as the next sibling (`1`).
    After,
}

impl DropPosition {
    pub fn as_i8(self) -> i8 {
        match self {
            DropPosition::Before => -1,
            DropPosition::Inside => 0,
            DropPosition::After => 1,
        }
    }
}

impl TryFrom<i32> for DropPosition {
    type Error = TreeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(DropPosition::Before),
            0 => Ok(DropPosition::Inside),
            1 => Ok(DropPosition::After),
            other => Err(TreeError::InvalidDropPosition(other)),
        }
    }
}

impl From<DropPosition> for i32 {
    fn from(position: DropPosition) -> Self {
        position.as_i8().into()
    }
}

/// Classify a pointer position against a hovered row.
///
/// The top and bottom bands of the row (see [`DropZone::gap`]) insert before
/// and after the row; everything in between nests inside it.
pub fn calc_drop_position(pointer_y: f32, target: &Rect, zone: &DropZone) -> DropPosition {
    let gap = zone.gap(target.height);
    if pointer_y <= target.top() + gap {
        DropPosition::Before
    } else if pointer_y >= target.bottom() - gap {
        DropPosition::After
    } else {
        DropPosition::Inside
    }
}

/// Move `source` relative to `target`.
///
/// Returns false, leaving the forest untouched, when either node is unknown
/// or when `target` lies inside the subtree of `source`. Check state is left
/// alone when `check_strictly` is set.
pub fn drop_and_apply(
    forest: &mut Forest,
    source: NodeId,
    target: NodeId,
    position: DropPosition,
    check_strictly: bool,
) -> bool {
    if forest.get(source).is_none() || forest.get(target).is_none() {
        debug!("drop_and_apply: unknown source {} or target {}", source, target);
        return false;
    }
    if source == target || forest.is_ancestor(source, target) {
        debug!("drop_and_apply: {} cannot be dropped into its own subtree", source);
        return false;
    }

    forest.detach(source);

    match position {
        DropPosition::Inside => {
            forest.attach(source, Some(target), None);
            forest.reset_level(target);
        }
        DropPosition::Before | DropPosition::After => {
            let offset = usize::from(position == DropPosition::After);
            let index = forest.position(target).map(|i| i + offset);
            match forest.parent(target) {
                Some(parent) => {
                    forest.attach(source, Some(parent), index);
                    forest.reset_level(parent);
                }
                None => {
                    forest.attach(source, None, index);
                    forest.reset_level(source);
                }
            }
        }
    }

    debug!(
        "drop_and_apply: moved {} {:?} {}",
        source, position, target
    );
    if !check_strictly {
        refresh_drag_node(forest);
    }
    true
}

/// Recompute ancestor check state from every leaf reachable from the roots.
///
/// A leaf has nothing below it to be partially checked, so any half flag
/// left over from children it lost is cleared first.
pub fn refresh_drag_node(forest: &mut Forest) {
    let leaves = traverse::leaves(forest);
    for &leaf in &leaves {
        if let Some(node) = forest.get_mut(leaf) {
            let checked = node.checked;
            node.set_checked(checked, false);
        }
    }
    for leaf in leaves {
        check::conduct_up(forest, leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TreeNode;

    fn zone() -> DropZone {
        DropZone::default()
    }

    #[test]
    fn test_calc_drop_position_bands() {
        // 40 high, so each edge band is 10.
        let row = Rect::new(0.0, 100.0, 200.0, 40.0);
        assert_eq!(calc_drop_position(100.0, &row, &zone()), DropPosition::Before);
        assert_eq!(calc_drop_position(110.0, &row, &zone()), DropPosition::Before);
        assert_eq!(calc_drop_position(120.0, &row, &zone()), DropPosition::Inside);
        assert_eq!(calc_drop_position(130.0, &row, &zone()), DropPosition::After);
        assert_eq!(calc_drop_position(140.0, &row, &zone()), DropPosition::After);
    }

    #[test]
    fn test_calc_drop_position_uses_min_gap_for_short_rows() {
        // 4 high: 25% is 1, so the 2 minimum applies and there is no inside band.
        let row = Rect::new(0.0, 0.0, 10.0, 4.0);
        assert_eq!(calc_drop_position(2.0, &row, &zone()), DropPosition::Before);
        assert_eq!(calc_drop_position(2.5, &row, &zone()), DropPosition::After);
    }

    #[test]
    fn test_calc_drop_position_custom_zone() {
        let row = Rect::new(0.0, 0.0, 10.0, 100.0);
        let wide = DropZone::new(0.4, 0.0);
        assert_eq!(calc_drop_position(39.0, &row, &wide), DropPosition::Before);
        assert_eq!(calc_drop_position(50.0, &row, &wide), DropPosition::Inside);
        assert_eq!(calc_drop_position(61.0, &row, &wide), DropPosition::After);
    }

    #[test]
    fn test_drop_position_from_i32() {
        assert_eq!(DropPosition::try_from(-1).unwrap(), DropPosition::Before);
        assert_eq!(DropPosition::try_from(0).unwrap(), DropPosition::Inside);
        assert_eq!(DropPosition::try_from(1).unwrap(), DropPosition::After);
        assert!(matches!(
            DropPosition::try_from(2),
            Err(TreeError::InvalidDropPosition(2))
        ));
        assert_eq!(i32::from(DropPosition::Before), -1);
    }

    #[test]
    fn test_drop_into_own_subtree_is_rejected() {
        let mut forest = Forest::from_nodes(vec![
            TreeNode::new("a", "A").child(TreeNode::new("b", "B")),
        ])
        .unwrap();
        let a = forest.find("a").unwrap();
        let b = forest.find("b").unwrap();
        assert!(!drop_and_apply(&mut forest, a, b, DropPosition::Inside, false));
        assert!(!drop_and_apply(&mut forest, a, a, DropPosition::After, false));
        assert_eq!(forest.roots(), &[a]);
        assert_eq!(forest.children(a), &[b]);
    }

    #[test]
    fn test_drop_after_sibling_under_parent() {
        let mut forest = Forest::from_nodes(vec![
            TreeNode::new("p", "P")
                .child(TreeNode::new("a", "A"))
                .child(TreeNode::new("b", "B"))
                .child(TreeNode::new("c", "C")),
        ])
        .unwrap();
        let p = forest.find("p").unwrap();
        let a = forest.find("a").unwrap();
        let b = forest.find("b").unwrap();
        let c = forest.find("c").unwrap();

        assert!(drop_and_apply(&mut forest, a, b, DropPosition::After, false));
        assert_eq!(forest.children(p), &[b, a, c]);
        assert_eq!(forest.get(a).unwrap().level(), 1);
    }

    #[test]
    fn test_drop_before_root_promotes_subtree() {
        let mut forest = Forest::from_nodes(vec![
            TreeNode::new("r", "R").child(
                TreeNode::new("n", "N").child(TreeNode::new("leaf", "Leaf")),
            ),
        ])
        .unwrap();
        let r = forest.find("r").unwrap();
        let n = forest.find("n").unwrap();
        let leaf = forest.find("leaf").unwrap();

        assert!(drop_and_apply(&mut forest, n, r, DropPosition::Before, false));
        assert_eq!(forest.roots(), &[n, r]);
        assert_eq!(forest.get(n).unwrap().level(), 0);
        assert_eq!(forest.get(leaf).unwrap().level(), 1);
        assert!(forest.get(r).unwrap().is_leaf());
    }

    #[test]
    fn test_refresh_after_drop_updates_old_and_new_parent() {
        let mut forest = Forest::from_nodes(vec![
            TreeNode::new("p", "P")
                .child(TreeNode::new("a", "A").checked(true))
                .child(TreeNode::new("b", "B")),
            TreeNode::new("q", "Q").child(TreeNode::new("c", "C")),
        ])
        .unwrap();
        check::refresh_check_state(&mut forest, false);
        let p = forest.find("p").unwrap();
        let a = forest.find("a").unwrap();
        let c = forest.find("c").unwrap();
        let q = forest.find("q").unwrap();
        assert!(forest.get(p).unwrap().is_half_checked());

        assert!(drop_and_apply(&mut forest, a, c, DropPosition::After, false));
        assert!(!forest.get(p).unwrap().is_checked());
        assert!(!forest.get(p).unwrap().is_half_checked());
        assert!(forest.get(q).unwrap().is_half_checked());
    }

    #[test]
    fn test_parent_emptied_by_drop_loses_half_flag() {
        let mut forest = Forest::from_nodes(vec![
            TreeNode::new("p", "P").child(
                TreeNode::new("a", "A")
                    .child(TreeNode::new("a1", "A1").checked(true))
                    .child(TreeNode::new("a2", "A2")),
            ),
            TreeNode::new("r", "R"),
        ])
        .unwrap();
        check::refresh_check_state(&mut forest, false);
        let p = forest.find("p").unwrap();
        let a = forest.find("a").unwrap();
        let r = forest.find("r").unwrap();
        assert!(forest.get(p).unwrap().is_half_checked());

        assert!(drop_and_apply(&mut forest, a, r, DropPosition::After, false));
        let p_node = forest.get(p).unwrap();
        assert!(p_node.is_leaf());
        assert!(!p_node.is_half_checked());
        assert!(!p_node.is_checked());
        assert!(forest.get(a).unwrap().is_half_checked());
    }

    #[test]
    fn test_strict_drop_leaves_check_state_alone() {
        let mut forest = Forest::from_nodes(vec![
            TreeNode::new("p", "P").child(TreeNode::new("c", "C").checked(true)),
            TreeNode::new("x", "X"),
        ])
        .unwrap();
        let p = forest.find("p").unwrap();
        let x = forest.find("x").unwrap();

        assert!(drop_and_apply(&mut forest, x, p, DropPosition::Before, true));
        assert_eq!(forest.roots(), &[x, p]);
        assert!(!forest.get(p).unwrap().is_checked());
        assert!(!forest.get(p).unwrap().is_half_checked());
    }
}
