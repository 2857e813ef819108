//! Title search with ancestor expansion.

use log::debug;

use crate::forest::Forest;
use crate::traverse;

/// Flag every node whose title contains `query` and expand its ancestors.
///
/// Matching is case-sensitive substring containment. Nodes that do not
/// match are collapsed, unless a later match below them expands them again.
/// An absent or empty query only clears previous matches. Returns the number
/// of matched nodes.
pub fn search_expand(forest: &mut Forest, query: Option<&str>) -> usize {
    let order = traverse::pre_order(forest);
    for &id in &order {
        if let Some(node) = forest.get_mut(id) {
            node.set_matched(false);
        }
    }

    let Some(query) = query.filter(|q| !q.is_empty()) else {
        debug!("search_expand: empty query, matches cleared");
        return 0;
    };

    // Pre-order visits ancestors first, so collapsing a non-matching node can
    // never undo an expansion made for one of its descendants.
    let mut matched = 0;
    for id in order {
        let is_match = forest.get(id).is_some_and(|n| n.title.contains(query));
        if is_match {
            matched += 1;
            if let Some(node) = forest.get_mut(id) {
                node.set_matched(true);
            }
            let ancestors: Vec<_> = forest.ancestors(id).collect();
            for ancestor in ancestors {
                if let Some(node) = forest.get_mut(ancestor) {
                    node.set_expanded(true);
                }
            }
        } else if let Some(node) = forest.get_mut(id) {
            node.set_expanded(false);
        }
    }

    debug!("search_expand: '{}' matched {} nodes", query, matched);
    matched
}
