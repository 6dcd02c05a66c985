//! Removal: recursive descent to a matching leaf item, condensing the path
//! back to the root as the recursion unwinds. No forced reinsertion of
//! orphaned subtrees is performed (§4.10); an emptied child is simply
//! detached, and a surviving child has its bbox recomputed.

use crate::bbox::BBox;
use crate::node::{calc_bbox, Children, Node};

/// Removes the first item in the tree rooted at `root` for which `matches`
/// returns true, provided its bounding box (as given by `item_bbox`) falls
/// within the bboxes along the path to it. Returns the removed item, if any.
///
/// Every child whose bbox contains `item_bbox` is tried in turn; the first
/// one that yields a match wins; siblings aren't be touched. This mirrors
/// §4.9's descent without needing an explicit path stack — backtracking
/// falls out of the recursion itself.
pub(crate) fn remove<Item>(
    root: &mut Node<Item>,
    item_bbox: &BBox,
    matches: &impl Fn(&Item) -> bool,
    to_bbox: &impl Fn(&Item) -> BBox,
) -> Option<Item> {
    let removed = remove_at(root, item_bbox, matches, to_bbox);
    if removed.is_some() {
        if root.is_empty() {
            // A non-leaf root can be left with zero children (every child
            // emptied and detached on the way back up); reset to a fresh
            // leaf rather than leaving a non-leaf node with height != 1.
            *root = Node::empty_leaf();
        } else {
            calc_bbox(root, to_bbox);
        }
    }
    removed
}

fn remove_at<Item>(
    node: &mut Node<Item>,
    item_bbox: &BBox,
    matches: &impl Fn(&Item) -> bool,
    to_bbox: &impl Fn(&Item) -> BBox,
) -> Option<Item> {
    if node.is_leaf() {
        let items = match &mut node.children {
            Children::Leaf(items) => items,
            Children::Internal(_) => unreachable!(),
        };
        let position = items.iter().position(|item| matches(item))?;
        return Some(items.remove(position));
    }

    if !node.bbox.contains(item_bbox) {
        return None;
    }

    let children = match &mut node.children {
        Children::Internal(children) => children,
        Children::Leaf(_) => unreachable!(),
    };

    for index in 0..children.len() {
        if !children[index].bbox.contains(item_bbox) {
            continue;
        }
        if let Some(removed) = remove_at(&mut children[index], item_bbox, matches, to_bbox) {
            if children[index].is_empty() {
                children.remove(index);
            } else {
                calc_bbox(&mut children[index], to_bbox);
            }
            return Some(removed);
        }
    }

    None
}
