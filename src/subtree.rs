//! Subtree choice: the minimum-enlargement heuristic used while descending
//! the tree during insertion.

use crate::bbox::BBox;
use crate::node::{Children, Node};

/// Among `node`'s children, picks the index of the child minimizing
/// `enlarged_area(bbox, child.bbox) - child.bbox.area()`, with ties broken by
/// the smaller `child.bbox.area()`. Iteration order is the children's
/// current order; if every candidate scores equally the first one wins.
///
/// Panics if `node` is a leaf; callers are expected to have already checked
/// [`Node::is_leaf`].
pub(crate) fn choose_child_index<Item>(node: &Node<Item>, bbox: &BBox) -> usize {
    let children = match &node.children {
        Children::Internal(children) => children,
        Children::Leaf(_) => panic!("choose_child_index called on a leaf node"),
    };

    let mut best_index = 0;
    let mut best_enlargement = f64::INFINITY;
    let mut best_area = f64::INFINITY;
    for (index, child) in children.iter().enumerate() {
        let enlargement = bbox.enlarged_area(&child.bbox) - child.bbox.area();
        let area = child.bbox.area();
        if enlargement < best_enlargement || (enlargement == best_enlargement && area < best_area) {
            best_enlargement = enlargement;
            best_area = area;
            best_index = index;
        }
    }
    best_index
}
