//! Recursive insertion: descend via [`choose_child_index`], extending
//! ancestor bboxes on the way down, then split any node left overflowing on
//! the way back up, cascading as far as the root.

use crate::bbox::BBox;
use crate::node::{Children, Node};
use crate::split;
use crate::subtree::choose_child_index;

/// Inserts `item` into the tree rooted at `root`, splitting nodes (and the
/// root itself, growing the tree's height by one) as needed to keep every
/// node within `max_entries`.
pub(crate) fn insert<Item>(
    root: &mut Node<Item>,
    item: Item,
    max_entries: usize,
    min_entries: usize,
    to_bbox: &impl Fn(&Item) -> BBox,
) {
    if let Some(sibling) = insert_at(root, item, max_entries, min_entries, to_bbox) {
        tracing::debug!(new_height = root.height + 1, "root split, tree grew by one level");
        split::split_root(root, sibling, to_bbox);
    }
}

/// Inserts `item` somewhere in the subtree rooted at `node`, returning a new
/// sibling for `node` if doing so overflowed it past `max_entries`.
fn insert_at<Item>(
    node: &mut Node<Item>,
    item: Item,
    max_entries: usize,
    min_entries: usize,
    to_bbox: &impl Fn(&Item) -> BBox,
) -> Option<Node<Item>> {
    node.bbox.extend(&to_bbox(&item));

    if node.is_leaf() {
        match &mut node.children {
            Children::Leaf(items) => items.push(item),
            Children::Internal(_) => unreachable!(),
        }
    } else {
        let index = choose_child_index(node, &to_bbox(&item));
        let children = match &mut node.children {
            Children::Internal(children) => children,
            Children::Leaf(_) => unreachable!(),
        };
        if let Some(sibling) = insert_at(&mut children[index], item, max_entries, min_entries, to_bbox) {
            tracing::trace!(index, "node split while inserting");
            children.insert(index + 1, Box::new(sibling));
        }
    }

    if node.len() > max_entries {
        Some(split::split(node, min_entries, to_bbox))
    } else {
        None
    }
}

/// Inserts a whole subtree `to_insert` as a descendant `level` levels below
/// `root` (`level == 0` attaches it as a direct child), used when merging a
/// freshly bulk-packed subtree into an existing tree at the matching height.
pub(crate) fn insert_node<Item>(
    root: &mut Node<Item>,
    to_insert: Node<Item>,
    level: usize,
    max_entries: usize,
    min_entries: usize,
    to_bbox: &impl Fn(&Item) -> BBox,
) {
    if let Some(sibling) = insert_node_at(root, to_insert, level, max_entries, min_entries, to_bbox) {
        tracing::debug!(new_height = root.height + 1, "root split while merging a packed subtree");
        split::split_root(root, sibling, to_bbox);
    }
}

fn insert_node_at<Item>(
    node: &mut Node<Item>,
    to_insert: Node<Item>,
    level: usize,
    max_entries: usize,
    min_entries: usize,
    to_bbox: &impl Fn(&Item) -> BBox,
) -> Option<Node<Item>> {
    node.bbox.extend(&to_insert.bbox);

    if level == 0 {
        match &mut node.children {
            Children::Internal(children) => children.push(Box::new(to_insert)),
            Children::Leaf(_) => unreachable!("level-0 merge target must be internal"),
        }
    } else {
        let index = choose_child_index(node, &to_insert.bbox);
        let children = match &mut node.children {
            Children::Internal(children) => children,
            Children::Leaf(_) => unreachable!("level > 0 merge target must be internal"),
        };
        if let Some(sibling) =
            insert_node_at(&mut children[index], to_insert, level - 1, max_entries, min_entries, to_bbox)
        {
            children.insert(index + 1, Box::new(sibling));
        }
    }

    if node.len() > max_entries {
        Some(split::split(node, min_entries, to_bbox))
    } else {
        None
    }
}
