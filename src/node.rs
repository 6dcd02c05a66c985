//! The tagged tree node: either a leaf holding user items, or an internal
//! node holding child nodes, plus a cached bounding box and a height.

use smallvec::SmallVec;

use crate::bbox::BBox;

/// Inline capacity for a node's children before `SmallVec` spills to the
/// heap. Chosen to comfortably hold the default `max_entries` (9) without
/// allocating.
pub(crate) const INLINE_CHILDREN: usize = 9;

/// A node's children, tagged by whether they are user items (a leaf) or
/// further nodes (an internal node). This replaces the heterogeneous,
/// runtime-cast container of the original design with a Rust enum, so a leaf
/// can never hold a node and vice versa.
pub(crate) enum Children<Item> {
    Leaf(SmallVec<[Item; INLINE_CHILDREN]>),
    Internal(SmallVec<[Box<Node<Item>>; INLINE_CHILDREN]>),
}

pub(crate) struct Node<Item> {
    pub children: Children<Item>,
    pub bbox: BBox,
    pub height: usize,
}

impl<Item> Node<Item> {
    /// A fresh, empty leaf node of height 1 — the state of a brand new or
    /// just-cleared tree's root.
    pub fn empty_leaf() -> Self {
        Node {
            children: Children::Leaf(SmallVec::new()),
            bbox: BBox::empty(),
            height: 1,
        }
    }

    pub fn new_leaf(items: SmallVec<[Item; INLINE_CHILDREN]>) -> Self {
        Node {
            children: Children::Leaf(items),
            bbox: BBox::empty(),
            height: 1,
        }
    }

    pub fn new_internal(children: SmallVec<[Box<Node<Item>>; INLINE_CHILDREN]>, height: usize) -> Self {
        Node {
            children: Children::Internal(children),
            bbox: BBox::empty(),
            height,
        }
    }

    /// `leaf ⇔ height == 1`, expressed as a derived property rather than a
    /// separately stored flag that could drift out of sync.
    pub fn is_leaf(&self) -> bool {
        self.height == 1
    }

    pub fn len(&self) -> usize {
        match &self.children {
            Children::Leaf(items) => items.len(),
            Children::Internal(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn leaf_items(&self) -> &[Item] {
        match &self.children {
            Children::Leaf(items) => items,
            Children::Internal(_) => &[],
        }
    }

    pub fn internal_children(&self) -> &[Box<Node<Item>>] {
        match &self.children {
            Children::Internal(nodes) => nodes,
            Children::Leaf(_) => &[],
        }
    }
}

/// Resets `node.bbox` to the empty rectangle and re-extends it by every
/// child's rectangle, with the supplied `to_bbox` used to obtain an item's
/// rectangle in the leaf case.
pub(crate) fn calc_bbox<Item>(node: &mut Node<Item>, to_bbox: &impl Fn(&Item) -> BBox) {
    let mut bbox = BBox::empty();
    match &node.children {
        Children::Leaf(items) => {
            for item in items {
                bbox.extend(&to_bbox(item));
            }
        }
        Children::Internal(nodes) => {
            for child in nodes {
                bbox.extend(&child.bbox);
            }
        }
    }
    node.bbox = bbox;
}

/// The union of the rectangles of `node.children[k..p)`, used by split-index
/// scoring. Items are resolved to rectangles through `to_bbox`; internal
/// children use their cached bbox directly.
pub(crate) fn dist_bbox<Item>(
    node: &Node<Item>,
    k: usize,
    p: usize,
    to_bbox: &impl Fn(&Item) -> BBox,
) -> BBox {
    let mut bbox = BBox::empty();
    match &node.children {
        Children::Leaf(items) => {
            for item in &items[k..p] {
                bbox.extend(&to_bbox(item));
            }
        }
        Children::Internal(nodes) => {
            for child in &nodes[k..p] {
                bbox.extend(&child.bbox);
            }
        }
    }
    bbox
}

/// Depth-first traversal over the subtree rooted at `node`, visiting
/// children via a LIFO work-list (the order in which items are yielded
/// matches a stack-based, last-child-pushed-next-visited walk).
pub(crate) fn all<'a, Item>(node: &'a Node<Item>, out: &mut Vec<&'a Item>) {
    let mut stack: Vec<&Node<Item>> = vec![node];
    while let Some(current) = stack.pop() {
        match &current.children {
            Children::Leaf(items) => out.extend(items.iter()),
            Children::Internal(nodes) => stack.extend(nodes.iter().map(|n| n.as_ref())),
        }
    }
}
