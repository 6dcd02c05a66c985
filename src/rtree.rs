//! The public tree type: construction, mutation, and query operations.

use crate::bbox::BBox;
use crate::bulk_load;
use crate::error::RTreeError;
use crate::insert;
use crate::node::{all, Children, Node};
use crate::params::{effective_max_entries, effective_min_entries, DEFAULT_MAX_ENTRIES};
use crate::removal;
use crate::snapshot::{self, Snapshot};

/// A 2D R-tree over axis-aligned rectangles.
///
/// `Item` is the type being indexed; `F` maps an `Item` to the [`BBox`] it
/// occupies. The tree owns its items directly (not references), and holds
/// `to_bbox` alongside them rather than requiring `Item` to implement a
/// shared trait, so any existing type can be indexed without a wrapper.
pub struct RTree<Item, F>
where
    F: Fn(&Item) -> BBox,
{
    root: Node<Item>,
    max_entries: usize,
    min_entries: usize,
    to_bbox: F,
}

impl<Item, F> RTree<Item, F>
where
    F: Fn(&Item) -> BBox,
{
    /// Creates an empty tree with the default node fanout.
    pub fn new(to_bbox: F) -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES, to_bbox)
    }

    /// Creates an empty tree with a custom node fanout. Values below 4 are
    /// silently floored to 4, matching the original design's tolerance for
    /// degenerate construction parameters.
    pub fn with_max_entries(max_entries: usize, to_bbox: F) -> Self {
        let max_entries = effective_max_entries(max_entries);
        let min_entries = effective_min_entries(max_entries);
        RTree {
            root: Node::empty_leaf(),
            max_entries,
            min_entries,
            to_bbox,
        }
    }

    /// Inserts a single item, splitting nodes as needed.
    pub fn insert(&mut self, item: Item) {
        insert::insert(&mut self.root, item, self.max_entries, self.min_entries, &self.to_bbox);
    }

    /// Bulk-loads `items` into a freshly packed subtree and merges it into
    /// the existing tree. Faster and denser than inserting the same items
    /// one at a time, and intended for initial population rather than
    /// incremental updates, though it's safe to call on a non-empty tree.
    pub fn load(&mut self, items: Vec<Item>) {
        if items.is_empty() {
            return;
        }
        if items.len() < self.min_entries {
            for item in items {
                self.insert(item);
            }
            return;
        }
        if self.root.is_empty() {
            self.root = bulk_load::build(items, self.max_entries, &self.to_bbox);
            return;
        }

        let packed = bulk_load::build(items, self.max_entries, &self.to_bbox);
        let current = std::mem::replace(&mut self.root, Node::empty_leaf());

        self.root = if current.height == packed.height {
            let height = current.height + 1;
            let mut merged = Node::new_internal(smallvec::smallvec![Box::new(current), Box::new(packed)], height);
            crate::node::calc_bbox(&mut merged, &self.to_bbox);
            merged
        } else if current.height < packed.height {
            let level = packed.height - current.height - 1;
            let mut taller = packed;
            insert::insert_node(&mut taller, current, level, self.max_entries, self.min_entries, &self.to_bbox);
            taller
        } else {
            let level = current.height - packed.height - 1;
            let mut taller = current;
            insert::insert_node(&mut taller, packed, level, self.max_entries, self.min_entries, &self.to_bbox);
            taller
        };
    }

    /// All items whose bbox intersects `query`.
    pub fn search(&self, query: &BBox) -> Vec<&Item> {
        let mut out = Vec::new();
        self.search_node(&self.root, query, &mut out);
        out
    }

    fn search_node<'a>(&'a self, node: &'a Node<Item>, query: &BBox, out: &mut Vec<&'a Item>) {
        if !node.bbox.intersects(query) {
            return;
        }
        match &node.children {
            Children::Leaf(items) => {
                for item in items {
                    if query.intersects(&(self.to_bbox)(item)) {
                        out.push(item);
                    }
                }
            }
            Children::Internal(children) => {
                for child in children {
                    self.search_node(child, query, out);
                }
            }
        }
    }

    /// True iff any item's bbox intersects `query`. Short-circuits on the
    /// first match rather than collecting every hit like [`Self::search`].
    pub fn collides(&self, query: &BBox) -> bool {
        self.collides_node(&self.root, query)
    }

    fn collides_node(&self, node: &Node<Item>, query: &BBox) -> bool {
        if !node.bbox.intersects(query) {
            return false;
        }
        match &node.children {
            Children::Leaf(items) => items.iter().any(|item| query.intersects(&(self.to_bbox)(item))),
            Children::Internal(children) => children.iter().any(|child| self.collides_node(child, query)),
        }
    }

    /// Removes and returns the first item for which `matches` returns true
    /// and whose bbox lies along a traceable path from the root.
    pub fn remove_by(&mut self, item_bbox: &BBox, matches: impl Fn(&Item) -> bool) -> Option<Item> {
        let removed = removal::remove(&mut self.root, item_bbox, &matches, &self.to_bbox);
        if removed.is_some() {
            tracing::trace!("item removed");
        }
        removed
    }

    /// Empties the tree, discarding every item.
    pub fn clear(&mut self) {
        self.root = Node::empty_leaf();
    }

    /// Every item in the tree, in an unspecified order.
    pub fn all(&self) -> Vec<&Item> {
        let mut out = Vec::new();
        all(&self.root, &mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The root's height: 1 for an empty or single-leaf tree, increasing by
    /// one per internal level above that.
    pub fn height(&self) -> usize {
        self.root.height
    }

    /// The tree's overall bounding box, or the empty sentinel if the tree
    /// holds no items.
    pub fn bbox(&self) -> BBox {
        self.root.bbox
    }

    /// Deep-copies the tree into a [`Snapshot`] suitable for serialization.
    pub fn to_snapshot(&self) -> Snapshot<Item>
    where
        Item: Clone,
    {
        snapshot::to_snapshot(&self.root)
    }

    /// Rebuilds a tree from a [`Snapshot`] without validating its structure.
    /// The caller warrants that `snapshot` was produced by
    /// [`Self::to_snapshot`] (or is otherwise known-good); a malformed
    /// snapshot yields a tree that misbehaves rather than panics.
    pub fn from_snapshot(snapshot: Snapshot<Item>, to_bbox: F) -> Self {
        let max_entries = DEFAULT_MAX_ENTRIES;
        RTree {
            root: snapshot::from_snapshot(snapshot),
            max_entries,
            min_entries: effective_min_entries(max_entries),
            to_bbox,
        }
    }

    /// Rebuilds a tree from a [`Snapshot`], validating its structure and
    /// recomputing every bbox from `to_bbox` rather than trusting the
    /// snapshot's stored values.
    pub fn from_snapshot_checked(snapshot: Snapshot<Item>, to_bbox: F) -> Result<Self, RTreeError> {
        let root = snapshot::from_snapshot_checked(snapshot, &to_bbox)?;
        let max_entries = DEFAULT_MAX_ENTRIES;
        Ok(RTree {
            root,
            max_entries,
            min_entries: effective_min_entries(max_entries),
            to_bbox,
        })
    }
}

impl<Item, F> RTree<Item, F>
where
    F: Fn(&Item) -> BBox,
    Item: PartialEq,
{
    /// Removes and returns the first item equal to `item`.
    pub fn remove(&mut self, item: &Item) -> Option<Item> {
        self.remove_by(&(self.to_bbox)(item), |candidate| candidate == item)
    }
}
