//! Plain-data mirror of the tree's node structure, used to export and
//! re-import a tree without going through repeated `insert` calls.

use crate::bbox::BBox;
use crate::error::RTreeError;
use crate::node::{calc_bbox, Children, Node};

/// A deep, owned copy of one node's worth of tree structure. `to_snapshot`
/// produces these recursively from the root down; `from_snapshot` and
/// `from_snapshot_checked` consume them back into a [`Node`] tree.
///
/// `leaf` is redundant with which [`SnapshotChildren`] variant is present
/// (`Leaf` iff `leaf`), but is kept as its own field so the serialized shape
/// carries the `leaf` flag the on-wire contract documents explicitly,
/// instead of requiring a reader to infer it from `children`'s tag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<Item> {
    pub leaf: bool,
    pub bbox: BBox,
    pub height: usize,
    pub children: SnapshotChildren<Item>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotChildren<Item> {
    Leaf(Vec<Item>),
    Internal(Vec<Snapshot<Item>>),
}

pub(crate) fn to_snapshot<Item: Clone>(node: &Node<Item>) -> Snapshot<Item> {
    let children = match &node.children {
        Children::Leaf(items) => SnapshotChildren::Leaf(items.iter().cloned().collect()),
        Children::Internal(children) => {
            SnapshotChildren::Internal(children.iter().map(|child| to_snapshot(child)).collect())
        }
    };
    Snapshot {
        leaf: node.is_leaf(),
        bbox: node.bbox,
        height: node.height,
        children,
    }
}

/// Rebuilds a [`Node`] tree from `snapshot` without checking that its
/// `bbox`/`height` fields are actually consistent with its contents. Callers
/// must only pass in a snapshot that was either produced by [`to_snapshot`]
/// or has already been validated some other way; garbage in produces a tree
/// that will silently misbehave rather than panic.
pub(crate) fn from_snapshot<Item>(snapshot: Snapshot<Item>) -> Node<Item> {
    let children = match snapshot.children {
        SnapshotChildren::Leaf(items) => Children::Leaf(items.into()),
        SnapshotChildren::Internal(children) => {
            Children::Internal(children.into_iter().map(|child| Box::new(from_snapshot(child))).collect())
        }
    };
    Node {
        children,
        bbox: snapshot.bbox,
        height: snapshot.height,
    }
}

/// Like [`from_snapshot`], but validates structure recursively and
/// recomputes every bbox from `to_bbox` rather than trusting the snapshot's
/// stored values. Rejects a snapshot whose declared height doesn't match its
/// children's, or whose internal node has no children.
pub(crate) fn from_snapshot_checked<Item>(
    snapshot: Snapshot<Item>,
    to_bbox: &impl Fn(&Item) -> BBox,
) -> Result<Node<Item>, RTreeError> {
    let leaf_shaped = matches!(snapshot.children, SnapshotChildren::Leaf(_));
    if snapshot.leaf != leaf_shaped {
        return Err(RTreeError::InvalidSnapshot {
            reason: format!(
                "leaf flag says {} but children are {}",
                snapshot.leaf,
                if leaf_shaped { "a leaf's items" } else { "an internal node's subtrees" }
            ),
        });
    }

    let node = match snapshot.children {
        SnapshotChildren::Leaf(items) => {
            if snapshot.height != 1 {
                return Err(RTreeError::InvalidSnapshot {
                    reason: format!("leaf node declared height {} but leaves must be height 1", snapshot.height),
                });
            }
            let mut node = Node::new_leaf(items.into());
            calc_bbox(&mut node, to_bbox);
            node
        }
        SnapshotChildren::Internal(children) => {
            if children.is_empty() {
                return Err(RTreeError::InvalidSnapshot {
                    reason: "internal node has no children".to_string(),
                });
            }
            let expected_child_height = snapshot.height.checked_sub(1).ok_or_else(|| RTreeError::InvalidSnapshot {
                reason: "internal node declared height 0".to_string(),
            })?;
            let mut built = Vec::with_capacity(children.len());
            for child in children {
                let declared = child.height;
                if declared != expected_child_height {
                    return Err(RTreeError::InvalidSnapshot {
                        reason: format!(
                            "child declared height {declared} but parent height {} requires {expected_child_height}",
                            snapshot.height
                        ),
                    });
                }
                built.push(Box::new(from_snapshot_checked(child, to_bbox)?));
            }
            let mut node = Node::new_internal(built.into(), snapshot.height);
            calc_bbox(&mut node, to_bbox);
            node
        }
    };
    Ok(node)
}
