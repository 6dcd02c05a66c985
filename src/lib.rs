//! A 2D R-tree spatial index over axis-aligned rectangles.
//!
//! [`RTree`] indexes items of any type `Item`, given a function mapping an
//! `Item` to the [`BBox`] it occupies. Items are inserted one at a time with
//! [`RTree::insert`] or packed all at once with [`RTree::load`]; both keep
//! every node within a configurable fanout by splitting along the axis and
//! index that minimize bounding-box overlap.
//!
//! ```
//! use boxtree::{BBox, RTree};
//!
//! let mut tree = RTree::new(|rect: &(f64, f64, f64, f64)| {
//!     BBox::new(rect.0, rect.1, rect.2, rect.3)
//! });
//! tree.insert((0.0, 0.0, 1.0, 1.0));
//! tree.insert((5.0, 5.0, 6.0, 6.0));
//!
//! let hits = tree.search(&BBox::new(0.5, 0.5, 0.5, 0.5));
//! assert_eq!(hits, vec![&(0.0, 0.0, 1.0, 1.0)]);
//! ```

mod bbox;
mod bulk_load;
mod error;
mod insert;
mod node;
mod params;
mod removal;
mod select;
mod snapshot;
mod split;
mod subtree;

mod rtree;

pub use bbox::BBox;
pub use error::RTreeError;
pub use params::DEFAULT_MAX_ENTRIES;
pub use rtree::RTree;
pub use snapshot::{Snapshot, SnapshotChildren};
