//! Overlap-minimizing tile packing (OMT-style) bulk load.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::bbox::BBox;
use crate::node::{calc_bbox, Node};
use crate::select::multi_select;

/// Builds a balanced subtree over `items`, consuming them. `max_entries` is
/// the node fanout cap; the returned node's height is `ceil(log_max_entries
/// items.len())` (or 1, for `items.len() <= max_entries`).
///
/// Works in two passes: [`reorder`] packs `items` into the final OMT layout
/// in place using [`multi_select`] (stripes by x, then tiles by y, per
/// §4.7), and [`assemble`] then walks that same layout left to right,
/// draining it into owned leaf groups. The two passes recompute identical
/// group sizes from `n` and `height` alone, so they agree on where each
/// group's boundary falls without needing to share any other state.
pub(crate) fn build<Item>(
    mut items: Vec<Item>,
    max_entries: usize,
    to_bbox: &impl Fn(&Item) -> BBox,
) -> Node<Item> {
    let n = items.len();
    let height = tree_height(n, max_entries);
    reorder(&mut items, height, max_entries, to_bbox);

    let mut remaining: VecDeque<Item> = items.into();
    assemble(&mut remaining, n, height, max_entries, to_bbox)
}

pub(crate) fn tree_height(n: usize, max_entries: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let mut height = 1;
    let mut capacity = max_entries;
    while capacity < n {
        capacity *= max_entries;
        height += 1;
    }
    height
}

/// For a subtree covering `n` items at the given `height`, returns `(n1,
/// n2)`: the target item count per x-stripe and per y-tile, per §4.7.
fn stripe_and_tile_sizes(n: usize, height: usize, max_entries: usize) -> (usize, usize) {
    let m = max_entries.pow((height - 1) as u32).max(1);
    let entries_per_node = div_ceil(n, m);
    let n2 = div_ceil(n, entries_per_node);
    let stripe_count = (entries_per_node as f64).sqrt().ceil() as usize;
    let n1 = n2 * stripe_count.max(1);
    (n1, n2)
}

/// Packs `items` into OMT order in place: sorted into x-stripes of size
/// `n1`, each stripe sorted into y-tiles of size `n2`, each tile recursively
/// packed one level down. Leaves the contents of each eventual leaf
/// contiguous and in left-to-right tree order, without fully sorting within
/// a tile (uses [`multi_select`] rather than a comparison sort).
fn reorder<Item>(items: &mut [Item], height: usize, max_entries: usize, to_bbox: &impl Fn(&Item) -> BBox) {
    let n = items.len();
    if n <= max_entries {
        return;
    }

    let (n1, n2) = stripe_and_tile_sizes(n, height, max_entries);

    multi_select(items, 0, n - 1, n1, &|a, b| {
        to_bbox(a).min_x.partial_cmp(&to_bbox(b).min_x).unwrap()
    });

    let mut stripe_start = 0;
    while stripe_start < n {
        let stripe_end = (stripe_start + n1).min(n);
        let stripe = &mut items[stripe_start..stripe_end];
        let stripe_len = stripe.len();

        multi_select(stripe, 0, stripe_len - 1, n2, &|a, b| {
            to_bbox(a).min_y.partial_cmp(&to_bbox(b).min_y).unwrap()
        });

        let mut tile_start = 0;
        while tile_start < stripe_len {
            let tile_end = (tile_start + n2).min(stripe_len);
            reorder(&mut stripe[tile_start..tile_end], height - 1, max_entries, to_bbox);
            tile_start = tile_end;
        }

        stripe_start = stripe_end;
    }
}

/// Consumes `n` items from the front of `remaining` (which must already be
/// in [`reorder`]'s output order) and assembles them into a subtree of the
/// given `height`, recomputing the same stripe/tile group sizes `reorder`
/// used so the groups line up without any shared bookkeeping beyond `n`.
fn assemble<Item>(
    remaining: &mut VecDeque<Item>,
    n: usize,
    height: usize,
    max_entries: usize,
    to_bbox: &impl Fn(&Item) -> BBox,
) -> Node<Item> {
    if n <= max_entries {
        let items: SmallVec<[Item; crate::node::INLINE_CHILDREN]> =
            (0..n).map(|_| remaining.pop_front().expect("enough items remain")).collect();
        let mut node = Node::new_leaf(items);
        calc_bbox(&mut node, to_bbox);
        return node;
    }

    let (n1, n2) = stripe_and_tile_sizes(n, height, max_entries);

    let mut children = SmallVec::new();
    let mut stripe_remaining = n;
    while stripe_remaining > 0 {
        let stripe_n = n1.min(stripe_remaining);
        let mut tile_remaining = stripe_n;
        while tile_remaining > 0 {
            let tile_n = n2.min(tile_remaining);
            children.push(Box::new(assemble(remaining, tile_n, height - 1, max_entries, to_bbox)));
            tile_remaining -= tile_n;
        }
        stripe_remaining -= stripe_n;
    }

    let mut node = Node::new_internal(children, height);
    calc_bbox(&mut node, to_bbox);
    node
}

fn div_ceil(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}
