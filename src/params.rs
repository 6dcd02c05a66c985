//! Derivation of effective node-size parameters from user input.

/// The default `max_entries` used by [`crate::RTree::new`].
pub const DEFAULT_MAX_ENTRIES: usize = 9;

const MIN_MAX_ENTRIES: usize = 4;
const MIN_MIN_ENTRIES: usize = 2;

/// Floors a user-supplied `max_entries` at 4, silently, as the original
/// design does (invalid construction parameters are not an error).
pub(crate) fn effective_max_entries(requested: usize) -> usize {
    let floored = requested.max(MIN_MAX_ENTRIES);
    if floored != requested {
        tracing::trace!(
            requested,
            floored,
            "max_entries below minimum, flooring to {}",
            MIN_MAX_ENTRIES
        );
    }
    floored
}

/// `min_entries = max(2, ceil(max_entries * 0.4))`.
pub(crate) fn effective_min_entries(max_entries: usize) -> usize {
    let scaled = (max_entries as f64 * 0.4).ceil() as usize;
    scaled.max(MIN_MIN_ENTRIES)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn max_entries_floors_at_four() {
        assert_eq!(effective_max_entries(1), 4);
        assert_eq!(effective_max_entries(4), 4);
        assert_eq!(effective_max_entries(9), 9);
    }

    #[test]
    fn min_entries_matches_formula() {
        assert_eq!(effective_min_entries(4), 2);
        assert_eq!(effective_min_entries(9), 4);
        assert_eq!(effective_min_entries(40), 16);
    }
}
