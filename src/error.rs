//! Error types returned by fallible tree operations.

use std::fmt;

/// Failure modes for operations that validate external input before
/// trusting it, namely [`crate::RTree::from_snapshot_checked`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RTreeError {
    /// A [`crate::Snapshot`] failed structural validation: a node's stated
    /// height didn't match its children's, or an internal node had no
    /// children.
    InvalidSnapshot {
        /// Human-readable description of what was wrong.
        reason: String,
    },
}

impl fmt::Display for RTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RTreeError::InvalidSnapshot { reason } => write!(f, "invalid snapshot: {reason}"),
        }
    }
}

impl std::error::Error for RTreeError {}
