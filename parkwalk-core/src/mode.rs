//! Travel modes and traversal directions shared by the graph and search.

use std::fmt;

/// Which edge weight a search reads.
///
/// The same graph carries both driving and walking times; a search selects
/// one of them rather than using a separate graph per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// Use the edge's driving time.
    Drive,
    /// Use the edge's walking time.
    Walk,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drive => f.write_str("drive"),
            Self::Walk => f.write_str("walk"),
        }
    }
}

/// Whether a search follows edges as stored or against their direction.
///
/// A reverse search from `t` yields, for every vertex `v`, the shortest
/// distance from `v` to `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Follow outgoing edges.
    #[default]
    Forward,
    /// Follow incoming edges backwards.
    Reverse,
}
