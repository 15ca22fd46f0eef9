//! Directed edges and their per-mode travel times.

use crate::mode::TravelMode;

use super::VertexIndex;

/// Travel times of an edge in minutes.
///
/// `None` means the edge cannot be used in that mode, e.g. a footpath has
/// no driving time and a motorway has no walking time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeWeights {
    /// Driving time, if cars may use the edge.
    pub drive: Option<f64>,
    /// Walking time, if pedestrians may use the edge.
    pub walk: Option<f64>,
}

impl EdgeWeights {
    /// Weights for an edge usable in both modes.
    #[must_use]
    pub const fn new(drive: f64, walk: f64) -> Self {
        Self {
            drive: Some(drive),
            walk: Some(walk),
        }
    }

    /// Weights for a road pedestrians may not use.
    #[must_use]
    pub const fn drive_only(drive: f64) -> Self {
        Self {
            drive: Some(drive),
            walk: None,
        }
    }

    /// Weights for a footpath cars may not use.
    #[must_use]
    pub const fn walk_only(walk: f64) -> Self {
        Self {
            drive: None,
            walk: Some(walk),
        }
    }

    /// Raw weight for `mode`.
    #[must_use]
    pub const fn get(&self, mode: TravelMode) -> Option<f64> {
        match mode {
            TravelMode::Drive => self.drive,
            TravelMode::Walk => self.walk,
        }
    }

    /// Weight a search may traverse in `mode`.
    ///
    /// Zero and absent weights both mark the edge as closed to that mode.
    #[must_use]
    pub fn usable(&self, mode: TravelMode) -> Option<f64> {
        self.get(mode).filter(|weight| *weight > 0.0)
    }
}

/// A directed connection between two vertices of one graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    from: VertexIndex,
    to: VertexIndex,
    weights: EdgeWeights,
}

impl Edge {
    pub(super) const fn new(from: VertexIndex, to: VertexIndex, weights: EdgeWeights) -> Self {
        Self { from, to, weights }
    }

    /// Tail of the edge.
    #[must_use]
    pub const fn from(&self) -> VertexIndex {
        self.from
    }

    /// Head of the edge.
    #[must_use]
    pub const fn to(&self) -> VertexIndex {
        self.to
    }

    /// Travel times of the edge.
    #[must_use]
    pub const fn weights(&self) -> EdgeWeights {
        self.weights
    }
}
