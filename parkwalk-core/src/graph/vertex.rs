//! Vertices and the per-search state attached to them.

use std::fmt;

use crate::mode::TravelMode;

/// External identifier of a location, as used in input files and requests.
pub type VertexId = u64;

/// Dense position of a vertex inside one [`Graph`](super::Graph).
///
/// Indices are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexIndex(usize);

impl VertexIndex {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A location in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    id: VertexId,
    name: String,
    code: String,
    parking: bool,
    pub(super) outgoing: Vec<usize>,
    pub(super) incoming: Vec<usize>,
}

impl Vertex {
    /// Construct a vertex without edges.
    ///
    /// # Examples
    /// ```
    /// use parkwalk_core::Vertex;
    ///
    /// let vertex = Vertex::new(3, "Market Square", "MS", true);
    /// assert_eq!(vertex.id(), 3);
    /// assert!(vertex.has_parking());
    /// ```
    pub fn new(id: VertexId, name: impl Into<String>, code: impl Into<String>, parking: bool) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            parking,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// External identifier.
    #[must_use]
    pub const fn id(&self) -> VertexId {
        self.id
    }

    /// Human-readable location name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short code used by distance records.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether a vehicle may be left here to continue on foot.
    #[must_use]
    pub const fn has_parking(&self) -> bool {
        self.parking
    }

    /// Number of outgoing edges.
    #[must_use]
    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }
}

/// Mutable shortest-path bookkeeping for one vertex.
///
/// Distances start at infinity and only decrease during a search. Once
/// `visited` is set the distance of the active mode is final.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    dist_drive: f64,
    dist_walk: f64,
    pred_drive: Option<VertexIndex>,
    pred_walk: Option<VertexIndex>,
    visited: bool,
    queue_index: Option<usize>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            dist_drive: f64::INFINITY,
            dist_walk: f64::INFINITY,
            pred_drive: None,
            pred_walk: None,
            visited: false,
            queue_index: None,
        }
    }
}

impl SearchState {
    /// Tentative (or final, once visited) distance for `mode`.
    #[must_use]
    pub const fn distance(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Drive => self.dist_drive,
            TravelMode::Walk => self.dist_walk,
        }
    }

    /// Whether the last search for `mode` reached this vertex.
    #[must_use]
    pub const fn is_reached(&self, mode: TravelMode) -> bool {
        self.distance(mode).is_finite()
    }

    /// Neighbour on the best path found for `mode`.
    ///
    /// For a forward search this is the previous vertex from the start; for
    /// a reverse search it is the next vertex towards the start.
    #[must_use]
    pub const fn predecessor(&self, mode: TravelMode) -> Option<VertexIndex> {
        match mode {
            TravelMode::Drive => self.pred_drive,
            TravelMode::Walk => self.pred_walk,
        }
    }

    /// Whether the current search has settled this vertex.
    #[must_use]
    pub const fn is_visited(&self) -> bool {
        self.visited
    }

    /// Slot in the active priority queue.
    #[must_use]
    pub const fn queue_index(&self) -> Option<usize> {
        self.queue_index
    }

    pub(crate) const fn start(&mut self, mode: TravelMode) {
        self.improve(mode, 0.0, None);
    }

    pub(crate) const fn improve(
        &mut self,
        mode: TravelMode,
        distance: f64,
        predecessor: Option<VertexIndex>,
    ) {
        match mode {
            TravelMode::Drive => {
                self.dist_drive = distance;
                self.pred_drive = predecessor;
            }
            TravelMode::Walk => {
                self.dist_walk = distance;
                self.pred_walk = predecessor;
            }
        }
    }

    pub(crate) const fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) const fn set_queue_index(&mut self, slot: Option<usize>) {
        self.queue_index = slot;
    }

    /// Clear everything, including both modes' results.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear `mode`'s distance and predecessor plus the traversal flags,
    /// keeping the other mode's results.
    pub(crate) const fn reset_mode(&mut self, mode: TravelMode) {
        self.improve(mode, f64::INFINITY, None);
        self.visited = false;
        self.queue_index = None;
    }
}
