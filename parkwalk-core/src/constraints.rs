//! Per-request routing constraints.
//!
//! A [`ConstraintSet`] speaks in external vertex ids and is what callers
//! build from a request. Before searching, the planner resolves it against a
//! [`Graph`] into a [`SearchFilter`], which speaks in vertex indices and is
//! what the shortest-path engine consults while relaxing edges.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::graph::{Graph, VertexId, VertexIndex};

/// Errors raised while validating constraints against a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    /// A constraint names a vertex the graph does not contain.
    #[error("constraint references unknown location {id}")]
    UnknownVertex {
        /// The unknown identifier.
        id: VertexId,
    },
    /// The walking budget is negative or not a number.
    #[error("maximum walking time must be a non-negative number, got {minutes}")]
    InvalidWalkBudget {
        /// The rejected budget.
        minutes: f64,
    },
}

/// An undirected pair of vertex ids.
///
/// Endpoints are stored in ascending order so `(a, b)` and `(b, a)` compare
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    low: VertexId,
    high: VertexId,
}

impl Segment {
    /// Create a segment between `a` and `b`.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Both endpoints, smaller id first.
    #[must_use]
    pub const fn endpoints(self) -> (VertexId, VertexId) {
        (self.low, self.high)
    }
}

impl From<(VertexId, VertexId)> for Segment {
    fn from((a, b): (VertexId, VertexId)) -> Self {
        Self::new(a, b)
    }
}

/// Upper bound on the walking leg.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WalkBudget {
    /// Any amount of walking is acceptable.
    #[default]
    Unlimited,
    /// At most this many minutes of walking.
    Minutes(f64),
}

impl WalkBudget {
    /// Whether a walk of `minutes` fits the budget. The bound is inclusive.
    #[must_use]
    pub const fn allows(self, minutes: f64) -> bool {
        match self {
            Self::Unlimited => minutes.is_finite(),
            Self::Minutes(limit) => minutes <= limit,
        }
    }

    /// The limit in minutes, or `None` when unlimited.
    #[must_use]
    pub const fn minutes(self) -> Option<f64> {
        match self {
            Self::Unlimited => None,
            Self::Minutes(limit) => Some(limit),
        }
    }
}

/// Avoid lists, walking budget and optional must-include vertex of one
/// request.
///
/// # Examples
/// ```
/// use parkwalk_core::ConstraintSet;
///
/// let constraints = ConstraintSet::new()
///     .avoiding_nodes([4, 7])
///     .avoiding_segments([(2, 3)])
///     .with_max_walk_time(10.0)?
///     .with_must_include(5);
/// assert!(!constraints.is_unconstrained());
/// # Ok::<(), parkwalk_core::ConstraintError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSet {
    avoid_nodes: BTreeSet<VertexId>,
    avoid_segments: BTreeSet<Segment>,
    max_walk_time: WalkBudget,
    must_include: Option<VertexId>,
}

impl ConstraintSet {
    /// An empty constraint set with no walking limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices the route must not pass through.
    #[must_use]
    pub fn avoiding_nodes(mut self, ids: impl IntoIterator<Item = VertexId>) -> Self {
        self.avoid_nodes.extend(ids);
        self
    }

    /// Add segments the route must not traverse in either direction.
    #[must_use]
    pub fn avoiding_segments<S>(mut self, segments: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<Segment>,
    {
        self.avoid_segments
            .extend(segments.into_iter().map(Into::into));
        self
    }

    /// Cap the walking leg at `minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::InvalidWalkBudget`] for a negative or NaN
    /// budget.
    pub fn with_max_walk_time(mut self, minutes: f64) -> Result<Self, ConstraintError> {
        if minutes.is_nan() || minutes < 0.0 {
            return Err(ConstraintError::InvalidWalkBudget { minutes });
        }
        self.max_walk_time = if minutes.is_infinite() {
            WalkBudget::Unlimited
        } else {
            WalkBudget::Minutes(minutes)
        };
        Ok(self)
    }

    /// Require the route to pass through `id`.
    #[must_use]
    pub const fn with_must_include(mut self, id: VertexId) -> Self {
        self.must_include = Some(id);
        self
    }

    /// Vertices to avoid.
    #[must_use]
    pub const fn avoid_nodes(&self) -> &BTreeSet<VertexId> {
        &self.avoid_nodes
    }

    /// Segments to avoid.
    #[must_use]
    pub const fn avoid_segments(&self) -> &BTreeSet<Segment> {
        &self.avoid_segments
    }

    /// Walking budget.
    #[must_use]
    pub const fn max_walk_time(&self) -> WalkBudget {
        self.max_walk_time
    }

    /// Vertex the route must pass through.
    #[must_use]
    pub const fn must_include(&self) -> Option<VertexId> {
        self.must_include
    }

    /// Whether the set restricts the topology at all.
    ///
    /// The walking budget does not count; it only affects the walking leg.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.avoid_nodes.is_empty() && self.avoid_segments.is_empty() && self.must_include.is_none()
    }

    /// Translate the set into index space for `graph`.
    ///
    /// Vertices in `exempt` are never blocked, even when listed as avoided;
    /// the must-include vertex is always exempt.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::UnknownVertex`] if any id is not in the
    /// graph.
    pub fn resolve(
        &self,
        graph: &Graph,
        exempt: &[VertexIndex],
    ) -> Result<SearchFilter, ConstraintError> {
        let lookup = |id: VertexId| {
            graph
                .index_of(id)
                .ok_or(ConstraintError::UnknownVertex { id })
        };
        let must_include = self.must_include.map(lookup).transpose()?;

        let mut filter = SearchFilter::default();
        for &id in &self.avoid_nodes {
            let index = lookup(id)?;
            if exempt.contains(&index) || must_include == Some(index) {
                log::warn!("ignoring avoided location {id}: it is an endpoint of the request");
                continue;
            }
            filter.avoid_nodes.insert(index);
        }
        for segment in &self.avoid_segments {
            let (a, b) = segment.endpoints();
            filter.avoid_segments.insert(segment_key(lookup(a)?, lookup(b)?));
        }
        Ok(filter)
    }
}

fn segment_key(a: VertexIndex, b: VertexIndex) -> (VertexIndex, VertexIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Resolved constraints consulted during edge relaxation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    avoid_nodes: HashSet<VertexIndex>,
    avoid_segments: HashSet<(VertexIndex, VertexIndex)>,
}

impl SearchFilter {
    /// A filter that blocks nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Copy of this filter that additionally blocks `nodes`.
    #[must_use]
    pub fn with_extra_avoided_nodes(
        &self,
        nodes: impl IntoIterator<Item = VertexIndex>,
    ) -> Self {
        let mut filter = self.clone();
        filter.avoid_nodes.extend(nodes);
        filter
    }

    /// Copy of this filter that additionally blocks `segments`.
    #[must_use]
    pub fn with_extra_avoided_segments(
        &self,
        segments: impl IntoIterator<Item = (VertexIndex, VertexIndex)>,
    ) -> Self {
        let mut filter = self.clone();
        filter
            .avoid_segments
            .extend(segments.into_iter().map(|(a, b)| segment_key(a, b)));
        filter
    }

    /// Whether a search may not enter `index`.
    #[must_use]
    pub fn blocks_vertex(&self, index: VertexIndex) -> bool {
        self.avoid_nodes.contains(&index)
    }

    /// Whether the segment between `a` and `b` is closed.
    #[must_use]
    pub fn blocks_segment(&self, a: VertexIndex, b: VertexIndex) -> bool {
        self.avoid_segments.contains(&segment_key(a, b))
    }

    /// Whether the filter blocks nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.avoid_nodes.is_empty() && self.avoid_segments.is_empty()
    }
}
