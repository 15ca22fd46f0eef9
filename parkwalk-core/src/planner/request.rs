//! Route requests.

use crate::constraints::ConstraintSet;
use crate::graph::VertexId;

/// One route query.
///
/// # Examples
/// ```
/// use parkwalk_core::{ConstraintSet, RouteRequest};
///
/// let request = RouteRequest::new(1, 4)
///     .with_constraints(ConstraintSet::new().with_max_walk_time(5.0)?);
/// assert!(request.driving);
/// # Ok::<(), parkwalk_core::ConstraintError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Where the route starts.
    pub source: VertexId,
    /// Where the route ends.
    pub destination: VertexId,
    /// Whether the route may start by driving to a parking vertex.
    pub driving: bool,
    /// Avoid lists, walking budget and must-include vertex.
    pub constraints: ConstraintSet,
    /// Whether to try walking the whole way when no drive-and-walk route
    /// fits the constraints.
    pub walk_fallback: bool,
}

impl RouteRequest {
    /// A drive-and-walk request with no constraints.
    #[must_use]
    pub fn new(source: VertexId, destination: VertexId) -> Self {
        Self {
            source,
            destination,
            driving: true,
            constraints: ConstraintSet::default(),
            walk_fallback: true,
        }
    }

    /// A request that may only walk.
    #[must_use]
    pub fn walking(source: VertexId, destination: VertexId) -> Self {
        Self {
            driving: false,
            ..Self::new(source, destination)
        }
    }

    /// Replace the constraints.
    #[must_use]
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    /// Disable the pure-walk fallback.
    #[must_use]
    pub const fn without_walk_fallback(mut self) -> Self {
        self.walk_fallback = false;
        self
    }
}
