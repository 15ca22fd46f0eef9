//! Planner outputs.

use crate::graph::VertexId;

/// A planned journey: an optional driving leg followed by a walking leg.
///
/// When both legs are present they share exactly the parking vertex: the
/// driving leg ends where the walking leg starts.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Vertices driven through, source first. Empty for walk-only routes.
    pub driving_leg: Vec<VertexId>,
    /// Vertices walked through, ending at the destination.
    pub walking_leg: Vec<VertexId>,
    /// Minutes spent driving.
    pub drive_time: f64,
    /// Minutes spent walking.
    pub walk_time: f64,
    /// Where the vehicle is left, or `None` when the whole route is walked.
    pub parking: Option<VertexId>,
}

impl RouteResult {
    /// A route that stays at `vertex`.
    #[must_use]
    pub fn stationary(vertex: VertexId) -> Self {
        Self {
            walking_leg: vec![vertex],
            ..Self::default()
        }
    }

    /// Total travel time in minutes.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "route time is the sum of both legs")]
    pub const fn total_time(&self) -> f64 {
        self.drive_time + self.walk_time
    }

    /// Whether any part of the route is driven.
    #[must_use]
    pub fn is_walk_only(&self) -> bool {
        self.driving_leg.is_empty()
    }

    /// Every vertex of the route in travel order, the parking vertex once.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        let skip = usize::from(!self.driving_leg.is_empty());
        self.driving_leg
            .iter()
            .chain(self.walking_leg.iter().skip(skip))
            .copied()
    }

    /// Whether `vertex` lies on either leg.
    #[must_use]
    pub fn visits(&self, vertex: VertexId) -> bool {
        self.driving_leg.contains(&vertex) || self.walking_leg.contains(&vertex)
    }
}

/// A driven path with its duration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrivenRoute {
    /// Vertices in travel order.
    pub path: Vec<VertexId>,
    /// Minutes spent driving.
    pub drive_time: f64,
}

/// Answer to a driving-only request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrivingPlan {
    /// Fastest route satisfying the constraints.
    pub best: DrivenRoute,
    /// Fastest route sharing no intermediate vertex or segment with `best`.
    /// Only computed for unconstrained requests.
    pub alternative: Option<DrivenRoute>,
    /// Whether avoid lists or a must-include vertex shaped `best`.
    pub restricted: bool,
}
