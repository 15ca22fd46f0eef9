use thiserror::Error;

use crate::constraints::ConstraintError;
use crate::search::SearchError;

/// Why no route satisfied a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum NoRouteReason {
    /// The destination cannot be reached.
    #[error("destination is unreachable")]
    Unreachable,
    /// Every candidate walk is longer than the walking budget.
    #[error("walking time exceeds the budget")]
    WalkBudgetExceeded,
    /// No candidate route passes through the must-include vertex.
    #[error("no route passes through the required location")]
    MustIncludeMissed,
    /// A predecessor chain did not lead back to the search start.
    #[error("path reconstruction failed")]
    BrokenPredecessorChain,
    /// No parking vertex is reachable by car and connected on foot.
    #[error("no parking location connects source and destination")]
    NoParkingReachable,
}

/// Errors returned by the planners.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// No route satisfies the request.
    #[error("no feasible route: {0}")]
    NoFeasibleRoute(#[from] NoRouteReason),
    /// The request names unknown vertices or an invalid budget.
    #[error(transparent)]
    InvalidConstraint(#[from] ConstraintError),
    /// The shortest-path search failed.
    #[error("route search failed: {0}")]
    Search(#[from] SearchError),
}
