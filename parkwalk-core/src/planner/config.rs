//! Planner policies.

/// How to order parking vertices whose total times are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ParkingTieBreak {
    /// Prefer the candidate with the shorter walk.
    #[default]
    LessWalking,
    /// Prefer the candidate with the longer walk.
    MoreWalking,
}

/// Which leg of a drive-and-walk route may satisfy the must-include vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum IncludePolicy {
    /// Either leg.
    #[default]
    EitherLeg,
    /// Only the driving leg.
    DrivingLeg,
    /// Only the walking leg.
    WalkingLeg,
}

/// Tunable behaviour of [`RoutePlanner`](super::RoutePlanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Ordering among equally fast parking vertices.
    pub tie_break: ParkingTieBreak,
    /// Where the must-include vertex may appear.
    pub include_policy: IncludePolicy,
}

impl PlannerConfig {
    /// Replace the tie-break policy.
    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: ParkingTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Replace the must-include policy.
    #[must_use]
    pub const fn with_include_policy(mut self, include_policy: IncludePolicy) -> Self {
        self.include_policy = include_policy;
        self
    }
}
