//! Drive, park and walk route planning.
//!
//! [`RoutePlanner::plan`] answers a [`RouteRequest`] with two searches over
//! the same graph: a forward driving search from the source and a reverse
//! walking search from the destination. Every parking vertex reached by both
//! is a candidate hand-over point; the planner picks the fastest one whose
//! walk fits the budget and reconstructs both legs from the predecessor
//! links left in the graph.
//!
//! Driving-only requests go through [`RoutePlanner::plan_driving`], and
//! [`RoutePlanner::relaxed_suggestions`] lifts the walking budget and finds
//! detours around the best route.

mod config;
mod driving;
mod error;
mod path;
mod relaxed;
mod request;
mod result;

use std::cmp::Ordering;

use crate::constraints::{SearchFilter, WalkBudget};
use crate::graph::{Graph, VertexId, VertexIndex};
use crate::mode::TravelMode;
use crate::search::{SearchParams, shortest_paths};

pub use config::{IncludePolicy, ParkingTieBreak, PlannerConfig};
pub use error::{NoRouteReason, PlanError};
pub use path::reconstruct_path;
pub use request::RouteRequest;
pub use result::{DrivenRoute, DrivingPlan, RouteResult};

/// Plans routes according to a [`PlannerConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutePlanner {
    config: PlannerConfig,
}

/// Plan `request` with the default policies.
///
/// # Errors
///
/// See [`RoutePlanner::plan`].
///
/// # Examples
/// ```
/// use parkwalk_core::{RouteRequest, plan_route, test_support::scenario_graph};
///
/// let mut graph = scenario_graph()?;
/// let route = plan_route(&mut graph, &RouteRequest::new(1, 4))?;
/// assert_eq!(route.driving_leg, vec![1, 2, 3]);
/// assert_eq!(route.walking_leg, vec![3, 4]);
/// assert_eq!(route.parking, Some(3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn plan_route(graph: &mut Graph, request: &RouteRequest) -> Result<RouteResult, PlanError> {
    RoutePlanner::default().plan(graph, request)
}

/// Plan a driving-only `request` with the default policies.
///
/// # Errors
///
/// See [`RoutePlanner::plan_driving`].
pub fn plan_driving(graph: &mut Graph, request: &RouteRequest) -> Result<DrivingPlan, PlanError> {
    RoutePlanner::default().plan_driving(graph, request)
}

/// Request endpoints and constraints translated into index space.
#[derive(Debug)]
struct Resolved {
    source: VertexIndex,
    destination: VertexIndex,
    source_id: VertexId,
    destination_id: VertexId,
    /// Must-include vertex, unless it is an endpoint and thus always visited.
    include: Option<(VertexIndex, VertexId)>,
    filter: SearchFilter,
    budget: WalkBudget,
}

impl Resolved {
    fn new(graph: &Graph, request: &RouteRequest) -> Result<Self, PlanError> {
        let constraints = &request.constraints;
        let lookup = |id: VertexId| {
            graph
                .index_of(id)
                .ok_or(crate::constraints::ConstraintError::UnknownVertex { id })
        };
        let source = lookup(request.source)?;
        let destination = lookup(request.destination)?;
        let include = constraints
            .must_include()
            .map(|id| lookup(id).map(|index| (index, id)))
            .transpose()?
            .filter(|&(index, _)| index != source && index != destination);
        let filter = constraints.resolve(graph, &[source, destination])?;
        Ok(Self {
            source,
            destination,
            source_id: request.source,
            destination_id: request.destination,
            include,
            filter,
            budget: constraints.max_walk_time(),
        })
    }

    fn include_id(&self) -> Option<VertexId> {
        self.include.map(|(_, id)| id)
    }
}

/// A parking vertex reached by both searches.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    index: VertexIndex,
    id: VertexId,
    drive: f64,
    walk: f64,
}

impl Candidate {
    #[expect(clippy::float_arithmetic, reason = "total time sums both legs")]
    const fn total(&self) -> f64 {
        self.drive + self.walk
    }
}

/// A single-mode path with its duration.
#[derive(Debug, Clone, PartialEq)]
struct Leg {
    path: Vec<VertexIndex>,
    time: f64,
}

impl Leg {
    /// Append `next`, which must start where `self` ends.
    #[expect(clippy::float_arithmetic, reason = "joined legs add their times")]
    fn then(mut self, next: Self) -> Self {
        self.path.extend(next.path.into_iter().skip(1));
        self.time += next.time;
        self
    }
}

/// Shortest `mode` path from `from` to `to`, or `None` when unreachable.
fn leg(
    graph: &mut Graph,
    from: VertexIndex,
    to: VertexIndex,
    mode: TravelMode,
    filter: &SearchFilter,
) -> Result<Option<Leg>, PlanError> {
    shortest_paths(graph, from, SearchParams::forward(mode).until(to), filter)?;
    let time = graph
        .state(to)
        .map_or(f64::INFINITY, |state| state.distance(mode));
    if !time.is_finite() {
        return Ok(None);
    }
    let path = reconstruct_path(graph, from, to, mode)?;
    Ok(Some(Leg { path, time }))
}

impl RoutePlanner {
    /// Create a planner with explicit policies.
    #[must_use]
    pub const fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The planner's policies.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Find the fastest route for `request`.
    ///
    /// When driving is allowed the planner looks for the best drive, park
    /// and walk combination. If no parking vertex is reachable, or none fits
    /// the walking budget, and the request allows it, walking the whole way
    /// is tried instead. Missing the must-include vertex is final. A request
    /// whose source equals its destination yields a stationary route.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidConstraint`] when the request names unknown
    ///   vertices.
    /// - [`PlanError::NoFeasibleRoute`] when no route satisfies the
    ///   constraints. After a failed walking fallback the reason from the
    ///   drive-and-walk attempt is reported.
    /// - [`PlanError::Search`] when search bookkeeping breaks.
    pub fn plan(
        &self,
        graph: &mut Graph,
        request: &RouteRequest,
    ) -> Result<RouteResult, PlanError> {
        let resolved = Resolved::new(graph, request)?;
        graph.reset();
        if resolved.source == resolved.destination && resolved.include.is_none() {
            return Ok(RouteResult::stationary(resolved.source_id));
        }
        if !request.driving {
            return self.walk_only(graph, &resolved);
        }
        match self.drive_park_walk(graph, &resolved) {
            Err(PlanError::NoFeasibleRoute(
                reason @ (NoRouteReason::WalkBudgetExceeded | NoRouteReason::NoParkingReachable),
            )) if request.walk_fallback => {
                log::info!(
                    "no drive and walk route from {} to {} ({reason}); trying to walk",
                    resolved.source_id,
                    resolved.destination_id
                );
                self.walk_only(graph, &resolved).map_err(|err| match err {
                    PlanError::NoFeasibleRoute(_) => PlanError::NoFeasibleRoute(reason),
                    other => other,
                })
            }
            outcome => outcome,
        }
    }

    fn drive_park_walk(
        &self,
        graph: &mut Graph,
        resolved: &Resolved,
    ) -> Result<RouteResult, PlanError> {
        let ranked = self.ranked_candidates(graph, resolved)?;
        if ranked.is_empty() {
            return Err(NoRouteReason::NoParkingReachable.into());
        }
        let mut within_budget = ranked
            .into_iter()
            .filter(|candidate| resolved.budget.allows(candidate.walk))
            .peekable();
        if within_budget.peek().is_none() {
            return Err(NoRouteReason::WalkBudgetExceeded.into());
        }
        for candidate in within_budget {
            let route = route_via(graph, resolved, candidate)?;
            if self.includes(&route, resolved.include_id()) {
                log::info!(
                    "parking at {} ({} min driving, {} min walking)",
                    candidate.id,
                    candidate.drive,
                    candidate.walk
                );
                return Ok(route);
            }
        }
        Err(NoRouteReason::MustIncludeMissed.into())
    }

    /// Run both searches and rank every parking vertex they connect.
    fn ranked_candidates(
        &self,
        graph: &mut Graph,
        resolved: &Resolved,
    ) -> Result<Vec<Candidate>, PlanError> {
        self.ranked_with(graph, resolved, &resolved.filter, &resolved.filter)
    }

    /// As [`Self::ranked_candidates`], with separate filters per search.
    fn ranked_with(
        &self,
        graph: &mut Graph,
        resolved: &Resolved,
        drive: &SearchFilter,
        walk: &SearchFilter,
    ) -> Result<Vec<Candidate>, PlanError> {
        shortest_paths(
            graph,
            resolved.source,
            SearchParams::forward(TravelMode::Drive),
            drive,
        )?;
        shortest_paths(
            graph,
            resolved.destination,
            SearchParams::reverse(TravelMode::Walk),
            walk,
        )?;

        let mut candidates: Vec<Candidate> = graph
            .vertices()
            .filter(|&(index, vertex)| {
                vertex.has_parking()
                    && index != resolved.source
                    && !resolved.filter.blocks_vertex(index)
            })
            .filter_map(|(index, vertex)| {
                let state = graph.state(index)?;
                (state.is_reached(TravelMode::Drive) && state.is_reached(TravelMode::Walk)).then(
                    || Candidate {
                        index,
                        id: vertex.id(),
                        drive: state.distance(TravelMode::Drive),
                        walk: state.distance(TravelMode::Walk),
                    },
                )
            })
            .collect();
        candidates.sort_by(|a, b| self.compare(a, b));
        log::debug!("{} parking candidates", candidates.len());
        Ok(candidates)
    }

    fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        a.total()
            .total_cmp(&b.total())
            .then_with(|| match self.config.tie_break {
                ParkingTieBreak::LessWalking => a.walk.total_cmp(&b.walk),
                ParkingTieBreak::MoreWalking => b.walk.total_cmp(&a.walk),
            })
            .then_with(|| a.id.cmp(&b.id))
    }

    fn includes(&self, route: &RouteResult, include: Option<VertexId>) -> bool {
        let Some(id) = include else {
            return true;
        };
        match self.config.include_policy {
            IncludePolicy::EitherLeg => route.visits(id),
            IncludePolicy::DrivingLeg => route.driving_leg.contains(&id),
            IncludePolicy::WalkingLeg => route.walking_leg.contains(&id),
        }
    }

    /// Walk the whole way, through the must-include vertex if there is one.
    fn walk_only(&self, graph: &mut Graph, resolved: &Resolved) -> Result<RouteResult, PlanError> {
        let walk = |network: &mut Graph, from, to| {
            leg(network, from, to, TravelMode::Walk, &resolved.filter)
        };
        let route = match resolved.include {
            Some((via, _)) => {
                let first = walk(graph, resolved.source, via)?
                    .ok_or(NoRouteReason::MustIncludeMissed)?;
                let second = walk(graph, via, resolved.destination)?
                    .ok_or(NoRouteReason::MustIncludeMissed)?;
                first.then(second)
            }
            None => walk(graph, resolved.source, resolved.destination)?
                .ok_or(NoRouteReason::Unreachable)?,
        };
        if !resolved.budget.allows(route.time) {
            return Err(NoRouteReason::WalkBudgetExceeded.into());
        }
        Ok(RouteResult {
            driving_leg: Vec::new(),
            walking_leg: path::to_ids(graph, &route.path),
            drive_time: 0.0,
            walk_time: route.time,
            parking: None,
        })
    }
}

/// Rebuild both legs through `candidate` from the two search trees.
fn route_via(
    graph: &Graph,
    resolved: &Resolved,
    candidate: Candidate,
) -> Result<RouteResult, NoRouteReason> {
    let driving = reconstruct_path(graph, resolved.source, candidate.index, TravelMode::Drive)
        .map_err(|_| NoRouteReason::BrokenPredecessorChain)?;
    let walking = path::trace(graph, candidate.index, resolved.destination, TravelMode::Walk)?;
    Ok(RouteResult {
        driving_leg: path::to_ids(graph, &driving),
        walking_leg: path::to_ids(graph, &walking),
        drive_time: candidate.drive,
        walk_time: candidate.walk,
        parking: Some(candidate.id),
    })
}
