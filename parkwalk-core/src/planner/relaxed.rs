//! Parking suggestions that ignore the walking budget.
//!
//! The first suggestion is the best drive, park and walk route with the
//! budget lifted. Each further suggestion closes one segment of the previous
//! suggestion at a time, replans, and keeps the best route found, so it may
//! park at the same vertex by another road.

use std::cmp::Ordering;

use crate::constraints::SearchFilter;
use crate::graph::{Graph, VertexId, VertexIndex};

use super::{
    Candidate, NoRouteReason, PlanError, Resolved, RoutePlanner, RouteRequest, RouteResult,
    route_via,
};

/// A ranked candidate and the route through it.
#[derive(Debug)]
struct Pick {
    candidate: Candidate,
    route: RouteResult,
}

impl RoutePlanner {
    /// Up to `count` drive-and-walk routes, best first, ignoring the walking
    /// budget.
    ///
    /// Useful when [`RoutePlanner::plan`] fails with
    /// [`NoRouteReason::WalkBudgetExceeded`]. Neither endpoint may be the
    /// parking vertex. After the first route, each suggestion is the best
    /// route left once a single segment of the previous suggestion is
    /// closed: driving segments are closed to the driving search and walking
    /// segments to the walking search. Routes already suggested are skipped.
    /// Avoid lists and the must-include policy still apply. The request's
    /// driving flag is ignored.
    ///
    /// # Errors
    ///
    /// - [`PlanError::NoFeasibleRoute`] when no parking vertex connects the
    ///   source and destination, or none passes the must-include vertex.
    /// - [`PlanError::InvalidConstraint`] and [`PlanError::Search`] as for
    ///   [`RoutePlanner::plan`].
    pub fn relaxed_suggestions(
        &self,
        graph: &mut Graph,
        request: &RouteRequest,
        count: usize,
    ) -> Result<Vec<RouteResult>, PlanError> {
        let resolved = Resolved::new(graph, request)?;
        graph.reset();
        if count == 0 {
            return Ok(Vec::new());
        }
        let first = self.best_relaxed(graph, &resolved, &resolved.filter, &resolved.filter, &[])?;
        let mut suggestions = vec![first.route];
        while suggestions.len() < count {
            let Some(previous) = suggestions.last() else {
                break;
            };
            match self.detour(graph, &resolved, previous, &suggestions)? {
                Some(route) => suggestions.push(route),
                None => break,
            }
        }
        log::debug!("{} relaxed suggestions", suggestions.len());
        Ok(suggestions)
    }

    /// Best budget-free route under the given filters, skipping `taken`.
    fn best_relaxed(
        &self,
        graph: &mut Graph,
        resolved: &Resolved,
        drive: &SearchFilter,
        walk: &SearchFilter,
        taken: &[RouteResult],
    ) -> Result<Pick, PlanError> {
        let ranked: Vec<Candidate> = self
            .ranked_with(graph, resolved, drive, walk)?
            .into_iter()
            .filter(|candidate| candidate.index != resolved.destination)
            .collect();
        if ranked.is_empty() {
            return Err(NoRouteReason::NoParkingReachable.into());
        }
        for candidate in ranked {
            let route = route_via(graph, resolved, candidate)?;
            if self.includes(&route, resolved.include_id()) && !taken.contains(&route) {
                return Ok(Pick { candidate, route });
            }
        }
        Err(NoRouteReason::MustIncludeMissed.into())
    }

    /// Best route with one segment of `previous` closed, if any.
    fn detour(
        &self,
        graph: &mut Graph,
        resolved: &Resolved,
        previous: &RouteResult,
        taken: &[RouteResult],
    ) -> Result<Option<RouteResult>, PlanError> {
        let open = &resolved.filter;
        let closed_drive = segments(graph, &previous.driving_leg)
            .into_iter()
            .map(|segment| (open.with_extra_avoided_segments([segment]), open.clone()));
        let closed_walk = segments(graph, &previous.walking_leg)
            .into_iter()
            .map(|segment| (open.clone(), open.with_extra_avoided_segments([segment])));
        let variants: Vec<(SearchFilter, SearchFilter)> =
            closed_drive.chain(closed_walk).collect();

        let mut best: Option<Pick> = None;
        for (drive, walk) in &variants {
            match self.best_relaxed(graph, resolved, drive, walk, taken) {
                Ok(pick) => {
                    let better = best.as_ref().is_none_or(|current| {
                        self.compare(&pick.candidate, &current.candidate) == Ordering::Less
                    });
                    if better {
                        best = Some(pick);
                    }
                }
                Err(PlanError::NoFeasibleRoute(_)) => {}
                Err(other) => return Err(other),
            }
        }
        Ok(best.map(|pick| pick.route))
    }
}

/// Consecutive vertex pairs of `path`, in index space.
fn segments(graph: &Graph, path: &[VertexId]) -> Vec<(VertexIndex, VertexIndex)> {
    path.windows(2)
        .filter_map(|pair| match pair {
            [a, b] => Some((graph.index_of(*a)?, graph.index_of(*b)?)),
            _ => None,
        })
        .collect()
}
