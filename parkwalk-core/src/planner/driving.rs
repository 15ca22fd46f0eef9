//! Driving-only planning with an alternative route.

use crate::constraints::SearchFilter;
use crate::graph::Graph;
use crate::mode::TravelMode;

use super::{
    DrivenRoute, DrivingPlan, Leg, NoRouteReason, PlanError, Resolved, RoutePlanner, RouteRequest,
    leg, path,
};

impl RoutePlanner {
    /// Plan a route that drives all the way.
    ///
    /// The walking budget and `request.driving` are ignored. A request whose
    /// source equals its destination yields the one-vertex route. With a
    /// must-include vertex the route drives to it first and then on to the
    /// destination. An unconstrained request also gets the fastest
    /// alternative that avoids every intermediate vertex and every segment
    /// of the best route, when one exists.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidConstraint`] when the request names unknown
    ///   vertices.
    /// - [`PlanError::NoFeasibleRoute`] when the destination or the
    ///   must-include vertex cannot be reached by car.
    /// - [`PlanError::Search`] when search bookkeeping breaks.
    pub fn plan_driving(
        &self,
        graph: &mut Graph,
        request: &RouteRequest,
    ) -> Result<DrivingPlan, PlanError> {
        let resolved = Resolved::new(graph, request)?;
        graph.reset();
        let restricted = !request.constraints.is_unconstrained();
        let drive = |network: &mut Graph, from, to, filter: &SearchFilter| {
            leg(network, from, to, TravelMode::Drive, filter)
        };

        let best = match resolved.include {
            Some((via, _)) => {
                let first = drive(graph, resolved.source, via, &resolved.filter)?
                    .ok_or(NoRouteReason::MustIncludeMissed)?;
                let second = drive(graph, via, resolved.destination, &resolved.filter)?
                    .ok_or(NoRouteReason::MustIncludeMissed)?;
                first.then(second)
            }
            None => drive(graph, resolved.source, resolved.destination, &resolved.filter)?
                .ok_or(NoRouteReason::Unreachable)?,
        };

        let alternative = if restricted || best.path.len() < 2 {
            None
        } else {
            let intermediates = best
                .path
                .get(1..best.path.len() - 1)
                .unwrap_or_default()
                .iter()
                .copied();
            let segments = best.path.windows(2).filter_map(|pair| match pair {
                [a, b] => Some((*a, *b)),
                _ => None,
            });
            let detour = resolved
                .filter
                .with_extra_avoided_nodes(intermediates)
                .with_extra_avoided_segments(segments);
            drive(graph, resolved.source, resolved.destination, &detour)?
        };
        log::debug!(
            "driving plan from {} to {}: alternative {}",
            resolved.source_id,
            resolved.destination_id,
            if alternative.is_some() { "found" } else { "absent" }
        );

        Ok(DrivingPlan {
            best: driven(graph, best),
            alternative: alternative.map(|route| driven(graph, route)),
            restricted,
        })
    }
}

fn driven(graph: &Graph, leg: Leg) -> DrivenRoute {
    DrivenRoute {
        path: path::to_ids(graph, &leg.path),
        drive_time: leg.time,
    }
}
