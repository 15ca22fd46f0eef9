//! Behavioural tests for drive, park and walk route planning.

use std::cell::RefCell;

use parkwalk_core::test_support::{GraphBuilder, scenario_graph};
use parkwalk_core::{
    ConstraintSet, Graph, NoRouteReason, PlanError, RouteRequest, RouteResult, plan_route,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Network under test.
#[fixture]
fn graph() -> RefCell<Option<Graph>> {
    RefCell::new(None)
}

/// Request under test.
#[fixture]
fn request() -> RefCell<Option<RouteRequest>> {
    RefCell::new(None)
}

/// Planner outcome captured for assertions.
#[fixture]
fn outcome() -> RefCell<Option<Result<RouteResult, PlanError>>> {
    RefCell::new(None)
}

fn budget_request(minutes: f64) -> RouteRequest {
    match ConstraintSet::new().with_max_walk_time(minutes) {
        Ok(constraints) => RouteRequest::new(1, 4).with_constraints(constraints),
        Err(err) => panic!("walking budget should be valid: {err}"),
    }
}

#[given("the line network with parking at location 3")]
fn line_network(graph: &RefCell<Option<Graph>>) {
    match scenario_graph() {
        Ok(network) => *graph.borrow_mut() = Some(network),
        Err(err) => panic!("scenario graph should build: {err}"),
    }
}

#[given("the line network with a drive-only spur from 4 to 5")]
fn line_network_with_spur(graph: &RefCell<Option<Graph>>) {
    let built = GraphBuilder::new()
        .location(1, false)
        .location(2, false)
        .location(3, true)
        .location(4, false)
        .location(5, false)
        .road(1, 2, Some(1.0), None)
        .road(2, 3, Some(1.0), None)
        .road(3, 4, Some(1.0), Some(1.0))
        .road(4, 5, Some(1.0), None)
        .build();
    match built {
        Ok(network) => *graph.borrow_mut() = Some(network),
        Err(err) => panic!("spur graph should build: {err}"),
    }
}

#[given("a request from 1 to 4 with a walking budget of 5 minutes")]
fn generous_budget(request: &RefCell<Option<RouteRequest>>) {
    *request.borrow_mut() = Some(budget_request(5.0));
}

#[given("a request from 1 to 4 with a walking budget of 0 minutes")]
fn zero_budget(request: &RefCell<Option<RouteRequest>>) {
    *request.borrow_mut() = Some(budget_request(0.0));
}

#[given("a request from 1 to 4 avoiding location 2")]
fn avoiding_two(request: &RefCell<Option<RouteRequest>>) {
    *request.borrow_mut() =
        Some(RouteRequest::new(1, 4).with_constraints(ConstraintSet::new().avoiding_nodes([2])));
}

#[given("a request from 1 to 4 that must include location 5")]
fn including_five(request: &RefCell<Option<RouteRequest>>) {
    *request.borrow_mut() =
        Some(RouteRequest::new(1, 4).with_constraints(ConstraintSet::new().with_must_include(5)));
}

#[when("I plan the route")]
fn plan(
    graph: &RefCell<Option<Graph>>,
    request: &RefCell<Option<RouteRequest>>,
    outcome: &RefCell<Option<Result<RouteResult, PlanError>>>,
) {
    let mut guard = graph.borrow_mut();
    let Some(network) = guard.as_mut() else {
        panic!("graph must be initialised");
    };
    let binding = request.borrow();
    let Some(query) = binding.as_ref() else {
        panic!("request must be initialised");
    };
    *outcome.borrow_mut() = Some(plan_route(network, query));
}

fn planned_route(outcome: &RefCell<Option<Result<RouteResult, PlanError>>>) -> RouteResult {
    match outcome.borrow().as_ref() {
        Some(Ok(route)) => route.clone(),
        Some(Err(err)) => panic!("planning should succeed, got {err}"),
        None => panic!("route must be planned"),
    }
}

fn failure(outcome: &RefCell<Option<Result<RouteResult, PlanError>>>) -> PlanError {
    match outcome.borrow().as_ref() {
        Some(Err(err)) => err.clone(),
        Some(Ok(route)) => panic!("planning should fail, got {route:?}"),
        None => panic!("route must be planned"),
    }
}

#[then("the route drives through 1, 2 and 3 and walks from 3 to 4")]
fn drives_then_walks(outcome: &RefCell<Option<Result<RouteResult, PlanError>>>) {
    let route = planned_route(outcome);
    assert_eq!(route.driving_leg, vec![1, 2, 3]);
    assert_eq!(route.walking_leg, vec![3, 4]);
    assert_eq!(route.parking, Some(3));
}

#[then("the route takes 2 minutes driving and 1 minute walking")]
fn route_times(outcome: &RefCell<Option<Result<RouteResult, PlanError>>>) {
    let route = planned_route(outcome);
    assert_eq!(route.drive_time, 2.0);
    assert_eq!(route.walk_time, 1.0);
}

#[then("no feasible route is found")]
fn no_route(outcome: &RefCell<Option<Result<RouteResult, PlanError>>>) {
    assert!(matches!(failure(outcome), PlanError::NoFeasibleRoute(_)));
}

#[then("no feasible route is found because the walking budget is exceeded")]
fn budget_exceeded(outcome: &RefCell<Option<Result<RouteResult, PlanError>>>) {
    assert_eq!(
        failure(outcome),
        PlanError::NoFeasibleRoute(NoRouteReason::WalkBudgetExceeded)
    );
}

#[then("no feasible route is found because the required location is missed")]
fn include_missed(outcome: &RefCell<Option<Result<RouteResult, PlanError>>>) {
    assert_eq!(
        failure(outcome),
        PlanError::NoFeasibleRoute(NoRouteReason::MustIncludeMissed)
    );
}

#[scenario(path = "tests/features/route_planning.feature", index = 0)]
fn drive_park_walk(
    graph: RefCell<Option<Graph>>,
    request: RefCell<Option<RouteRequest>>,
    outcome: RefCell<Option<Result<RouteResult, PlanError>>>,
) {
    let _ = (graph, request, outcome);
}

#[scenario(path = "tests/features/route_planning.feature", index = 1)]
fn zero_walking_budget(
    graph: RefCell<Option<Graph>>,
    request: RefCell<Option<RouteRequest>>,
    outcome: RefCell<Option<Result<RouteResult, PlanError>>>,
) {
    let _ = (graph, request, outcome);
}

#[scenario(path = "tests/features/route_planning.feature", index = 2)]
fn avoided_bridge(
    graph: RefCell<Option<Graph>>,
    request: RefCell<Option<RouteRequest>>,
    outcome: RefCell<Option<Result<RouteResult, PlanError>>>,
) {
    let _ = (graph, request, outcome);
}

#[scenario(path = "tests/features/route_planning.feature", index = 3)]
fn unreachable_required_location(
    graph: RefCell<Option<Graph>>,
    request: RefCell<Option<RouteRequest>>,
    outcome: RefCell<Option<Result<RouteResult, PlanError>>>,
) {
    let _ = (graph, request, outcome);
}
