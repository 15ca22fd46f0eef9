//! Facade crate for the parkwalk route planner.
//!
//! This crate re-exports the core planning types and, behind the `data`
//! feature, the CSV and request-file loaders.

#![forbid(unsafe_code)]

pub use parkwalk_core::{
    ConstraintError, ConstraintSet, DrivenRoute, DrivingPlan, Graph, GraphError, IncludePolicy,
    NoRouteReason, ParkingTieBreak, PlanError, PlannerConfig, RoutePlanner, RouteRequest,
    RouteResult, TravelMode, VertexId, WalkBudget, plan_driving, plan_route,
};

#[cfg(feature = "data")]
pub use parkwalk_data::{
    LoadError, ParsedRequest, RequestMode, RequestParseError, load_graph, parse_route_request,
    read_route_request,
};
