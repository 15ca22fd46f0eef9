//! Core engine for multimodal drive, park and walk route planning.
//!
//! The crate is free of I/O. It models a road and pedestrian network as a
//! [`Graph`] whose edges carry separate driving and walking times, runs
//! Dijkstra searches over either mode, and combines a driving leg, a parking
//! vertex and a walking leg into the fastest route that respects a request's
//! [`ConstraintSet`].
//!
//! # Examples
//!
//! ```
//! use parkwalk_core::{ConstraintSet, RouteRequest, plan_route, test_support::scenario_graph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = scenario_graph()?;
//! let request = RouteRequest::new(1, 4)
//!     .with_constraints(ConstraintSet::new().with_max_walk_time(5.0)?);
//! let route = plan_route(&mut graph, &request)?;
//! assert_eq!(route.parking, Some(3));
//! assert_eq!(route.total_time(), 3.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod constraints;
pub mod graph;
pub mod mode;
pub mod planner;
pub mod queue;
pub mod search;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use constraints::{ConstraintError, ConstraintSet, SearchFilter, Segment, WalkBudget};
pub use graph::{
    DistanceRecord, Edge, EdgeWeights, Graph, GraphError, LocationRecord, SearchState, Vertex,
    VertexId, VertexIndex,
};
pub use mode::{Direction, TravelMode};
pub use planner::{
    DrivenRoute, DrivingPlan, IncludePolicy, NoRouteReason, ParkingTieBreak, PlanError,
    PlannerConfig, RoutePlanner, RouteRequest, RouteResult, plan_driving, plan_route,
    reconstruct_path,
};
pub use queue::{IndexedMinHeap, KeyedSlots, QueueError};
pub use search::{SearchError, SearchParams, SearchStats, shortest_paths};
