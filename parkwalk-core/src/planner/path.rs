//! Path reconstruction from predecessor links.

use crate::graph::{Graph, VertexId, VertexIndex};
use crate::mode::TravelMode;

use super::NoRouteReason;

/// Follow `mode` predecessors from `from` until `root`.
///
/// The returned path starts at `from` and ends at `root`. For a reverse
/// search rooted at the destination this is already travel order.
pub(super) fn trace(
    graph: &Graph,
    from: VertexIndex,
    root: VertexIndex,
    mode: TravelMode,
) -> Result<Vec<VertexIndex>, NoRouteReason> {
    let mut path = vec![from];
    let mut current = from;
    while current != root {
        // A chain longer than the graph has looped.
        if path.len() > graph.vertex_count() {
            return Err(NoRouteReason::BrokenPredecessorChain);
        }
        current = graph
            .state(current)
            .and_then(|state| state.predecessor(mode))
            .ok_or(NoRouteReason::BrokenPredecessorChain)?;
        path.push(current);
    }
    Ok(path)
}

/// Path from `start` to `end` left by a forward search in `mode`.
///
/// # Errors
///
/// Returns [`NoRouteReason::Unreachable`] when the search did not reach
/// `end`, and [`NoRouteReason::BrokenPredecessorChain`] when the
/// predecessor links do not lead back to `start`.
pub fn reconstruct_path(
    graph: &Graph,
    start: VertexIndex,
    end: VertexIndex,
    mode: TravelMode,
) -> Result<Vec<VertexIndex>, NoRouteReason> {
    if !graph.state(end).is_some_and(|state| state.is_reached(mode)) {
        return Err(NoRouteReason::Unreachable);
    }
    let mut path = trace(graph, end, start, mode)?;
    path.reverse();
    Ok(path)
}

pub(super) fn to_ids(graph: &Graph, path: &[VertexIndex]) -> Vec<VertexId> {
    path.iter().filter_map(|&index| graph.id_of(index)).collect()
}
