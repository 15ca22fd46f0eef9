//! Single-source shortest paths over one travel mode.
//!
//! [`shortest_paths`] runs Dijkstra's algorithm with an [`IndexedMinHeap`]
//! and leaves its results in the graph's [`SearchState`]s: the tentative
//! distance and predecessor for the searched mode of every reached vertex.

use thiserror::Error;

use crate::constraints::SearchFilter;
use crate::graph::{Graph, SearchState, VertexIndex};
use crate::mode::{Direction, TravelMode};
use crate::queue::{IndexedMinHeap, KeyedSlots, QueueError};

/// Errors raised by [`shortest_paths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Priority queue bookkeeping failed.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// The start index does not belong to the graph.
    #[error("search start {index} is not a vertex of the graph")]
    UnknownStart {
        /// The rejected start.
        index: VertexIndex,
    },
}

/// What to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Edge weights to use.
    pub mode: TravelMode,
    /// Follow edges forwards or backwards.
    pub direction: Direction,
    /// Stop once this vertex is settled.
    pub target: Option<VertexIndex>,
}

impl SearchParams {
    /// Search outwards from the start over the whole graph.
    #[must_use]
    pub const fn forward(mode: TravelMode) -> Self {
        Self {
            mode,
            direction: Direction::Forward,
            target: None,
        }
    }

    /// Search against edge direction, yielding distances *to* the start.
    #[must_use]
    pub const fn reverse(mode: TravelMode) -> Self {
        Self {
            mode,
            direction: Direction::Reverse,
            target: None,
        }
    }

    /// Stop early once `target` is settled.
    #[must_use]
    pub const fn until(mut self, target: VertexIndex) -> Self {
        self.target = Some(target);
        self
    }
}

/// Counters describing one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Vertices extracted and finalized.
    pub settled: usize,
    /// Successful edge relaxations.
    pub relaxed: usize,
}

struct ModeKeys<'s> {
    states: &'s mut [SearchState],
    mode: TravelMode,
}

impl KeyedSlots for ModeKeys<'_> {
    type Key = f64;

    fn key(&self, item: usize) -> f64 {
        self.states
            .get(item)
            .map_or(f64::INFINITY, |state| state.distance(self.mode))
    }

    fn slot(&self, item: usize) -> Option<usize> {
        self.states.get(item).and_then(SearchState::queue_index)
    }

    fn set_slot(&mut self, item: usize, slot: Option<usize>) {
        if let Some(state) = self.states.get_mut(item) {
            state.set_queue_index(slot);
        }
    }
}

/// Run Dijkstra's algorithm from `start`.
///
/// The searched mode's previous results and all traversal flags are cleared
/// first; the other mode's results are left untouched. Weights must be
/// non-negative, which [`Graph`] enforces on insertion.
///
/// # Errors
///
/// Returns [`SearchError::UnknownStart`] for a foreign index and
/// [`SearchError::Queue`] if heap bookkeeping breaks.
///
/// # Examples
/// ```
/// use parkwalk_core::{
///     EdgeWeights, Graph, SearchFilter, SearchParams, TravelMode, Vertex, shortest_paths,
/// };
///
/// let mut graph = Graph::new();
/// let a = graph.add_vertex(Vertex::new(1, "A", "A", false))?;
/// let b = graph.add_vertex(Vertex::new(2, "B", "B", false))?;
/// graph.add_edge(1, 2, EdgeWeights::drive_only(3.0))?;
///
/// shortest_paths(&mut graph, a, SearchParams::forward(TravelMode::Drive), &SearchFilter::none())?;
/// let reached = graph.state(b).map(|state| state.distance(TravelMode::Drive));
/// assert_eq!(reached, Some(3.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "path lengths are sums of edge weights"
)]
pub fn shortest_paths(
    graph: &mut Graph,
    start: VertexIndex,
    params: SearchParams,
    filter: &SearchFilter,
) -> Result<SearchStats, SearchError> {
    let SearchParams {
        mode,
        direction,
        target,
    } = params;
    graph.reset_mode(mode);
    let (topology, states) = graph.search_parts();
    let mut keys = ModeKeys { states, mode };
    let Some(origin) = keys.states.get_mut(start.get()) else {
        return Err(SearchError::UnknownStart { index: start });
    };
    origin.start(mode);

    let mut heap = IndexedMinHeap::with_capacity(topology.vertex_count());
    let mut stats = SearchStats::default();
    heap.insert(&mut keys, start.get());

    while !heap.is_empty() {
        let item = heap.extract_min(&mut keys)?;
        let current = VertexIndex::new(item);
        let Some(state) = keys.states.get_mut(item) else {
            continue;
        };
        if state.is_visited() {
            continue;
        }
        state.mark_visited();
        stats.settled += 1;
        if target == Some(current) {
            break;
        }
        let base = state.distance(mode);

        for (neighbour, weight) in topology.usable_edges(current, mode, direction, filter) {
            let Some(next) = keys.states.get_mut(neighbour.get()) else {
                continue;
            };
            let candidate = base + weight;
            if next.is_visited() || candidate >= next.distance(mode) {
                continue;
            }
            next.improve(mode, candidate, Some(current));
            stats.relaxed += 1;
            if heap.contains(&keys, neighbour.get()) {
                heap.decrease_key(&mut keys, neighbour.get())?;
            } else {
                heap.insert(&mut keys, neighbour.get());
            }
        }
    }

    log::debug!(
        "{mode} search from {start} ({direction:?}): settled {} vertices, relaxed {} edges",
        stats.settled,
        stats.relaxed
    );
    Ok(stats)
}
