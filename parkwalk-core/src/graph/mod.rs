//! Adjacency-list road network with per-vertex search state.
//!
//! [`Graph`] owns vertices, edges and one [`SearchState`] per vertex. The
//! state is reused by every search run against the graph; callers reset it
//! between passes with [`Graph::reset`] or [`Graph::reset_mode`].

mod build;
mod edge;
mod error;
mod vertex;

use std::collections::HashMap;

use crate::constraints::SearchFilter;
use crate::mode::{Direction, TravelMode};

pub use build::{DistanceRecord, LocationRecord};
pub use edge::{Edge, EdgeWeights};
pub use error::GraphError;
pub use vertex::{SearchState, Vertex, VertexId, VertexIndex};

/// A road and pedestrian network.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    states: Vec<SearchState>,
    by_id: HashMap<VertexId, VertexIndex>,
    by_code: HashMap<String, VertexIndex>,
}

/// Read-only view of vertices and edges, split from the search state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Topology<'g> {
    vertices: &'g [Vertex],
    edges: &'g [Edge],
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateId`] or [`GraphError::DuplicateCode`]
    /// when the vertex clashes with an existing one.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexIndex, GraphError> {
        if self.by_id.contains_key(&vertex.id()) {
            return Err(GraphError::DuplicateId { id: vertex.id() });
        }
        if self.by_code.contains_key(vertex.code()) {
            return Err(GraphError::DuplicateCode {
                code: vertex.code().to_owned(),
            });
        }
        let index = VertexIndex::new(self.vertices.len());
        self.by_id.insert(vertex.id(), index);
        self.by_code.insert(vertex.code().to_owned(), index);
        self.vertices.push(vertex);
        self.states.push(SearchState::default());
        Ok(index)
    }

    /// Add a directed edge between two existing vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownId`] for a missing endpoint and
    /// [`GraphError::InvalidWeight`] for a negative or NaN weight.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weights: EdgeWeights,
    ) -> Result<(), GraphError> {
        let tail = self.require(from)?;
        let head = self.require(to)?;
        validate_weights(from, to, weights)?;
        self.link(tail, head, weights);
        Ok(())
    }

    /// Add a pair of opposite edges sharing the same weights.
    ///
    /// # Errors
    ///
    /// Same as [`Graph::add_edge`].
    pub fn add_bidirectional_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        weights: EdgeWeights,
    ) -> Result<(), GraphError> {
        let first = self.require(a)?;
        let second = self.require(b)?;
        validate_weights(a, b, weights)?;
        self.link(first, second, weights);
        self.link(second, first, weights);
        Ok(())
    }

    fn require(&self, id: VertexId) -> Result<VertexIndex, GraphError> {
        self.index_of(id).ok_or(GraphError::UnknownId { id })
    }

    fn link(&mut self, from: VertexIndex, to: VertexIndex, weights: EdgeWeights) {
        let edge = self.edges.len();
        self.edges.push(Edge::new(from, to, weights));
        if let Some(tail) = self.vertices.get_mut(from.get()) {
            tail.outgoing.push(edge);
        }
        if let Some(head) = self.vertices.get_mut(to.get()) {
            head.incoming.push(edge);
        }
    }

    /// Index of the vertex with external id `id`.
    #[must_use]
    pub fn index_of(&self, id: VertexId) -> Option<VertexIndex> {
        self.by_id.get(&id).copied()
    }

    /// Index of the vertex with location code `code`.
    #[must_use]
    pub fn index_of_code(&self, code: &str) -> Option<VertexIndex> {
        self.by_code.get(code).copied()
    }

    /// Vertex at `index`.
    #[must_use]
    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index.get())
    }

    /// Vertex with external id `id`.
    #[must_use]
    pub fn find_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.index_of(id).and_then(|index| self.vertex(index))
    }

    /// External id of the vertex at `index`.
    #[must_use]
    pub fn id_of(&self, index: VertexIndex) -> Option<VertexId> {
        self.vertex(index).map(Vertex::id)
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexIndex, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (VertexIndex::new(index), vertex))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Search state of the vertex at `index`.
    #[must_use]
    pub fn state(&self, index: VertexIndex) -> Option<&SearchState> {
        self.states.get(index.get())
    }

    /// Smallest usable weight of an edge from `from` to `to` in `mode`.
    #[must_use]
    pub fn edge_weight(&self, from: VertexIndex, to: VertexIndex, mode: TravelMode) -> Option<f64> {
        self.vertex(from)?
            .outgoing
            .iter()
            .filter_map(|&edge| self.edges.get(edge))
            .filter(|edge| edge.to() == to)
            .filter_map(|edge| edge.weights().usable(mode))
            .min_by(f64::total_cmp)
    }

    /// Edges a search in `mode` may follow from `index`, with their weights.
    ///
    /// Applies `filter`: closed edges, avoided segments and avoided
    /// neighbours are skipped.
    pub fn usable_edges<'a>(
        &'a self,
        index: VertexIndex,
        mode: TravelMode,
        direction: Direction,
        filter: &'a SearchFilter,
    ) -> impl Iterator<Item = (VertexIndex, f64)> + 'a {
        self.topology().usable_edges(index, mode, direction, filter)
    }

    /// Clear every vertex's search state.
    pub fn reset(&mut self) {
        self.states.iter_mut().for_each(SearchState::reset);
    }

    /// Clear `mode`'s results and the traversal flags, keeping the other
    /// mode's distances and predecessors.
    pub fn reset_mode(&mut self, mode: TravelMode) {
        for state in &mut self.states {
            state.reset_mode(mode);
        }
    }

    const fn topology(&self) -> Topology<'_> {
        Topology {
            vertices: self.vertices.as_slice(),
            edges: self.edges.as_slice(),
        }
    }

    /// Borrow the topology and the search state separately so a search can
    /// walk edges while updating distances.
    pub(crate) fn search_parts(&mut self) -> (Topology<'_>, &mut [SearchState]) {
        (
            Topology {
                vertices: self.vertices.as_slice(),
                edges: self.edges.as_slice(),
            },
            self.states.as_mut_slice(),
        )
    }
}

impl<'g> Topology<'g> {
    pub(crate) fn usable_edges(
        self,
        index: VertexIndex,
        mode: TravelMode,
        direction: Direction,
        filter: &'g SearchFilter,
    ) -> impl Iterator<Item = (VertexIndex, f64)> + 'g {
        let adjacency: &'g [usize] = match (self.vertices.get(index.get()), direction) {
            (Some(vertex), Direction::Forward) => &vertex.outgoing,
            (Some(vertex), Direction::Reverse) => &vertex.incoming,
            (None, _) => &[],
        };
        let edges = self.edges;
        adjacency
            .iter()
            .filter_map(move |&edge| edges.get(edge))
            .filter_map(move |edge| {
                let weight = edge.weights().usable(mode)?;
                let neighbour = match direction {
                    Direction::Forward => edge.to(),
                    Direction::Reverse => edge.from(),
                };
                if filter.blocks_segment(edge.from(), edge.to()) || filter.blocks_vertex(neighbour)
                {
                    return None;
                }
                Some((neighbour, weight))
            })
    }

    pub(crate) const fn vertex_count(self) -> usize {
        self.vertices.len()
    }
}

fn validate_weights(from: VertexId, to: VertexId, weights: EdgeWeights) -> Result<(), GraphError> {
    for mode in [TravelMode::Drive, TravelMode::Walk] {
        if let Some(weight) = weights.get(mode) {
            if weight.is_nan() || weight < 0.0 {
                return Err(GraphError::InvalidWeight {
                    from,
                    to,
                    mode,
                    weight,
                });
            }
        }
    }
    Ok(())
}
