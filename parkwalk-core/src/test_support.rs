//! Small graph fixtures shared by unit tests, behaviour tests, benchmarks
//! and doc examples.

use crate::graph::{EdgeWeights, Graph, GraphError, Vertex, VertexId};

/// Fluent builder for hand-written test graphs.
///
/// Locations get the code `L{id}` and the name `Location {id}`. Errors are
/// deferred to [`GraphBuilder::build`].
///
/// # Examples
/// ```
/// use parkwalk_core::test_support::GraphBuilder;
///
/// let graph = GraphBuilder::new()
///     .location(1, false)
///     .location(2, true)
///     .road(1, 2, Some(3.0), None)
///     .build()?;
/// assert_eq!(graph.edge_count(), 2);
/// # Ok::<(), parkwalk_core::GraphError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    locations: Vec<(VertexId, bool)>,
    links: Vec<Link>,
}

#[derive(Debug, Clone, Copy)]
struct Link {
    from: VertexId,
    to: VertexId,
    weights: EdgeWeights,
    both_ways: bool,
}

impl GraphBuilder {
    /// Start an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location.
    #[must_use]
    pub fn location(mut self, id: VertexId, parking: bool) -> Self {
        self.locations.push((id, parking));
        self
    }

    /// Add a two-way connection. `None` closes it to that mode.
    #[must_use]
    pub fn road(self, a: VertexId, b: VertexId, drive: Option<f64>, walk: Option<f64>) -> Self {
        self.link(a, b, drive, walk, true)
    }

    /// Add a connection usable only from `from` to `to`.
    #[must_use]
    pub fn one_way(
        self,
        from: VertexId,
        to: VertexId,
        drive: Option<f64>,
        walk: Option<f64>,
    ) -> Self {
        self.link(from, to, drive, walk, false)
    }

    fn link(
        mut self,
        from: VertexId,
        to: VertexId,
        drive: Option<f64>,
        walk: Option<f64>,
        both_ways: bool,
    ) -> Self {
        self.links.push(Link {
            from,
            to,
            weights: EdgeWeights { drive, walk },
            both_ways,
        });
        self
    }

    /// Assemble the graph.
    ///
    /// # Errors
    ///
    /// Propagates any [`GraphError`] raised while adding vertices or edges.
    pub fn build(self) -> Result<Graph, GraphError> {
        let mut graph = Graph::new();
        for (id, parking) in self.locations {
            graph.add_vertex(Vertex::new(
                id,
                format!("Location {id}"),
                format!("L{id}"),
                parking,
            ))?;
        }
        for link in self.links {
            if link.both_ways {
                graph.add_bidirectional_edge(link.from, link.to, link.weights)?;
            } else {
                graph.add_edge(link.from, link.to, link.weights)?;
            }
        }
        Ok(graph)
    }
}

/// The line `1 - 2 - 3 - 4` used throughout the planner tests.
///
/// Every link can be driven in one minute. Only `3 - 4` can be walked, also
/// in one minute, and only vertex 3 offers parking.
///
/// # Errors
///
/// Never fails in practice; the signature mirrors [`GraphBuilder::build`].
pub fn scenario_graph() -> Result<Graph, GraphError> {
    GraphBuilder::new()
        .location(1, false)
        .location(2, false)
        .location(3, true)
        .location(4, false)
        .road(1, 2, Some(1.0), None)
        .road(2, 3, Some(1.0), None)
        .road(3, 4, Some(1.0), Some(1.0))
        .build()
}
