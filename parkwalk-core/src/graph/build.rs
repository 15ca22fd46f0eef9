//! Assemble a [`Graph`] from location and distance records.

use super::{EdgeWeights, Graph, GraphError, Vertex, VertexId};

/// One row of a locations table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationRecord {
    /// Display name.
    pub name: String,
    /// External identifier.
    pub id: VertexId,
    /// Short code referenced by distance records.
    pub code: String,
    /// Whether the location offers parking.
    pub parking: bool,
}

/// One row of a distances table, describing a two-way connection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceRecord {
    /// Code of the first endpoint.
    pub from_code: String,
    /// Code of the second endpoint.
    pub to_code: String,
    /// Driving minutes, or `None` when cars cannot pass.
    pub drive: Option<f64>,
    /// Walking minutes, or `None` when pedestrians cannot pass.
    pub walk: Option<f64>,
}

impl Graph {
    /// Build a graph from tabular records.
    ///
    /// Every distance record yields a pair of opposite edges.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] for duplicate locations, distance records
    /// naming unknown codes, or invalid weights.
    ///
    /// # Examples
    /// ```
    /// use parkwalk_core::{DistanceRecord, Graph, LocationRecord};
    ///
    /// let locations = vec![
    ///     LocationRecord { name: "Depot".into(), id: 1, code: "DP".into(), parking: false },
    ///     LocationRecord { name: "Plaza".into(), id: 2, code: "PZ".into(), parking: true },
    /// ];
    /// let distances = vec![DistanceRecord {
    ///     from_code: "DP".into(),
    ///     to_code: "PZ".into(),
    ///     drive: Some(4.0),
    ///     walk: None,
    /// }];
    /// let graph = Graph::build(&locations, &distances)?;
    /// assert_eq!(graph.edge_count(), 2);
    /// # Ok::<(), parkwalk_core::GraphError>(())
    /// ```
    pub fn build(
        locations: &[LocationRecord],
        distances: &[DistanceRecord],
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for location in locations {
            graph.add_vertex(Vertex::new(
                location.id,
                location.name.clone(),
                location.code.clone(),
                location.parking,
            ))?;
        }
        for distance in distances {
            let from = graph.id_for_code(&distance.from_code)?;
            let to = graph.id_for_code(&distance.to_code)?;
            graph.add_bidirectional_edge(
                from,
                to,
                EdgeWeights {
                    drive: distance.drive,
                    walk: distance.walk,
                },
            )?;
        }
        log::debug!(
            "built graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn id_for_code(&self, code: &str) -> Result<VertexId, GraphError> {
        self.index_of_code(code)
            .and_then(|index| self.id_of(index))
            .ok_or_else(|| GraphError::UnknownCode {
                code: code.to_owned(),
            })
    }
}
