//! Proptest strategies and reference algorithms for property tests.
//!
//! Weights are small whole numbers so path sums are exact in `f64`.

use parkwalk_core::test_support::GraphBuilder;
use parkwalk_core::{Graph, GraphError, TravelMode, VertexId};
use proptest::prelude::*;

/// A randomly generated road between two locations.
#[derive(Debug, Clone, Copy)]
pub struct RoadSpec {
    pub a: VertexId,
    pub b: VertexId,
    pub drive: Option<f64>,
    pub walk: Option<f64>,
}

/// A randomly generated network of up to eight locations.
#[derive(Debug, Clone)]
pub struct NetworkSpec {
    pub parking: Vec<bool>,
    pub roads: Vec<RoadSpec>,
}

impl NetworkSpec {
    /// Location ids, `1..=n`.
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (1..).zip(self.parking.iter()).map(|(id, _)| id)
    }

    /// Build the network as a [`Graph`].
    pub fn build(&self) -> Result<Graph, GraphError> {
        let with_locations = self
            .ids()
            .zip(self.parking.iter())
            .fold(GraphBuilder::new(), |builder, (id, &parking)| {
                builder.location(id, parking)
            });
        self.roads
            .iter()
            .fold(with_locations, |builder, road| {
                builder.road(road.a, road.b, road.drive, road.walk)
            })
            .build()
    }

    /// Reference distances from `start` by Bellman-Ford relaxation over the
    /// raw road list, skipping `blocked` vertices and closed roads.
    #[expect(clippy::float_arithmetic, reason = "reference path sums")]
    pub fn reference_distances(
        &self,
        start: VertexId,
        mode: TravelMode,
        blocked: &[VertexId],
    ) -> Vec<f64> {
        let count = self.parking.len();
        let slot = |id: VertexId| usize::try_from(id).ok().and_then(|id| id.checked_sub(1));
        let mut dist = vec![f64::INFINITY; count];
        if let Some(entry) = slot(start).and_then(|index| dist.get_mut(index)) {
            *entry = 0.0;
        }
        for _ in 0..count {
            for road in &self.roads {
                let weight = match mode {
                    TravelMode::Drive => road.drive,
                    TravelMode::Walk => road.walk,
                };
                let Some(weight) = weight.filter(|&w| w > 0.0) else {
                    continue;
                };
                for (from, to) in [(road.a, road.b), (road.b, road.a)] {
                    if blocked.contains(&to) {
                        continue;
                    }
                    let (Some(from_slot), Some(to_slot)) = (slot(from), slot(to)) else {
                        continue;
                    };
                    let base = dist.get(from_slot).copied().unwrap_or(f64::INFINITY);
                    if let Some(current) = dist.get_mut(to_slot) {
                        if base + weight < *current {
                            *current = base + weight;
                        }
                    }
                }
            }
        }
        dist
    }
}

fn weight() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        4 => (1_u8..=9).prop_map(|w| Some(f64::from(w))),
    ]
}

/// Strategy for networks of two to eight locations.
pub fn network() -> impl Strategy<Value = NetworkSpec> {
    (2_u64..=8).prop_flat_map(|size| {
        let count = usize::try_from(size).unwrap_or(2);
        let road = (1..=size, 1..=size, weight(), weight())
            .prop_filter("roads join distinct locations", |(a, b, _, _)| a != b)
            .prop_map(|(a, b, drive, walk)| RoadSpec { a, b, drive, walk });
        (
            proptest::collection::vec(any::<bool>(), count),
            proptest::collection::vec(road, 0..=count * 2),
        )
            .prop_map(|(parking, roads)| NetworkSpec { parking, roads })
    })
}
