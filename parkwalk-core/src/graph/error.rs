use thiserror::Error;

use crate::mode::TravelMode;

use super::VertexId;

/// Errors raised while assembling a [`Graph`](super::Graph).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Two locations share an identifier.
    #[error("duplicate location id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: VertexId,
    },
    /// Two locations share a code.
    #[error("duplicate location code {code:?}")]
    DuplicateCode {
        /// The repeated code.
        code: String,
    },
    /// An edge references an identifier that is not in the graph.
    #[error("unknown location id {id}")]
    UnknownId {
        /// The missing identifier.
        id: VertexId,
    },
    /// A distance record references a code that is not in the graph.
    #[error("unknown location code {code:?}")]
    UnknownCode {
        /// The missing code.
        code: String,
    },
    /// An edge weight is negative or not a number.
    #[error("invalid {mode} time {weight} on edge {from} -> {to}")]
    InvalidWeight {
        /// Tail of the edge.
        from: VertexId,
        /// Head of the edge.
        to: VertexId,
        /// Mode of the rejected weight.
        mode: TravelMode,
        /// The rejected weight.
        weight: f64,
    },
}
