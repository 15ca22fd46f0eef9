//! Data access for the parkwalk engine.
//!
//! Responsibilities:
//! - Read location and distance tables from CSV and build a
//!   [`parkwalk_core::Graph`].
//! - Parse line-oriented route request files into
//!   [`parkwalk_core::RouteRequest`] values.
//!
//! Boundaries:
//! - Do not encode routing rules (those live in `parkwalk-core`).
//! - File access goes through `cap-std` with UTF-8 `camino` paths.

#![forbid(unsafe_code)]

pub mod fs;
mod records;
mod request;

pub use records::{
    LoadError, load_graph, read_distances, read_distances_file, read_locations,
    read_locations_file,
};
pub use request::{
    ParsedRequest, RequestMode, RequestParseError, parse_route_request, read_route_request,
};
