//! CSV readers for location and distance tables.
//!
//! Locations use the header `Location,Id,Code,Parking`, where `Parking` is
//! `1` for locations that offer parking and `0` otherwise. Distances use
//! `Location1,Location2,Driving,Walking`; each row names two location codes
//! and the minutes needed to cover the link in each mode, with `X` marking a
//! mode that cannot use the link.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, StringRecord, Trim};
use parkwalk_core::{DistanceRecord, Graph, GraphError, LocationRecord};
use serde::Deserialize;
use thiserror::Error;

use crate::fs::open_utf8_file;

const LOCATION_COLUMNS: [&str; 4] = ["Location", "Id", "Code", "Parking"];
const DISTANCE_COLUMNS: [&str; 4] = ["Location1", "Location2", "Driving", "Walking"];

/// Marker for a mode that cannot use a link.
const UNAVAILABLE: &str = "X";

/// Errors raised while loading tabular network data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A data file could not be opened.
    #[error("failed to open {path}")]
    Open {
        /// Path of the file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The CSV reader failed, e.g. on a malformed row.
    #[error("failed to read CSV data")]
    Csv(#[from] csv::Error),
    /// The header lacks required columns.
    #[error("{table} header is missing columns: {}", missing.join(", "))]
    MissingColumns {
        /// Which table was being read.
        table: &'static str,
        /// Absent column names.
        missing: Vec<&'static str>,
    },
    /// A field holds a value of the wrong shape.
    #[error("invalid {field} value {value:?} on line {line}")]
    InvalidField {
        /// One-based line number in the file.
        line: u64,
        /// Column name.
        field: &'static str,
        /// The rejected text.
        value: String,
    },
    /// The records do not form a valid graph.
    #[error("invalid network data")]
    Graph(#[from] GraphError),
}

#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(rename = "Location")]
    name: String,
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Parking")]
    parking: String,
}

#[derive(Debug, Deserialize)]
struct DistanceRow {
    #[serde(rename = "Location1")]
    from_code: String,
    #[serde(rename = "Location2")]
    to_code: String,
    #[serde(rename = "Driving")]
    drive: String,
    #[serde(rename = "Walking")]
    walk: String,
}

fn reader<R: io::Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source)
}

fn check_header(
    table: &'static str,
    headers: &StringRecord,
    expected: &[&'static str],
) -> Result<(), LoadError> {
    let missing: Vec<&'static str> = expected
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns { table, missing })
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn invalid(line: u64, field: &'static str, value: &str) -> LoadError {
    LoadError::InvalidField {
        line,
        field,
        value: value.to_owned(),
    }
}

fn parse_parking(line: u64, value: &str) -> Result<bool, LoadError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(invalid(line, "Parking", other)),
    }
}

fn parse_minutes(line: u64, field: &'static str, value: &str) -> Result<Option<f64>, LoadError> {
    if value == UNAVAILABLE {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(minutes) if minutes.is_finite() && minutes >= 0.0 => Ok(Some(minutes)),
        _ => Err(invalid(line, field, value)),
    }
}

/// Read location records from CSV text.
///
/// # Errors
///
/// Returns [`LoadError`] for malformed CSV, a header without the expected
/// columns, or a non-numeric id or parking flag.
///
/// # Examples
/// ```
/// use parkwalk_data::read_locations;
///
/// let csv = "Location,Id,Code,Parking\nMarket,1,MK,1\n";
/// let locations = read_locations(csv.as_bytes())?;
/// assert_eq!(locations.len(), 1);
/// assert!(locations[0].parking);
/// # Ok::<(), parkwalk_data::LoadError>(())
/// ```
pub fn read_locations<R: io::Read>(source: R) -> Result<Vec<LocationRecord>, LoadError> {
    let mut csv = reader(source);
    let headers = csv.headers()?.clone();
    check_header("locations", &headers, &LOCATION_COLUMNS)?;

    let mut locations = Vec::new();
    for result in csv.records() {
        let record = result?;
        let line = line_of(&record);
        let row: LocationRow = record.deserialize(Some(&headers))?;
        let id = row
            .id
            .parse()
            .map_err(|_| invalid(line, "Id", &row.id))?;
        let parking = parse_parking(line, &row.parking)?;
        locations.push(LocationRecord {
            name: row.name,
            id,
            code: row.code,
            parking,
        });
    }
    log::debug!("read {} locations", locations.len());
    Ok(locations)
}

/// Read distance records from CSV text.
///
/// # Errors
///
/// Returns [`LoadError`] for malformed CSV, a header without the expected
/// columns, or a time that is neither `X` nor a non-negative number.
pub fn read_distances<R: io::Read>(source: R) -> Result<Vec<DistanceRecord>, LoadError> {
    let mut csv = reader(source);
    let headers = csv.headers()?.clone();
    check_header("distances", &headers, &DISTANCE_COLUMNS)?;

    let mut distances = Vec::new();
    for result in csv.records() {
        let record = result?;
        let line = line_of(&record);
        let row: DistanceRow = record.deserialize(Some(&headers))?;
        distances.push(DistanceRecord {
            drive: parse_minutes(line, "Driving", &row.drive)?,
            walk: parse_minutes(line, "Walking", &row.walk)?,
            from_code: row.from_code,
            to_code: row.to_code,
        });
    }
    log::debug!("read {} distances", distances.len());
    Ok(distances)
}

fn open(path: &Utf8Path) -> Result<cap_std::fs_utf8::File, LoadError> {
    open_utf8_file(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Read location records from a CSV file.
///
/// # Errors
///
/// See [`read_locations`]; also fails with [`LoadError::Open`].
pub fn read_locations_file(path: &Utf8Path) -> Result<Vec<LocationRecord>, LoadError> {
    read_locations(open(path)?)
}

/// Read distance records from a CSV file.
///
/// # Errors
///
/// See [`read_distances`]; also fails with [`LoadError::Open`].
pub fn read_distances_file(path: &Utf8Path) -> Result<Vec<DistanceRecord>, LoadError> {
    read_distances(open(path)?)
}

/// Load a [`Graph`] from a locations file and a distances file.
///
/// # Errors
///
/// Returns [`LoadError`] when either file cannot be read or the records
/// do not form a valid graph.
pub fn load_graph(locations: &Utf8Path, distances: &Utf8Path) -> Result<Graph, LoadError> {
    let location_records = read_locations_file(locations)?;
    let distance_records = read_distances_file(distances)?;
    let graph = Graph::build(&location_records, &distance_records)?;
    log::info!(
        "loaded {} locations and {} links from {locations} and {distances}",
        graph.vertex_count(),
        distance_records.len()
    );
    Ok(graph)
}
