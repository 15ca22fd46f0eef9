//! Parser for line-oriented route request files.
//!
//! Each non-blank line is `Key:Value`. Recognised keys are `Mode`, `Source`,
//! `Destination`, `MaxWalkTime`, `AvoidNodes`, `AvoidSegments` and
//! `IncludeNode`. An empty value means "none"; `IncludeNode:-1` also means
//! no must-include location.
//!
//! ```text
//! Mode:driving-walking
//! Source:8
//! Destination:5
//! MaxWalkTime:18
//! AvoidNodes:2,4
//! AvoidSegments:(3,6),(1,2)
//! IncludeNode:
//! ```

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use parkwalk_core::{ConstraintError, ConstraintSet, RouteRequest, VertexId};
use thiserror::Error;

use crate::fs::read_to_string;

/// What kind of route a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Drive the whole way; reports a best and an alternative route.
    Driving,
    /// Drive to a parking location, then walk.
    DrivingWalking,
    /// Walk the whole way.
    Walking,
}

impl RequestMode {
    /// The token used in request files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::DrivingWalking => "driving-walking",
            Self::Walking => "walking",
        }
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestMode {
    type Err = RequestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(Self::Driving),
            "driving-walking" => Ok(Self::DrivingWalking),
            "walking" => Ok(Self::Walking),
            other => Err(RequestParseError::InvalidMode {
                value: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while parsing a route request.
#[derive(Debug, Error)]
pub enum RequestParseError {
    /// The request file could not be read.
    #[error("failed to read request file {path}")]
    Read {
        /// Path of the request file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A line has no `Key:` prefix.
    #[error("line {line} is not of the form Key:Value: {text:?}")]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// The mode is not one of the supported tokens.
    #[error("unsupported mode {value:?}; expected driving, driving-walking or walking")]
    InvalidMode {
        /// The rejected mode.
        value: String,
    },
    /// A value could not be parsed for its key.
    #[error("invalid {key} value {value:?} on line {line}")]
    InvalidValue {
        /// One-based line number.
        line: usize,
        /// The key whose value was rejected.
        key: &'static str,
        /// The rejected text.
        value: String,
    },
    /// The segment list is not a comma-separated list of `(a,b)` pairs.
    #[error("malformed AvoidSegments value {value:?} on line {line}")]
    MalformedSegments {
        /// One-based line number.
        line: usize,
        /// The rejected text.
        value: String,
    },
    /// A mandatory key is absent.
    #[error("request is missing the {key} line")]
    Missing {
        /// The absent key.
        key: &'static str,
    },
    /// A key appears twice.
    #[error("{key} is given more than once (line {line})")]
    Duplicate {
        /// The repeated key.
        key: &'static str,
        /// Line of the second occurrence.
        line: usize,
    },
    /// The constraints are invalid, e.g. a negative walking budget.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

/// A fully parsed route request.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// Requested travel style.
    pub mode: RequestMode,
    /// Starting location id.
    pub source: VertexId,
    /// Destination location id.
    pub destination: VertexId,
    /// Avoid lists, walking budget and must-include location.
    pub constraints: ConstraintSet,
}

impl ParsedRequest {
    /// Convert into a planner request.
    ///
    /// `Walking` requests forbid driving; the other modes allow it.
    #[must_use]
    pub fn into_route_request(self) -> RouteRequest {
        let request = match self.mode {
            RequestMode::Walking => RouteRequest::walking(self.source, self.destination),
            RequestMode::Driving | RequestMode::DrivingWalking => {
                RouteRequest::new(self.source, self.destination)
            }
        };
        request.with_constraints(self.constraints)
    }
}

#[derive(Debug, Default)]
struct Fields {
    mode: Option<RequestMode>,
    source: Option<VertexId>,
    destination: Option<VertexId>,
    max_walk_time: Option<Option<f64>>,
    avoid_nodes: Option<Vec<VertexId>>,
    avoid_segments: Option<Vec<(VertexId, VertexId)>>,
    include: Option<Option<VertexId>>,
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    key: &'static str,
    line: usize,
) -> Result<(), RequestParseError> {
    if slot.is_some() {
        return Err(RequestParseError::Duplicate { key, line });
    }
    *slot = Some(value);
    Ok(())
}

fn parse_id(line: usize, key: &'static str, value: &str) -> Result<VertexId, RequestParseError> {
    value.parse().map_err(|_| RequestParseError::InvalidValue {
        line,
        key,
        value: value.to_owned(),
    })
}

fn parse_minutes(line: usize, value: &str) -> Result<Option<f64>, RequestParseError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| RequestParseError::InvalidValue {
            line,
            key: "MaxWalkTime",
            value: value.to_owned(),
        })
}

fn parse_nodes(line: usize, value: &str) -> Result<Vec<VertexId>, RequestParseError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(',')
        .map(|item| parse_id(line, "AvoidNodes", item.trim()))
        .collect()
}

fn parse_pair(text: &str) -> Option<(VertexId, VertexId)> {
    let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (a, b) = inner.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

/// Split `(a,b),(c,d)` into pairs.
fn parse_segments(
    line: usize,
    value: &str,
) -> Result<Vec<(VertexId, VertexId)>, RequestParseError> {
    let malformed = || RequestParseError::MalformedSegments {
        line,
        value: value.to_owned(),
    };
    let mut segments = Vec::new();
    let mut rest = value.trim();
    while !rest.is_empty() {
        let close = rest.find(')').ok_or_else(malformed)?;
        let (pair, tail) = rest.split_at(close + 1);
        segments.push(parse_pair(pair).ok_or_else(malformed)?);
        rest = tail.trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if rest.is_empty() {
                return Err(malformed());
            }
        } else if !rest.is_empty() {
            return Err(malformed());
        }
    }
    Ok(segments)
}

fn parse_include(line: usize, value: &str) -> Result<Option<VertexId>, RequestParseError> {
    match value {
        "" | "-1" => Ok(None),
        id => parse_id(line, "IncludeNode", id).map(Some),
    }
}

impl Fields {
    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), RequestParseError> {
        match key {
            "Mode" => set_once(&mut self.mode, value.parse()?, "Mode", line),
            "Source" => set_once(&mut self.source, parse_id(line, "Source", value)?, "Source", line),
            "Destination" => set_once(
                &mut self.destination,
                parse_id(line, "Destination", value)?,
                "Destination",
                line,
            ),
            "MaxWalkTime" => set_once(
                &mut self.max_walk_time,
                parse_minutes(line, value)?,
                "MaxWalkTime",
                line,
            ),
            "AvoidNodes" => set_once(
                &mut self.avoid_nodes,
                parse_nodes(line, value)?,
                "AvoidNodes",
                line,
            ),
            "AvoidSegments" => set_once(
                &mut self.avoid_segments,
                parse_segments(line, value)?,
                "AvoidSegments",
                line,
            ),
            "IncludeNode" => set_once(
                &mut self.include,
                parse_include(line, value)?,
                "IncludeNode",
                line,
            ),
            other => {
                log::warn!("ignoring unknown request key {other:?} on line {line}");
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<ParsedRequest, RequestParseError> {
        let mode = self.mode.ok_or(RequestParseError::Missing { key: "Mode" })?;
        let source = self.source.ok_or(RequestParseError::Missing { key: "Source" })?;
        let destination = self
            .destination
            .ok_or(RequestParseError::Missing { key: "Destination" })?;

        let mut constraints = ConstraintSet::new()
            .avoiding_nodes(self.avoid_nodes.unwrap_or_default())
            .avoiding_segments(self.avoid_segments.unwrap_or_default());
        if let Some(minutes) = self.max_walk_time.flatten() {
            constraints = constraints.with_max_walk_time(minutes)?;
        }
        if let Some(include) = self.include.flatten() {
            constraints = constraints.with_must_include(include);
        }
        Ok(ParsedRequest {
            mode,
            source,
            destination,
            constraints,
        })
    }
}

/// Parse request text.
///
/// Unknown keys are logged and skipped.
///
/// # Errors
///
/// Returns [`RequestParseError`] for malformed lines, unparsable values,
/// repeated keys, a missing `Mode`, `Source` or `Destination`, or an invalid
/// walking budget.
///
/// # Examples
/// ```
/// use parkwalk_data::{RequestMode, parse_route_request};
///
/// let parsed = parse_route_request("Mode:driving\nSource:1\nDestination:4\n")?;
/// assert_eq!(parsed.mode, RequestMode::Driving);
/// assert!(parsed.constraints.is_unconstrained());
/// # Ok::<(), parkwalk_data::RequestParseError>(())
/// ```
pub fn parse_route_request(text: &str) -> Result<ParsedRequest, RequestParseError> {
    let mut fields = Fields::default();
    for (number, raw) in text.lines().enumerate() {
        let line = number + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (key, value) =
            trimmed
                .split_once(':')
                .ok_or_else(|| RequestParseError::MalformedLine {
                    line,
                    text: trimmed.to_owned(),
                })?;
        fields.apply(line, key.trim(), value.trim())?;
    }
    let parsed = fields.finish()?;
    log::debug!(
        "parsed {} request from {} to {}",
        parsed.mode,
        parsed.source,
        parsed.destination
    );
    Ok(parsed)
}

/// Read and parse a request file.
///
/// # Errors
///
/// Returns [`RequestParseError::Read`] when the file cannot be read, or any
/// error from [`parse_route_request`].
pub fn read_route_request(path: &Utf8Path) -> Result<ParsedRequest, RequestParseError> {
    let text = read_to_string(path).map_err(|source| RequestParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_route_request(&text)
}
