//! Error types emitted by the parkwalk CLI.
//!
//! Keep this error type reasonably small, as most CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use parkwalk_core::{GraphError, PlanError};
use parkwalk_data::{LoadError, RequestParseError};
use thiserror::Error;

/// Errors emitted by the parkwalk CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A locations or distances table could not be read.
    #[error("failed to read {path:?}: {source}")]
    ReadTable {
        /// The table's path.
        path: Utf8PathBuf,
        /// Underlying load error.
        #[source]
        source: LoadError,
    },
    /// The tables do not describe a valid network.
    #[error("invalid network: {0}")]
    BuildNetwork(#[from] GraphError),
    /// The request file is malformed.
    #[error("invalid route request: {0}")]
    ParseRequest(#[from] RequestParseError),
    /// The planner rejected the request.
    #[error("planning failed: {source}")]
    Plan {
        /// Planner error.
        source: PlanError,
    },
    /// Serializing the report failed.
    #[error("failed to serialize plan report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Writing the report failed.
    #[error("failed to write plan output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
