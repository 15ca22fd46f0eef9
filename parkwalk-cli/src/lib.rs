//! Command-line interface for the parkwalk route planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;
mod render;

pub use error::CliError;
pub use render::OutputFormat;

use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_DATA_DIR: &str = "data-dir";
const ARG_PLAN_LOCATIONS: &str = "locations";
const ARG_PLAN_DISTANCES: &str = "distances";
const ARG_PLAN_APPROXIMATE: &str = "approximate";
const ARG_PLAN_FORMAT: &str = "format";
const ARG_PLAN_TIE_BREAK: &str = "tie-break";
const ARG_PLAN_INCLUDE_POLICY: &str = "include-policy";
const ENV_PLAN_REQUEST: &str = "PARKWALK_CMDS_PLAN_REQUEST_PATH";

/// Default file name of the locations table inside the data directory.
const DEFAULT_LOCATIONS: &str = "Locations.csv";
/// Default file name of the distances table inside the data directory.
const DEFAULT_DISTANCES: &str = "Distances.csv";

/// Run the parkwalk CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// inputs cannot be read, or the planner fails for a reason other than an
/// infeasible route.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "parkwalk",
    about = "Plan drive, park and walk routes over a road network",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a route described by a request file.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
