//! Plan command implementation for the parkwalk CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parkwalk_core::{
    Graph, IncludePolicy, NoRouteReason, ParkingTieBreak, PlanError, PlannerConfig, RoutePlanner,
};
use parkwalk_data::{
    ParsedRequest, RequestMode, read_distances_file, read_locations_file, read_route_request,
};
use serde::{Deserialize, Serialize};

use crate::render::{Outcome, OutputFormat, PlanReport, SUGGESTION_COUNT};
use crate::{
    ARG_PLAN_APPROXIMATE, ARG_PLAN_DATA_DIR, ARG_PLAN_DISTANCES, ARG_PLAN_FORMAT,
    ARG_PLAN_INCLUDE_POLICY, ARG_PLAN_LOCATIONS, ARG_PLAN_REQUEST, ARG_PLAN_TIE_BREAK, CliError,
    DEFAULT_DISTANCES, DEFAULT_LOCATIONS, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a route described by a request file over the network \
                 in a locations table and a distances table. Table paths can \
                 come from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan a drive, park and walk route"
)]
#[ortho_config(prefix = "PARKWALK")]
pub(crate) struct PlanArgs {
    /// Path to the route request file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Directory containing `Locations.csv` and `Distances.csv`.
    #[arg(long = ARG_PLAN_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to the locations table.
    #[arg(long = ARG_PLAN_LOCATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) locations: Option<Utf8PathBuf>,
    /// Override the path to the distances table.
    #[arg(long = ARG_PLAN_DISTANCES, value_name = "path")]
    #[serde(default)]
    pub(crate) distances: Option<Utf8PathBuf>,
    /// Suggest the best route and a detour around it when the walking
    /// limit cannot be met.
    #[arg(long = ARG_PLAN_APPROXIMATE)]
    #[serde(default)]
    pub(crate) approximate: bool,
    /// Output encoding.
    #[arg(long = ARG_PLAN_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Ordering of equally fast parking locations
    /// (`less-walking` or `more-walking`).
    #[arg(
        long = ARG_PLAN_TIE_BREAK,
        value_name = "policy",
        value_parser = parse_tie_break
    )]
    #[ortho_config(skip_cli)]
    #[serde(default)]
    pub(crate) tie_break: Option<ParkingTieBreak>,
    /// Which leg may pass the required location
    /// (`either-leg`, `driving-leg` or `walking-leg`).
    #[arg(
        long = ARG_PLAN_INCLUDE_POLICY,
        value_name = "policy",
        value_parser = parse_include_policy
    )]
    #[ortho_config(skip_cli)]
    #[serde(default)]
    pub(crate) include_policy: Option<IncludePolicy>,
}

fn parse_tie_break(value: &str) -> Result<ParkingTieBreak, String> {
    match value {
        "less-walking" => Ok(ParkingTieBreak::LessWalking),
        "more-walking" => Ok(ParkingTieBreak::MoreWalking),
        other => Err(format!(
            "unknown tie-break {other:?}; expected less-walking or more-walking"
        )),
    }
}

fn parse_include_policy(value: &str) -> Result<IncludePolicy, String> {
    match value {
        "either-leg" => Ok(IncludePolicy::EitherLeg),
        "driving-leg" => Ok(IncludePolicy::DrivingLeg),
        "walking-leg" => Ok(IncludePolicy::WalkingLeg),
        other => Err(format!(
            "unknown include policy {other:?}; expected either-leg, driving-leg or walking-leg"
        )),
    }
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the route request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the locations table.
    pub(crate) locations: Utf8PathBuf,
    /// Path to the distances table.
    pub(crate) distances: Utf8PathBuf,
    /// Whether to fall back to relaxed suggestions.
    pub(crate) approximate: bool,
    /// Output encoding.
    pub(crate) format: OutputFormat,
    /// Planner policies.
    pub(crate) planner: PlannerConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        Self::require_existing(&self.locations, ARG_PLAN_LOCATIONS)?;
        Self::require_existing(&self.distances, ARG_PLAN_DISTANCES)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match parkwalk_data::fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let data_dir = args.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let locations = args
            .locations
            .unwrap_or_else(|| data_dir.join(DEFAULT_LOCATIONS));
        let distances = args
            .distances
            .unwrap_or_else(|| data_dir.join(DEFAULT_DISTANCES));
        let planner = PlannerConfig::default()
            .with_tie_break(args.tie_break.unwrap_or_default())
            .with_include_policy(args.include_policy.unwrap_or_default());

        Ok(Self {
            request_path,
            locations,
            distances,
            approximate: args.approximate,
            format: args.format.unwrap_or_default(),
            planner,
        })
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let report = execute_plan(&config)?;
    report.write(config.format, writer)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_plan(config: &PlanConfig) -> Result<PlanReport, CliError> {
    let mut graph = load_network(&config.locations, &config.distances)?;
    let parsed = read_route_request(&config.request_path)?;
    let planner = RoutePlanner::new(config.planner);
    plan_report(&planner, &mut graph, parsed, config.approximate)
}

/// Loads the network, tagging read failures with the offending table.
pub(super) fn load_network(
    locations: &Utf8Path,
    distances: &Utf8Path,
) -> Result<Graph, CliError> {
    let location_records =
        read_locations_file(locations).map_err(|source| CliError::ReadTable {
            path: locations.to_path_buf(),
            source,
        })?;
    let distance_records =
        read_distances_file(distances).map_err(|source| CliError::ReadTable {
            path: distances.to_path_buf(),
            source,
        })?;
    Ok(Graph::build(&location_records, &distance_records)?)
}

/// Separates infeasible requests, which are reported, from hard failures.
fn feasible<T>(result: Result<T, PlanError>) -> Result<Result<T, NoRouteReason>, CliError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(PlanError::NoFeasibleRoute(reason)) => Ok(Err(reason)),
        Err(source) => Err(CliError::Plan { source }),
    }
}

/// Plans `parsed` and builds the report for its mode.
pub(super) fn plan_report(
    planner: &RoutePlanner,
    graph: &mut Graph,
    parsed: ParsedRequest,
    approximate: bool,
) -> Result<PlanReport, CliError> {
    let mode = parsed.mode;
    let max_walk_time = parsed.constraints.max_walk_time().minutes();
    let request = parsed.into_route_request();

    let outcome = match mode {
        RequestMode::Driving => {
            let restricted = !request.constraints.is_unconstrained();
            Outcome::driving(restricted, feasible(planner.plan_driving(graph, &request))?)
        }
        RequestMode::DrivingWalking if approximate => {
            match feasible(planner.plan(graph, &request))? {
                Ok(route) => Outcome::route(Ok(route), max_walk_time),
                Err(reason) => {
                    log::info!("no route within the walking limit ({reason}); relaxing it");
                    let suggestions =
                        feasible(planner.relaxed_suggestions(graph, &request, SUGGESTION_COUNT))?
                            .unwrap_or_default();
                    Outcome::Suggestions {
                        suggestions,
                        max_walk_time,
                    }
                }
            }
        }
        RequestMode::DrivingWalking | RequestMode::Walking => {
            Outcome::route(feasible(planner.plan(graph, &request))?, max_walk_time)
        }
    };

    Ok(PlanReport {
        source: request.source,
        destination: request.destination,
        outcome,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
