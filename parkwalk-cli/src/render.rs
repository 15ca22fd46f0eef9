//! Plan reports and their text and JSON encodings.
//!
//! The text encoding is a sequence of `Key:Value` lines. Routes are written
//! as comma-separated location ids followed by the leg time in brackets,
//! e.g. `DrivingRoute:1,2,4(9)`.

use std::io::{self, Write};

use parkwalk_core::{DrivenRoute, DrivingPlan, NoRouteReason, RouteResult, VertexId};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// How many relaxed suggestions an approximate plan reports.
pub(crate) const SUGGESTION_COUNT: usize = 2;

const NO_PATH: &str = "No path from origin to destination.";

/// Output encoding for plan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Key:Value` lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Everything the `plan` command reports for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PlanReport {
    pub(crate) source: VertexId,
    pub(crate) destination: VertexId,
    #[serde(flatten)]
    pub(crate) outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub(crate) enum Outcome {
    /// Drive, park and walk, or walk the whole way.
    Route {
        route: Option<RouteResult>,
        failure: Option<NoRouteReason>,
        max_walk_time: Option<f64>,
    },
    /// Ranked routes that ignore the walking budget.
    Suggestions {
        suggestions: Vec<RouteResult>,
        max_walk_time: Option<f64>,
    },
    /// Drive the whole way.
    Driving {
        restricted: bool,
        plan: Option<DrivingPlan>,
        failure: Option<NoRouteReason>,
    },
}

impl Outcome {
    pub(crate) fn route(
        result: Result<RouteResult, NoRouteReason>,
        max_walk_time: Option<f64>,
    ) -> Self {
        match result {
            Ok(route) => Self::Route {
                route: Some(route),
                failure: None,
                max_walk_time,
            },
            Err(reason) => Self::Route {
                route: None,
                failure: Some(reason),
                max_walk_time,
            },
        }
    }

    pub(crate) fn driving(restricted: bool, result: Result<DrivingPlan, NoRouteReason>) -> Self {
        match result {
            Ok(plan) => Self::Driving {
                restricted,
                plan: Some(plan),
                failure: None,
            },
            Err(reason) => Self::Driving {
                restricted,
                plan: None,
                failure: Some(reason),
            },
        }
    }
}

impl PlanReport {
    /// Write the report in `format`.
    pub(crate) fn write(
        &self,
        format: OutputFormat,
        writer: &mut dyn Write,
    ) -> Result<(), CliError> {
        match format {
            OutputFormat::Text => self.write_text(writer).map_err(CliError::WriteOutput),
            OutputFormat::Json => {
                let payload =
                    serde_json::to_string_pretty(self).map_err(CliError::SerializeReport)?;
                writer
                    .write_all(payload.as_bytes())
                    .map_err(CliError::WriteOutput)?;
                writer.write_all(b"\n").map_err(CliError::WriteOutput)
            }
        }
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Source:{}", self.source)?;
        writeln!(out, "Destination:{}", self.destination)?;
        match &self.outcome {
            Outcome::Route {
                route: Some(route), ..
            } => write_route(out, route, ""),
            Outcome::Route {
                route: None,
                failure,
                max_walk_time,
            } => write_failure(out, "", &failure_message(*failure, *max_walk_time)),
            Outcome::Suggestions { suggestions, .. } => {
                for rank in 0..SUGGESTION_COUNT {
                    let suffix = (rank + 1).to_string();
                    match suggestions.get(rank) {
                        Some(route) => write_route(out, route, &suffix)?,
                        None => write_failure(out, &suffix, NO_PATH)?,
                    }
                }
                Ok(())
            }
            Outcome::Driving {
                restricted, plan, ..
            } => write_driving(out, *restricted, plan.as_ref()),
        }
    }
}

fn failure_message(failure: Option<NoRouteReason>, max_walk_time: Option<f64>) -> String {
    match (failure, max_walk_time) {
        (Some(NoRouteReason::WalkBudgetExceeded), Some(minutes)) => {
            format!("Exceeded Max Walking Time of {minutes} minutes.")
        }
        _ => NO_PATH.to_owned(),
    }
}

fn ids(path: &[VertexId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn write_leg(out: &mut dyn Write, key: &str, path: &[VertexId], time: f64) -> io::Result<()> {
    if path.is_empty() {
        writeln!(out, "{key}:none")
    } else {
        writeln!(out, "{key}:{}({time})", ids(path))
    }
}

fn write_route(out: &mut dyn Write, route: &RouteResult, suffix: &str) -> io::Result<()> {
    write_leg(
        out,
        &format!("DrivingRoute{suffix}"),
        &route.driving_leg,
        route.drive_time,
    )?;
    match route.parking {
        Some(parking) => writeln!(out, "ParkingNode{suffix}:{parking}")?,
        None => writeln!(out, "ParkingNode{suffix}:none")?,
    }
    write_leg(
        out,
        &format!("WalkingRoute{suffix}"),
        &route.walking_leg,
        route.walk_time,
    )?;
    writeln!(out, "TotalTime{suffix}:{}", route.total_time())
}

fn write_failure(out: &mut dyn Write, suffix: &str, message: &str) -> io::Result<()> {
    writeln!(out, "DrivingRoute{suffix}:none")?;
    writeln!(out, "ParkingNode{suffix}:none")?;
    writeln!(out, "WalkingRoute{suffix}:none")?;
    writeln!(out, "TotalTime{suffix}:")?;
    writeln!(out, "Message{suffix}:{message}")
}

fn write_driven(out: &mut dyn Write, key: &str, route: Option<&DrivenRoute>) -> io::Result<()> {
    match route {
        Some(driven) => write_leg(out, key, &driven.path, driven.drive_time),
        None => writeln!(out, "{key}:none"),
    }
}

fn write_driving(
    out: &mut dyn Write,
    restricted: bool,
    plan: Option<&DrivingPlan>,
) -> io::Result<()> {
    match (restricted, plan) {
        (true, _) => write_driven(out, "RestrictedDrivingRoute", plan.map(|found| &found.best)),
        (false, None) => writeln!(out, "BestDrivingRoute:none"),
        (false, Some(found)) => {
            write_driven(out, "BestDrivingRoute", Some(&found.best))?;
            write_driven(out, "AlternativeDrivingRoute", found.alternative.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn render(report: &PlanReport) -> String {
        let mut buffer = Vec::new();
        report
            .write(OutputFormat::Text, &mut buffer)
            .expect("rendering into memory succeeds");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    fn eco_route() -> RouteResult {
        RouteResult {
            driving_leg: vec![1, 2, 4],
            walking_leg: vec![4, 5],
            drive_time: 9.0,
            walk_time: 6.0,
            parking: Some(4),
        }
    }

    #[rstest]
    fn renders_drive_park_walk() {
        let report = PlanReport {
            source: 1,
            destination: 5,
            outcome: Outcome::route(Ok(eco_route()), Some(18.0)),
        };
        assert_eq!(
            render(&report),
            "Source:1\nDestination:5\nDrivingRoute:1,2,4(9)\nParkingNode:4\n\
             WalkingRoute:4,5(6)\nTotalTime:15\n"
        );
    }

    #[rstest]
    #[case(
        NoRouteReason::WalkBudgetExceeded,
        Some(2.5),
        "Exceeded Max Walking Time of 2.5 minutes."
    )]
    #[case(NoRouteReason::WalkBudgetExceeded, None, NO_PATH)]
    #[case(NoRouteReason::NoParkingReachable, Some(5.0), NO_PATH)]
    fn renders_failure_messages(
        #[case] reason: NoRouteReason,
        #[case] budget: Option<f64>,
        #[case] message: &str,
    ) {
        let report = PlanReport {
            source: 1,
            destination: 5,
            outcome: Outcome::route(Err(reason), budget),
        };
        let expected = format!(
            "Source:1\nDestination:5\nDrivingRoute:none\nParkingNode:none\n\
             WalkingRoute:none\nTotalTime:\nMessage:{message}\n"
        );
        assert_eq!(render(&report), expected);
    }

    #[rstest]
    fn renders_walk_only_route() {
        let route = RouteResult {
            driving_leg: Vec::new(),
            walking_leg: vec![1, 2],
            drive_time: 0.0,
            walk_time: 4.5,
            parking: None,
        };
        let report = PlanReport {
            source: 1,
            destination: 2,
            outcome: Outcome::route(Ok(route), None),
        };
        assert_eq!(
            render(&report),
            "Source:1\nDestination:2\nDrivingRoute:none\nParkingNode:none\n\
             WalkingRoute:1,2(4.5)\nTotalTime:4.5\n"
        );
    }

    #[rstest]
    fn renders_single_suggestion_with_placeholder() {
        let report = PlanReport {
            source: 1,
            destination: 5,
            outcome: Outcome::Suggestions {
                suggestions: vec![eco_route()],
                max_walk_time: Some(3.0),
            },
        };
        assert_eq!(
            render(&report),
            "Source:1\nDestination:5\nDrivingRoute1:1,2,4(9)\nParkingNode1:4\n\
             WalkingRoute1:4,5(6)\nTotalTime1:15\nDrivingRoute2:none\nParkingNode2:none\n\
             WalkingRoute2:none\nTotalTime2:\nMessage2:No path from origin to destination.\n"
        );
    }

    #[rstest]
    fn renders_best_and_missing_alternative() {
        let plan = DrivingPlan {
            best: DrivenRoute {
                path: vec![1, 2, 4],
                drive_time: 9.0,
            },
            alternative: None,
            restricted: false,
        };
        let report = PlanReport {
            source: 1,
            destination: 4,
            outcome: Outcome::driving(false, Ok(plan)),
        };
        assert_eq!(
            render(&report),
            "Source:1\nDestination:4\nBestDrivingRoute:1,2,4(9)\nAlternativeDrivingRoute:none\n"
        );
    }

    #[rstest]
    #[case(true, "RestrictedDrivingRoute:none\n")]
    #[case(false, "BestDrivingRoute:none\n")]
    fn renders_driving_failure(#[case] restricted: bool, #[case] line: &str) {
        let report = PlanReport {
            source: 1,
            destination: 4,
            outcome: Outcome::driving(restricted, Err(NoRouteReason::Unreachable)),
        };
        assert_eq!(render(&report), format!("Source:1\nDestination:4\n{line}"));
    }

    #[rstest]
    fn json_report_is_tagged() {
        let report = PlanReport {
            source: 1,
            destination: 5,
            outcome: Outcome::route(Err(NoRouteReason::WalkBudgetExceeded), Some(3.0)),
        };
        let mut buffer = Vec::new();
        report
            .write(OutputFormat::Json, &mut buffer)
            .expect("rendering into memory succeeds");
        let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid json");
        assert_eq!(value["kind"], "route");
        assert_eq!(value["failure"], "walk-budget-exceeded");
        assert_eq!(value["max_walk_time"], 3.0);
        assert!(value["route"].is_null());
    }
}
