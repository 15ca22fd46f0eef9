//! End-to-end tests for the plan command over the sample network.

use super::helpers::NetworkFiles;
use super::*;
use crate::plan::{load_network, run_plan_with};
use rstest::{fixture, rstest};

#[fixture]
fn files() -> NetworkFiles {
    NetworkFiles::new()
}

fn plan_output(files: &NetworkFiles, request: &str, approximate: bool) -> String {
    let args = PlanArgs {
        request_path: Some(files.request(request)),
        data_dir: Some(files.root().to_path_buf()),
        approximate,
        ..PlanArgs::default()
    };
    let mut buffer = Vec::new();
    run_plan_with(args, &mut buffer).expect("plan should succeed");
    String::from_utf8(buffer).expect("utf-8 output")
}

#[rstest]
fn plans_drive_park_walk(files: NetworkFiles) {
    let output = plan_output(
        &files,
        "Mode:driving-walking\nSource:1\nDestination:5\nMaxWalkTime:18\n",
        false,
    );
    assert_eq!(
        output,
        "Source:1\nDestination:5\nDrivingRoute:1,2,4(9)\nParkingNode:4\n\
         WalkingRoute:4,5(6)\nTotalTime:15\n"
    );
}

#[rstest]
fn reports_exceeded_walking_limit(files: NetworkFiles) {
    let output = plan_output(
        &files,
        "Mode:driving-walking\nSource:1\nDestination:5\nMaxWalkTime:5\n",
        false,
    );
    assert!(
        output.ends_with("TotalTime:\nMessage:Exceeded Max Walking Time of 5 minutes.\n"),
        "unexpected output: {output}"
    );
}

#[rstest]
fn approximate_mode_suggests_best_route_and_a_detour(files: NetworkFiles) {
    let output = plan_output(
        &files,
        "Mode:driving-walking\nSource:1\nDestination:5\nMaxWalkTime:5\n",
        true,
    );
    assert_eq!(
        output,
        "Source:1\nDestination:5\n\
         DrivingRoute1:1,2,4(9)\nParkingNode1:4\nWalkingRoute1:4,5(6)\nTotalTime1:15\n\
         DrivingRoute2:1,3,4(11)\nParkingNode2:4\nWalkingRoute2:4,5(6)\nTotalTime2:17\n"
    );
}

#[rstest]
fn approximate_mode_keeps_feasible_routes(files: NetworkFiles) {
    let output = plan_output(
        &files,
        "Mode:driving-walking\nSource:1\nDestination:5\nMaxWalkTime:18\n",
        true,
    );
    assert!(output.contains("ParkingNode:4\n"), "unexpected output: {output}");
}

#[rstest]
fn driving_mode_reports_alternative(files: NetworkFiles) {
    let output = plan_output(&files, "Mode:driving\nSource:1\nDestination:4\n", false);
    assert_eq!(
        output,
        "Source:1\nDestination:4\nBestDrivingRoute:1,2,4(9)\n\
         AlternativeDrivingRoute:1,3,4(11)\n"
    );
}

#[rstest]
fn restricted_driving_avoids_nodes(files: NetworkFiles) {
    let output = plan_output(
        &files,
        "Mode:driving\nSource:1\nDestination:4\nAvoidNodes:2\nIncludeNode:-1\n",
        false,
    );
    assert_eq!(
        output,
        "Source:1\nDestination:4\nRestrictedDrivingRoute:1,3,4(11)\n"
    );
}

#[rstest]
fn walking_mode_never_parks(files: NetworkFiles) {
    let output = plan_output(&files, "Mode:walking\nSource:1\nDestination:5\n", false);
    assert_eq!(
        output,
        "Source:1\nDestination:5\nDrivingRoute:none\nParkingNode:none\n\
         WalkingRoute:1,2,5(34)\nTotalTime:34\n"
    );
}

#[rstest]
fn unknown_locations_are_hard_errors(files: NetworkFiles) {
    let args = PlanArgs {
        request_path: Some(files.request("Mode:driving\nSource:1\nDestination:99\n")),
        data_dir: Some(files.root().to_path_buf()),
        ..PlanArgs::default()
    };
    let mut buffer = Vec::new();
    let err = run_plan_with(args, &mut buffer).expect_err("unknown destination");
    match err {
        CliError::Plan { source } => {
            assert!(source.to_string().contains("99"), "unexpected error {source}");
        }
        other => panic!("expected Plan error, found {other:?}"),
    }
    assert!(buffer.is_empty());
}

#[rstest]
fn malformed_tables_name_the_file(files: NetworkFiles) {
    let distances = files.root().join("Broken.csv");
    std::fs::write(&distances, "Location1,Location2\nHB,OT\n").expect("write broken table");
    let err = load_network(&files.root().join(DEFAULT_LOCATIONS), &distances)
        .expect_err("missing columns");
    match err {
        CliError::ReadTable { path, .. } => assert_eq!(path, distances),
        other => panic!("expected ReadTable, found {other:?}"),
    }
}

#[rstest]
fn json_output_carries_route(files: NetworkFiles) {
    let args = PlanArgs {
        request_path: Some(files.request(
            "Mode:driving-walking\nSource:1\nDestination:5\nMaxWalkTime:18\n",
        )),
        data_dir: Some(files.root().to_path_buf()),
        format: Some(OutputFormat::Json),
        ..PlanArgs::default()
    };
    let mut buffer = Vec::new();
    run_plan_with(args, &mut buffer).expect("plan should succeed");
    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid json");
    assert_eq!(value["kind"], "route");
    assert_eq!(value["source"], 1);
    assert_eq!(value["route"]["parking"], 4);
    assert_eq!(value["route"]["driving_leg"], serde_json::json!([1, 2, 4]));
}
