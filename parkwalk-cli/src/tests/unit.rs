//! Focused unit tests covering plan CLI configuration and validation.

use super::helpers::{NetworkFiles, write_utf8};
use super::*;
use crate::plan::{PlanConfig, config_from_layers_for_test};
use camino::Utf8PathBuf;
use parkwalk_core::{IncludePolicy, ParkingTieBreak, PlannerConfig};
use rstest::rstest;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MissingInput {
    Request,
    Locations,
    Distances,
}

#[rstest]
fn converting_plan_without_request_errors() {
    let args = PlanArgs::default();

    let err = PlanConfig::try_from(args).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(env, ENV_PLAN_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_derives_default_table_paths() {
    let files = NetworkFiles::new();
    let request_path = files.request("Mode:driving\nSource:1\nDestination:4\n");
    let args = PlanArgs {
        request_path: Some(request_path.clone()),
        data_dir: Some(files.root().to_path_buf()),
        ..PlanArgs::default()
    };

    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.request_path, request_path);
    assert_eq!(config.locations, files.root().join(DEFAULT_LOCATIONS));
    assert_eq!(config.distances, files.root().join(DEFAULT_DISTANCES));
    assert_eq!(config.format, OutputFormat::Text);
    assert!(!config.approximate);
    assert_eq!(config.planner, PlannerConfig::default());
    config.validate_sources().expect("sample inputs exist");
}

#[rstest]
#[case::missing_request(ARG_PLAN_REQUEST, MissingInput::Request)]
#[case::missing_locations(ARG_PLAN_LOCATIONS, MissingInput::Locations)]
#[case::missing_distances(ARG_PLAN_DISTANCES, MissingInput::Distances)]
fn validate_sources_reports_missing_inputs(
    #[case] expected_field: &'static str,
    #[case] missing: MissingInput,
) {
    let files = NetworkFiles::new();
    let root = files.root();
    let existing = files.request("Mode:driving\nSource:1\nDestination:4\n");
    let absent = root.join("absent.csv");
    let pick = |which: MissingInput, present: Utf8PathBuf| {
        if which == missing {
            absent.clone()
        } else {
            present
        }
    };

    let config = PlanConfig {
        request_path: pick(MissingInput::Request, existing),
        locations: pick(MissingInput::Locations, root.join(DEFAULT_LOCATIONS)),
        distances: pick(MissingInput::Distances, root.join(DEFAULT_DISTANCES)),
        approximate: false,
        format: OutputFormat::Text,
        planner: PlannerConfig::default(),
    };

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, expected_field);
            assert_eq!(path, absent);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let files = NetworkFiles::new();
    let request_path = files.root().join("requests");
    std::fs::create_dir(&request_path).expect("request directory");

    let config = PlanConfig {
        request_path: request_path.clone(),
        locations: files.root().join(DEFAULT_LOCATIONS),
        distances: files.root().join(DEFAULT_DISTANCES),
        approximate: false,
        format: OutputFormat::Text,
        planner: PlannerConfig::default(),
    };

    let err = config
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn parses_flags_and_policies() {
    let cli = Cli::try_parse_from([
        "parkwalk",
        "plan",
        "request.txt",
        "--approximate",
        "--format",
        "json",
        "--tie-break",
        "more-walking",
        "--include-policy",
        "walking-leg",
    ])
    .expect("arguments should parse");
    let Command::Plan(args) = cli.command;
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.request_path, Utf8PathBuf::from("request.txt"));
    assert!(config.approximate);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.planner.tie_break, ParkingTieBreak::MoreWalking);
    assert_eq!(config.planner.include_policy, IncludePolicy::WalkingLeg);
}

#[rstest]
#[case(&["parkwalk", "plan", "r.txt", "--tie-break", "closest"])]
#[case(&["parkwalk", "plan", "r.txt", "--format", "xml"])]
fn rejects_unknown_values(#[case] argv: &[&str]) {
    let err = Cli::try_parse_from(argv).expect_err("value should be rejected");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence_and_defaults_paths() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let files = NetworkFiles::new();
    let root = files.root();
    let env_request = root.join("from-env-request.txt");
    write_utf8(&env_request, b"Mode:driving\nSource:1\nDestination:4\n");
    let cli_dir = root.join("from-cli");

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "data_dir": root.join("from-file").as_str(),
            "format": "json",
            "tie_break": "more-walking",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "data_dir": root.join("from-env").as_str(),
    }));
    composer.push_cli(json!({
        "data_dir": cli_dir.as_str(),
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    assert_eq!(config.locations, cli_dir.join(DEFAULT_LOCATIONS));
    assert_eq!(config.distances, cli_dir.join(DEFAULT_DISTANCES));
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.planner.tie_break, ParkingTieBreak::MoreWalking);
}
