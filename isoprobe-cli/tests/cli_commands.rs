//! End-to-end tests for the `isoprobe` binary.
//!
//! Each test runs the built binary from the workspace root, where the
//! `smalldata/` fixtures live, with a config path that does not exist so
//! the defaults apply.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("cli crate lives inside the workspace")
        .to_path_buf()
}

fn isoprobe(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_isoprobe"))
        .current_dir(workspace_root())
        .env_remove("RUST_LOG")
        .env_remove("ISOPROBE_DATA_ROOT")
        .env_remove("ISOPROBE_FOREST_NTREES")
        .arg("-c")
        .arg(config)
        .args(args)
        .output()
        .expect("binary should start")
}

fn missing_config(dir: &TempDir) -> PathBuf {
    dir.path().join("absent.toml")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn list_shows_builtin_scenario() {
    let dir = TempDir::new().expect("temp dir");
    let output = isoprobe(&missing_config(&dir), &["list"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("isofor_smoke"));
}

#[test]
fn run_text_prints_label_and_passes() {
    let dir = TempDir::new().expect("temp dir");
    let output = isoprobe(&missing_config(&dir), &["run", "--seed", "42"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = stdout(&output);
    assert!(text.contains("Isolation Forest Smoke Test"));
    assert!(text.contains("PASSED"));
}

#[test]
fn run_json_embedded_reports_23_rows() {
    let dir = TempDir::new().expect("temp dir");
    let output = isoprobe(
        &missing_config(&dir),
        &["--output", "json", "run", "--mode", "embedded", "--seed", "7"],
    );

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be one JSON document");
    assert_eq!(report["prediction_rows"], 23);
    assert_eq!(report["trees_built"], 7);
    assert_eq!(report["mode"], "embedded");
    assert_eq!(report["passed"], true);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Isolation Forest Smoke Test"));
}

#[test]
fn run_with_empty_data_root_exits_with_location_code() {
    let dir = TempDir::new().expect("temp dir");
    let data_root = TempDir::new().expect("temp dir");
    let root = data_root.path().to_string_lossy().into_owned();
    let output = isoprobe(
        &missing_config(&dir),
        &["--output", "json", "run", "--data-root", &root],
    );

    assert_eq!(output.status.code(), Some(3));
    let failure: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("failure should be JSON");
    assert_eq!(failure["passed"], false);
    assert_eq!(failure["kind"], "location");
    assert_eq!(failure["step"], "locate");
}

#[test]
fn run_unknown_scenario_exits_1() {
    let dir = TempDir::new().expect("temp dir");
    let output = isoprobe(&missing_config(&dir), &["run", "kmeans_smoke"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("kmeans_smoke"));
}

#[test]
fn run_zero_ntrees_override_exits_1() {
    let dir = TempDir::new().expect("temp dir");
    let output = isoprobe(&missing_config(&dir), &["run", "--ntrees", "0"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn run_with_invalid_config_exits_2() {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("isoprobe.toml");
    std::fs::write(&config, "[forest]\nntrees = 0\n").expect("write config");

    let output = isoprobe(&config, &["run"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn config_validate_reports_invalid_file() {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("isoprobe.toml");
    std::fs::write(&config, "[general]\nlog_level = \"loud\"\n").expect("write config");

    let output = isoprobe(&config, &["config", "validate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("INVALID"));
}

#[test]
fn config_validate_missing_file_is_invalid() {
    let dir = TempDir::new().expect("temp dir");
    let output = isoprobe(&missing_config(&dir), &["config", "validate"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn config_show_forest_section() {
    let dir = TempDir::new().expect("temp dir");
    let output = isoprobe(
        &missing_config(&dir),
        &["config", "show", "--section", "forest"],
    );

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("[forest]"));
    assert!(text.contains("ntrees = 50"));
}

#[test]
fn unknown_log_level_flag_exits_2() {
    let dir = TempDir::new().expect("temp dir");
    let output = isoprobe(&missing_config(&dir), &["--log-level", "loud", "list"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--log-level 'loud'"));
}
