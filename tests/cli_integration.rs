//! Integration tests for the tonsign binary
//!
//! Runs the built executable against a saved log file

use std::path::Path;
use std::process::{Command, Output};
use serde_json::Value;

fn replay(dir: &Path, extra: &[&str]) -> Output {
    let log = dir.join("output_log_1.txt");
    std::fs::write(
        &log,
        "round type is Classic\nBONUS ACTIVE!\nround type is Classic\n",
    )
    .unwrap();

    Command::new(env!("CARGO_BIN_EXE_tonsign"))
        .arg("--replay")
        .arg(&log)
        .arg("--log-dir")
        .arg(dir)
        .arg("--app-log-dir")
        .arg(dir.join("app"))
        .arg("--dry-run")
        .args(extra)
        .output()
        .unwrap()
}

/// With --json, stdout holds nothing but one JSON object per prediction
#[test]
fn test_json_stdout_is_only_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let output = replay(dir.path(), &["--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let predictions: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("every stdout line is JSON"))
        .collect();
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[1]["prediction"], "SPECIAL");
    assert_eq!(predictions[1]["bonus"], true);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("New round started: Classic"));
}

/// Log lines are also written to latest.log
#[test]
fn test_replay_writes_app_log() {
    let dir = tempfile::tempdir().unwrap();
    let output = replay(dir.path(), &["--no-color"]);
    assert!(output.status.success());

    let app_log = std::fs::read_to_string(dir.path().join("app").join("latest.log")).unwrap();
    assert!(app_log.contains("Replay finished: 3 lines, 2 rounds"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("New round started"));
}

/// --test prints the smoke message and exits cleanly
#[test]
fn test_smoke_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_tonsign"))
        .arg("--test")
        .arg("--app-log-dir")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Test run OK"));
}
