//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against an isolated data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_daybook"))
        .env("DAYBOOK_DATA_DIR", data_dir)
        .env_remove("DAYBOOK_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command and expect success.
fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\n{}", args, stderr);
    stdout
}

fn add(data_dir: &Path, date: &str, name: &str, start: &str, end: &str) -> (String, String, i32) {
    run_cli(data_dir, &["event", "add", date, name, "--start", start, "--end", end])
}

#[test]
fn test_event_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = add(dir.path(), "2024-03-05", "Standup", "09:00", "09:15");
    assert_eq!(code, 0);

    let out = run_cli_success(dir.path(), &["event", "list", "2024-03-05"]);
    assert!(out.contains("[0] 09:00-09:15 Standup (Work)"), "got: {out}");

    let out = run_cli_success(dir.path(), &["event", "list", "2024-03-05", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["index"], 0);
    assert_eq!(parsed[0]["name"], "Standup");
    assert_eq!(parsed[0]["startTime"], "09:00");
}

#[test]
fn test_event_add_overlap_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(add(dir.path(), "2024-03-05", "Focus", "09:00", "10:00").2, 0);

    let (_, stderr, code) = add(dir.path(), "2024-03-05", "Call", "09:30", "09:45");
    assert_ne!(code, 0);
    assert!(stderr.contains("overlaps"), "got: {stderr}");

    assert_eq!(add(dir.path(), "2024-03-05", "Review", "10:00", "10:30").2, 0);
}

#[test]
fn test_event_add_invalid_interval_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = add(dir.path(), "2024-03-05", "Backwards", "10:00", "09:00");
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid interval"), "got: {stderr}");
}

#[test]
fn test_event_delete_by_index_and_start() {
    let dir = tempfile::tempdir().unwrap();
    add(dir.path(), "2024-03-05", "A", "09:00", "10:00");
    add(dir.path(), "2024-03-05", "B", "11:00", "12:00");

    run_cli_success(dir.path(), &["event", "delete", "2024-03-05", "--start", "11:00"]);
    run_cli_success(dir.path(), &["event", "delete", "2024-03-05", "--index", "0"]);

    let (_, _, code) = run_cli(dir.path(), &["event", "delete", "2024-03-05", "--index", "0"]);
    assert_ne!(code, 0);

    let out = run_cli_success(dir.path(), &["event", "all", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 0);
}

#[test]
fn test_event_all_filter() {
    let dir = tempfile::tempdir().unwrap();
    add(dir.path(), "2024-03-05", "Standup", "09:00", "09:15");
    add(dir.path(), "2024-03-06", "Dentist", "09:00", "10:00");

    let out = run_cli_success(dir.path(), &["event", "all", "--filter", "STAND", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let days = parsed.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2024-03-05");
}

#[test]
fn test_export_csv_stdout() {
    let dir = tempfile::tempdir().unwrap();
    add(dir.path(), "2024-03-05", "Standup", "09:00", "09:15");

    let out = run_cli_success(dir.path(), &["export", "csv", "--month", "2024-03", "--stdout"]);
    assert_eq!(
        out,
        "Date,Name,Start Time,End Time,Description,Category\n2024-03-05,Standup,09:00,09:15,,Work\n"
    );
}

#[test]
fn test_export_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("exports");
    add(dir.path(), "2024-03-05", "Standup", "09:00", "09:15");

    run_cli_success(
        dir.path(),
        &["export", "json", "--month", "2024-03", "--out", out_dir.to_str().unwrap()],
    );
    let written = std::fs::read_to_string(out_dir.join("events-2024-03.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["2024-03-05"][0]["endTime"], "09:15");
}

#[test]
fn test_month_show() {
    let dir = tempfile::tempdir().unwrap();
    add(dir.path(), "2024-03-05", "Standup", "09:00", "09:15");
    add(dir.path(), "2024-03-05", "Lunch", "12:00", "13:00");

    let out = run_cli_success(dir.path(), &["month", "show", "2024-03"]);
    assert!(out.starts_with("March 2024"), "got: {out}");
    assert!(out.contains(" 5(2)"), "got: {out}");
    assert!(out.contains("2 events"));
}

#[test]
fn test_corrupted_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("events.json"), "{ not json").unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), &["event", "list", "2024-03-05"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No events"));
    assert!(stderr.contains("warning"));
}

#[test]
fn test_add_does_not_overwrite_corrupted_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(&path, "{ not json").unwrap();

    let (_, stderr, code) = add(dir.path(), "2024-03-05", "Standup", "09:00", "09:15");
    assert_eq!(code, 0);
    assert!(stderr.contains("memory only"), "got: {stderr}");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["config", "get", "storage.snapshot_file"]);
    assert_eq!(out.trim(), "events.json");

    run_cli_success(dir.path(), &["config", "set", "events.default_category", "Personal"]);
    add(dir.path(), "2024-03-05", "Gym", "07:00", "08:00");
    let out = run_cli_success(dir.path(), &["event", "list", "2024-03-05"]);
    assert!(out.contains("Gym (Personal)"), "got: {out}");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
}
