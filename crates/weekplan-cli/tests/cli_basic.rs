//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and
//! verify outputs.

use std::io::Write;
use std::process::{Command, Stdio};

const TODAY: &str = "2026-10-19";

/// Run a CLI command with optional stdin and return (stdout, stderr, code).
fn run_cli(config_dir: &std::path::Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_weekplan"))
        .args(args)
        .env("WEEKPLAN_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_session_add_and_generate() {
    let dir = tempfile::tempdir().unwrap();
    let script = "add \"Complete project report\" --deadline 2026-10-19 --duration 5\n\
                  add Review --deadline 2026-10-21 --duration 8 --priority Medium\n\
                  list\n\
                  generate --daily-hours 8\n\
                  quit\n";
    let (stdout, stderr, code) = run_cli(dir.path(), &["--today", TODAY, "session"], script);
    assert_eq!(code, 0, "session failed: {stderr}");
    assert!(stdout.contains("Task 'Complete project report' added!"));
    assert!(stdout.contains("Task List"));
    assert!(stdout.contains("Weekly Schedule"));
    assert!(stdout.contains("Monday, 19 Oct"));
    assert!(stdout.contains("Complete project report (5 hrs)"));
    assert!(stdout.contains("Review (8 hrs)"));
    assert!(stdout.contains("No tasks assigned."));
}

#[test]
fn test_session_ends_at_eof() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["--today", TODAY, "session"], "generate\n");
    assert_eq!(code, 0);
    assert_eq!(stdout.matches("No tasks assigned.").count(), 7);
}

#[test]
fn test_plan_json_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = r#"[
        {"name": "Essay", "deadline": "2026-10-25", "duration": 8, "priority": "Low"},
        {"name": "Slides", "deadline": "2026-10-19", "duration": 3, "priority": "High"}
    ]"#;
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["--today", TODAY, "plan", "-", "--daily-hours", "3", "--json"],
        tasks,
    );
    assert_eq!(code, 0, "plan failed: {stderr}");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days = report.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2026-10-19");
    assert_eq!(
        days[0]["assignments"],
        serde_json::json!(["Slides (3 hrs)", "Essay (3 hrs)"])
    );
    assert_eq!(days[1]["assignments"], serde_json::json!(["Essay (3 hrs)"]));
    assert_eq!(days[2]["assignments"], serde_json::json!(["Essay (2 hrs)"]));
    assert_eq!(days[6]["day"], "Sunday, 25 Oct");
}

#[test]
fn test_plan_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = r#"[
        {"name": "a", "deadline": "2026-10-22", "duration": 7, "priority": "Medium"},
        {"name": "b", "deadline": "2026-10-20", "duration": 4, "priority": "Low"}
    ]"#;
    let args = ["--today", TODAY, "plan", "-", "--daily-hours", "2", "--json"];
    let first = run_cli(dir.path(), &args, tasks);
    let second = run_cli(dir.path(), &args, tasks);
    assert_eq!(first.2, 0);
    assert_eq!(first.0, second.0);
}

#[test]
fn test_plan_rejects_past_deadline() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = r#"[{"name": "old", "deadline": "2026-10-01"}]"#;
    let (_, stderr, code) = run_cli(dir.path(), &["--today", TODAY, "plan", "-"], tasks);
    assert_ne!(code, 0);
    assert!(stderr.contains("task #0"), "{stderr}");
}

#[test]
fn test_config_set_affects_plan() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "planner.daily_hours", "2"], "");
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "planner.daily_hours"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2");

    let tasks = r#"[{"name": "t", "deadline": "2026-10-25", "duration": 5}]"#;
    let (stdout, _, code) = run_cli(dir.path(), &["--today", TODAY, "plan", "-", "--json"], tasks);
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report[0]["assignments"], serde_json::json!(["t (2 hrs)"]));
    assert_eq!(report[2]["assignments"], serde_json::json!(["t (1 hrs)"]));
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "planner.nope"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"));

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "planner.daily_hours", "0"], "");
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "planner.limit_mode", "shared"], "");
    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"], "");
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["planner"]["limit_mode"], "shared");

    let (_, _, code) = run_cli(dir.path(), &["config", "reset"], "");
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "planner.limit_mode"], "");
    assert_eq!(stdout.trim(), "per_task");
}
