//! Integration tests for the `lull` CLI binary.
//!
//! These exercise argument parsing, output formats, exit codes and config
//! loading against the real binary.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `lull` binary with env isolation.
///
/// Points config directories at a nonexistent path so tests never touch
/// the user's real configuration.
fn lull_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lull");
    cmd.env("HOME", "/tmp/lull-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/lull-cli-test-nonexistent")
        .env_remove("LULL_CONFIG")
        .env_remove("LULL_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = lull_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage' in output:\n{stderr}");
}

#[test]
fn test_help_lists_subcommands() {
    lull_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("queue")
            .and(predicate::str::contains("debounce"))
            .and(predicate::str::contains("calendar")),
    );
}

#[test]
fn test_completions_bash() {
    lull_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Queue ───────────────────────────────────────────────────────────

#[test]
fn test_queue_sorts_and_dequeues() {
    lull_cmd()
        .args(["queue", "5", "2", "4", "1", "3", "--dequeue", "2"])
        .assert()
        .success()
        .stdout("sorted: 1 2 3 4 5\ndequeued: 1 2\nremaining: 3\n");
}

#[test]
fn test_queue_below_stops_at_rejected_head() {
    lull_cmd()
        .args(["queue", "--local", "--dequeue", "10", "--below", "3", "--", "5", "-1", "4", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dequeued: -1 2").and(predicate::str::contains("remaining: 2")));
}

#[test]
fn test_queue_json_output() {
    let output = lull_cmd()
        .args(["-o", "json", "queue", "3", "1", "2", "-n", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "shared");
    assert_eq!(report["sorted"], serde_json::json!([1, 2, 3]));
    assert_eq!(report["dequeued"], serde_json::json!([1]));
    assert_eq!(report["remaining"], 2);
}

#[test]
fn test_queue_rejects_non_numbers() {
    lull_cmd().args(["queue", "abc"]).assert().code(2);
}

// ── Debounce ────────────────────────────────────────────────────────

#[test]
fn test_debounce_prints_last_value_per_key() {
    lull_cmd()
        .args(["debounce", "b=2", "a=99", "a=88", "a=77", "--interval-ms", "20"])
        .assert()
        .success()
        .stdout("a=77\nb=2\n");
}

#[test]
fn test_debounce_zero_interval_is_usage_error() {
    lull_cmd()
        .args(["debounce", "a=1", "--interval-ms", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("interval"));
}

#[test]
fn test_debounce_rejects_malformed_pair() {
    lull_cmd().args(["debounce", "novalue"]).assert().code(2);
}

// ── Calendar ────────────────────────────────────────────────────────

#[test]
fn test_calendar_next_day_on_weekday() {
    lull_cmd()
        .args(["calendar", "--from", "2024-10-27", "--day", "29", "--weekday", "7"])
        .assert()
        .success()
        .stdout("2025-03-29\n");
}

#[test]
fn test_calendar_searches_backwards() {
    lull_cmd()
        .args(["calendar", "--from", "2024-10-05", "--day", "-7"])
        .assert()
        .success()
        .stdout("2024-09-07\n");
}

#[test]
fn test_calendar_invalid_weekday() {
    lull_cmd()
        .args(["calendar", "--weekday", "9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("weekday"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_defaults() {
    lull_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interval_ms = 100").and(predicate::str::contains("mode = \"shared\"")));
}

#[test]
fn test_config_file_drives_queue_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lull.toml");
    std::fs::write(&path, "[queue]\nmode = \"local\"\n").unwrap();

    lull_cmd()
        .arg("--config")
        .arg(&path)
        .args(["-o", "json", "queue", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"local\""));
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lull.toml");
    std::fs::write(&path, "[notifier]\ninterval_ms = \"soon\"\n").unwrap();

    lull_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .code(2);
}
