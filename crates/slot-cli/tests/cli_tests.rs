//! Integration tests for the `slots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the compute, days and
//! check subcommands through the actual binary, including stdin piping, file
//! I/O, policy overrides and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Two weeks before the fixture date, so lead time never interferes.
const EARLY: &str = "2026-03-01T00:00:00Z";

fn request_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/request.json")
}

fn policy_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/policy.json")
}

fn request_json() -> String {
    std::fs::read_to_string(request_path()).expect("request.json fixture must exist")
}

fn run_json(args: &[&str]) -> Value {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args(args)
        .output()
        .expect("slots binary must run");
    assert!(
        output.status.success(),
        "slots {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

fn times(slots: &Value) -> Vec<&str> {
    slots
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["time"].as_str().unwrap())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// compute
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compute_from_file() {
    let slots = run_json(&[
        "compute",
        "-i",
        request_path(),
        "--lead-hours",
        "0",
        "--now",
        EARLY,
    ]);

    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 18);
    assert_eq!(slots[0]["time"], "09:00");
    assert_eq!(slots[0]["startsAt"], "2026-03-16T12:00:00Z");
    // Confirmed 12:00-13:00 local and the approved 17:00-18:00 local break.
    let blocked: Vec<&str> = slots
        .iter()
        .filter(|s| s["isAvailable"] == false)
        .map(|s| s["time"].as_str().unwrap())
        .collect();
    assert_eq!(blocked, vec!["12:00", "12:30", "17:00", "17:30"]);
    assert_eq!(slots[6]["reason"], "appointment");
    assert_eq!(slots[16]["reason"], "block");
}

#[test]
fn compute_from_stdin() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["compute", "--lead-hours", "0", "--now", EARLY])
        .write_stdin(request_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"time\": \"09:00\""))
        .stdout(predicate::str::contains("\"isAvailable\": true"));
}

#[test]
fn compute_available_only() {
    let slots = run_json(&[
        "compute",
        "-i",
        request_path(),
        "--lead-hours",
        "0",
        "--now",
        EARLY,
        "--available-only",
    ]);

    let times = times(&slots);
    assert_eq!(times.len(), 14);
    assert!(!times.contains(&"12:00"));
    assert!(!times.contains(&"17:30"));
}

#[test]
fn compute_grouped() {
    let grouped = run_json(&[
        "compute",
        "-i",
        request_path(),
        "--lead-hours",
        "0",
        "--now",
        EARLY,
        "--group",
    ]);

    assert_eq!(grouped["morning"].as_array().unwrap().len(), 6);
    assert_eq!(grouped["afternoon"].as_array().unwrap().len(), 12);
    assert!(grouped["evening"].as_array().unwrap().is_empty());
}

#[test]
fn compute_with_policy_file() {
    // Hourly grid from the policy file: 09:00 .. 17:00.
    let slots = run_json(&[
        "compute",
        "-i",
        request_path(),
        "--policy",
        policy_path(),
        "--now",
        EARLY,
    ]);

    assert_eq!(
        times(&slots),
        vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"]
    );
}

#[test]
fn flags_override_the_policy_file() {
    let slots = run_json(&[
        "compute",
        "-i",
        request_path(),
        "--policy",
        policy_path(),
        "--interval",
        "90",
        "--now",
        EARLY,
    ]);

    assert_eq!(
        times(&slots),
        vec!["09:00", "10:30", "12:00", "13:30", "15:00", "16:30"]
    );
}

#[test]
fn lead_time_applies_against_pinned_now() {
    // now = 10:00 local (13:00Z), default 2h lead: nothing before 12:00.
    let slots = run_json(&[
        "compute",
        "-i",
        request_path(),
        "--now",
        "2026-03-16T13:00:00Z",
    ]);

    let slots = slots.as_array().unwrap();
    assert!(slots[..6].iter().all(|s| s["reason"] == "tooSoon"));
    assert_eq!(slots[6]["reason"], "appointment");
    assert_eq!(slots[8]["isAvailable"], true);
}

#[test]
fn compute_to_file() {
    let output_path = "/tmp/slots-test-compute-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "compute",
            "-i",
            request_path(),
            "-o",
            output_path,
            "--now",
            EARLY,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    let slots: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(slots.as_array().unwrap().len(), 18);

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn compute_on_closed_day_prints_empty_array() {
    let sunday = request_json().replace("2026-03-16\"", "2026-03-15\"");

    Command::cargo_bin("slots")
        .unwrap()
        .args(["compute", "--now", EARLY])
        .write_stdin(sunday)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

// ─────────────────────────────────────────────────────────────────────────────
// days
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn days_scans_a_week() {
    let days = run_json(&[
        "days",
        "-i",
        request_path(),
        "--from",
        "2026-03-15",
        "--lead-hours",
        "0",
        "--now",
        EARLY,
    ]);

    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2026-03-15");
    assert_eq!(days[0]["hasAvailability"], false);
    assert_eq!(days[1]["availableCount"], 14);
    assert_eq!(days[2]["availableCount"], 18);
    // Saturday 09:00-14:00.
    assert_eq!(days[6]["availableCount"], 10);
}

#[test]
fn days_respects_max_booking_days() {
    let days = run_json(&[
        "days",
        "-i",
        request_path(),
        "--policy",
        policy_path(),
        "--days",
        "30",
        "--now",
        EARLY,
    ]);

    assert_eq!(days.as_array().unwrap().len(), 10);
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_reports_overlaps() {
    let conflicts = run_json(&[
        "check",
        "-i",
        request_path(),
        "--start",
        "2026-03-16T15:30:00Z",
        "--end",
        "2026-03-16T20:30:00Z",
    ]);

    let conflicts = conflicts.as_array().unwrap();
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0]["kind"], "appointment");
    assert_eq!(conflicts[0]["overlapMinutes"], 30);
    assert_eq!(conflicts[1]["kind"], "block");
    assert_eq!(conflicts[1]["overlapMinutes"], 30);
}

#[test]
fn check_back_to_back_is_clear() {
    let conflicts = run_json(&[
        "check",
        "-i",
        request_path(),
        "--start",
        "2026-03-16T16:00:00Z",
        "--end",
        "2026-03-16T16:30:00Z",
    ]);

    assert!(conflicts.as_array().unwrap().is_empty());
}

#[test]
fn check_rejects_inverted_interval() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "check",
            "-i",
            request_path(),
            "--start",
            "2026-03-16T16:00:00Z",
            "--end",
            "2026-03-16T15:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be after"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["compute", "-i", "/nonexistent/request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn invalid_request_json_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .arg("compute")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse slot request"));
}

#[test]
fn zero_interval_is_rejected() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["compute", "-i", request_path(), "--interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn unknown_timezone_is_rejected() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["compute", "-i", request_path(), "--timezone", "Nowhere/Special"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn malformed_working_hours_fail_fast() {
    let broken = request_json().replace(
        "\"dayOfWeek\": 1, \"startTime\": \"09:00\"",
        "\"dayOfWeek\": 1, \"startTime\": \"9am\"",
    );

    Command::cargo_bin("slots")
        .unwrap()
        .args(["compute", "--now", EARLY])
        .write_stdin(broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}
