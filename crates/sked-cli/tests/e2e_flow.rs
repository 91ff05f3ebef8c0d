//! End-to-end integration tests for the full scheduling flow.
//!
//! Drives the compiled binary through the double-booking scenario:
//! create resources and events, allocate, get rejected on overlap,
//! accept back-to-back bookings, and report utilization.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn sked_binary() -> String {
    env!("CARGO_BIN_EXE_sked").to_string()
}

/// Write a config pointing at a database inside the temp directory.
fn write_config(temp: &TempDir) -> PathBuf {
    let db_file = temp.path().join("sked.db");
    let config_file = temp.path().join("config.toml");
    std::fs::write(
        &config_file,
        format!(r#"database_path = "{}""#, db_file.display()),
    )
    .unwrap();
    config_file
}

fn sked(config: &PathBuf, args: &[&str]) -> Output {
    Command::new(sked_binary())
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run sked")
}

/// Run a command expected to succeed and return its trimmed stdout.
fn sked_ok(config: &PathBuf, args: &[&str]) -> String {
    let output = sked(config, args);
    assert!(
        output.status.success(),
        "sked {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_double_booking_flow() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    let room = sked_ok(
        &config,
        &["resource", "add", "--name", "Room A", "--type", "room"],
    );
    let morning = sked_ok(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Morning",
            "--start",
            "2025-03-01T09:00",
            "--end",
            "2025-03-01T12:00",
        ],
    );
    let overlap = sked_ok(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Overlap",
            "--start",
            "2025-03-01T11:00",
            "--end",
            "2025-03-01T13:00",
        ],
    );
    let afternoon = sked_ok(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Afternoon",
            "--start",
            "2025-03-01T12:00",
            "--end",
            "2025-03-01T14:00",
        ],
    );

    // First booking succeeds.
    sked_ok(
        &config,
        &["allocate", "--event", &morning, "--resource", &room],
    );

    // Overlapping booking is rejected and names the blocking event.
    let output = sked(
        &config,
        &["allocate", "--event", &overlap, "--resource", &room],
    );
    assert!(
        !output.status.success(),
        "overlapping allocation should fail"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Morning"),
        "rejection should name the blocking event: {stdout}"
    );

    // Back-to-back booking (12:00 start against a 12:00 end) is legal.
    sked_ok(
        &config,
        &["allocate", "--event", &afternoon, "--resource", &room],
    );

    // The rejected allocation left nothing behind: no conflicts exist.
    let conflicts = sked_ok(&config, &["conflicts"]);
    assert_eq!(conflicts, "No conflicts found.");

    // Utilization counts both accepted bookings.
    let report = sked_ok(
        &config,
        &[
            "report",
            "--resource",
            &room,
            "--start",
            "2025-03-01",
            "--end",
            "2025-03-02",
        ],
    );
    assert!(
        report.contains("Total: 5.0 hours booked"),
        "report should sum to 5 hours: {report}"
    );
}

#[test]
fn test_invalid_event_window_rejected() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    // End before start
    let output = sked(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Backwards",
            "--start",
            "2025-03-01T12:00",
            "--end",
            "2025-03-01T09:00",
        ],
    );
    assert!(!output.status.success(), "inverted window should fail");

    // Zero duration
    let output = sked(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Instant",
            "--start",
            "2025-03-01T09:00",
            "--end",
            "2025-03-01T09:00",
        ],
    );
    assert!(!output.status.success(), "zero-duration window should fail");

    let list = sked_ok(&config, &["event", "list"]);
    assert_eq!(list, "No events scheduled.");
}

#[test]
fn test_edit_rechecks_allocated_resources() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    let room = sked_ok(
        &config,
        &["resource", "add", "--name", "Room A", "--type", "room"],
    );
    let morning = sked_ok(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Morning",
            "--start",
            "2025-03-01T09:00",
            "--end",
            "2025-03-01T12:00",
        ],
    );
    let afternoon = sked_ok(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Afternoon",
            "--start",
            "2025-03-01T12:00",
            "--end",
            "2025-03-01T14:00",
        ],
    );
    sked_ok(
        &config,
        &["allocate", "--event", &morning, "--resource", &room],
    );
    sked_ok(
        &config,
        &["allocate", "--event", &afternoon, "--resource", &room],
    );

    // Stretching Morning into the afternoon booking must be refused.
    let output = sked(
        &config,
        &["event", "edit", &morning, "--end", "2025-03-01T13:00"],
    );
    assert!(
        !output.status.success(),
        "edit creating a double-booking should fail"
    );

    // Shrinking it is fine.
    sked_ok(
        &config,
        &["event", "edit", &morning, "--end", "2025-03-01T11:00"],
    );

    let conflicts = sked_ok(&config, &["conflicts"]);
    assert_eq!(conflicts, "No conflicts found.");
}

#[test]
fn test_deallocate_then_rebook() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    let room = sked_ok(
        &config,
        &["resource", "add", "--name", "Room A", "--type", "room"],
    );
    let morning = sked_ok(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Morning",
            "--start",
            "2025-03-01T09:00",
            "--end",
            "2025-03-01T12:00",
        ],
    );
    let overlap = sked_ok(
        &config,
        &[
            "event",
            "add",
            "--title",
            "Overlap",
            "--start",
            "2025-03-01T11:00",
            "--end",
            "2025-03-01T13:00",
        ],
    );

    let allocation_line = sked_ok(
        &config,
        &["allocate", "--event", &morning, "--resource", &room],
    );
    // The allocation ID is printed in parentheses at the end of the line.
    let allocation = allocation_line
        .rsplit('(')
        .next()
        .unwrap()
        .trim_end_matches(')')
        .to_string();

    // Freeing the slot makes the previously conflicting booking legal.
    sked_ok(&config, &["deallocate", &allocation]);
    sked_ok(
        &config,
        &["allocate", "--event", &overlap, "--resource", &room],
    );

    let status = sked_ok(&config, &["status"]);
    assert!(status.contains("Allocations: 1"), "status: {status}");
    assert!(status.contains("Conflicts:   0"), "status: {status}");
}

#[test]
fn test_status_json_and_unknown_ids() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    let room = sked_ok(
        &config,
        &["resource", "add", "--name", "Room A", "--type", "room"],
    );

    // JSON listing parses and carries the type string.
    let json = sked_ok(&config, &["resource", "list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["type"], "room");
    assert_eq!(parsed[0]["id"], room);

    // Unknown event ID fails with a not-found error.
    let output = sked(
        &config,
        &["allocate", "--event", "no-such-event", "--resource", &room],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}
