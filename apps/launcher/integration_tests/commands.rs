use crate::helpers::{
    free_port, installation_with_resources, read_result, run_launcher, spawn_launcher,
    wait_for_exit, wait_for_result,
};

use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

// ============================================================================
// End-to-end tests of the solr-launcher binary
// Each test points the binary at its own temp installation
// ============================================================================

/// **VALUE**: No command at all is a reported ArgumentError with a failing exit code.
#[test]
fn given_no_arguments_when_run_then_exit_1_and_argument_error_reported() {
    // GIVEN: An empty installation
    let dir = TempDir::new().unwrap();

    // WHEN: Running without arguments
    let output = run_launcher(dir.path(), &[]);

    // THEN: Exit 1 and the fixed message
    assert_eq!(output.status.code(), Some(1));
    let record = read_result(dir.path());
    assert!(!record.success);
    assert_eq!(record.message, "No arguments.");
}

/// **VALUE**: An invalid port fails before the lock is ever created.
///
/// **BUG THIS CATCHES**: Would catch argument validation moving after lock acquisition,
/// which would leave a lock file behind for a start that never happened.
#[test]
fn given_invalid_port_when_started_then_exit_1_and_no_lock_file() {
    // GIVEN: A complete installation
    let dir = installation_with_resources();

    // WHEN: Starting with a non-numeric port
    let output = run_launcher(dir.path(), &["start", "eighty"]);

    // THEN: Exit 1, argument message, no lock file
    assert_eq!(output.status.code(), Some(1));
    let record = read_result(dir.path());
    assert_eq!(record.message, "Parameter port eighty is not a valid number.");
    assert!(!dir.path().join("app.lock").exists());
}

#[test]
fn given_missing_resources_when_started_then_exit_1_and_no_lock_file() {
    let dir = TempDir::new().unwrap();

    let output = run_launcher(dir.path(), &["start", "8080"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(read_result(dir.path()).message.contains("solr-home"));
    assert!(!dir.path().join("app.lock").exists());
}

#[test]
fn given_help_flag_when_run_then_exit_0_without_result_file() {
    let dir = TempDir::new().unwrap();

    let output = run_launcher(dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("shutdown"));
    assert!(!dir.path().join("result").exists());
}

#[test]
fn given_shutdown_without_recorded_port_when_run_then_exit_1() {
    let dir = TempDir::new().unwrap();

    let output = run_launcher(dir.path(), &["SHUTDOWN"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        read_result(dir.path()).message,
        "Can't read port from properties file."
    );
}

/// **VALUE**: Shutdown is idempotent at the process level.
#[test]
#[serial]
fn given_recorded_port_with_no_server_when_shutdown_then_exit_0() {
    // GIVEN: A recorded port nobody listens on
    let dir = TempDir::new().unwrap();
    let port = free_port();
    std::fs::write(dir.path().join("config.properties"), format!("port={port}\n")).unwrap();

    // WHEN: Running shutdown
    let output = run_launcher(dir.path(), &["shutdown"]);

    // THEN: Success with the idempotent message
    assert_eq!(output.status.code(), Some(0));
    let record = read_result(dir.path());
    assert!(record.success);
    assert_eq!(record.message, "Server is already not running.");
}

/// **VALUE**: A started process stays resident, refuses a second start and exits 0
/// after `shutdown`.
///
/// **WHY THIS MATTERS**: This is exactly how supervisors drive the launcher: spawn
/// `start`, poll `result`, later run `shutdown` and wait for the first process to exit.
///
/// **BUG THIS CATCHES**: Would catch the lock not being released on exit, the token
/// not being shared between the two processes, or `start` returning immediately.
#[test]
#[serial]
fn given_started_server_when_shutdown_from_another_process_then_both_exit_0() {
    // GIVEN: A complete installation and a free port
    let dir = installation_with_resources();
    let port = free_port();
    let port_arg = port.to_string();

    // WHEN: Starting in the background
    let mut server = spawn_launcher(dir.path(), &["start", &port_arg]);
    let started = wait_for_result(dir.path(), Duration::from_secs(30));

    // THEN: The start is reported and the process keeps running
    let record = started.expect("start should report within the timeout");
    assert!(record.success, "start failed: {}", record.message);
    assert_eq!(record.port, Some(port));
    assert!(matches!(server.try_wait(), Ok(None)), "start must stay resident");
    assert!(dir.path().join("app.lock").exists());

    // WHEN: Starting a second time
    let second = run_launcher(dir.path(), &["start"]);

    // THEN: Already running, success
    assert_eq!(second.status.code(), Some(0));
    assert_eq!(read_result(dir.path()).message, "Application is already running");

    // WHEN: Shutting down from a third process
    let shutdown = run_launcher(dir.path(), &["shutdown"]);

    // THEN: Shutdown reported, the server process exits 0 and removes the lock
    assert_eq!(shutdown.status.code(), Some(0));
    assert_eq!(
        read_result(dir.path()).message,
        format!("Server ({port}) is shutdown")
    );
    assert_eq!(wait_for_exit(&mut server, Duration::from_secs(30)), Some(0));
    assert!(!dir.path().join("app.lock").exists());
    assert!(dir.path().join("solr-launcher.log").exists());
}
