// Unit tests for logger module initialization logic
// Tests focus on idempotence, level parsing and error handling

use crate::logger::{initialize, initialize_internal, parse_level};

use std::path::PathBuf;

use log::LevelFilter;
use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Tests and the runner may both initialize logging. A second
/// call must not crash the launcher before it writes its result file.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A writable directory
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("solr-launcher.log");

    // WHEN: Calling initialize twice
    let first = initialize(&log_path);
    let second = initialize(&log_path);

    // THEN: Both return Ok
    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should be a no-op");
}

/// **VALUE**: An unwritable log location is an error, not a panic.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` being unwrapped.
#[test]
fn given_unwritable_log_path_when_initialized_then_returns_logger_error() {
    // GIVEN: A path under a file, which can never be a directory
    let invalid = PathBuf::from("/dev/null/invalid-path/solr-launcher.log");

    // WHEN: Initializing directly, bypassing the global guard
    let result = initialize_internal(&invalid, LevelFilter::Info);

    // THEN: Logger error
    let error = result.unwrap_err();
    assert!(format!("{error:?}").contains("Logger"));
}

#[test]
fn given_level_names_in_any_case_when_parsed_then_recognized() {
    assert_eq!(parse_level(Some("debug")), Some(LevelFilter::Debug));
    assert_eq!(parse_level(Some("WARN")), Some(LevelFilter::Warn));
    assert_eq!(parse_level(Some(" Trace ")), Some(LevelFilter::Trace));
    assert_eq!(parse_level(Some("off")), Some(LevelFilter::Off));
}

#[test]
fn given_missing_or_unknown_level_when_parsed_then_none() {
    assert_eq!(parse_level(None), None);
    assert_eq!(parse_level(Some("")), None);
    assert_eq!(parse_level(Some("verbose")), None);
}
