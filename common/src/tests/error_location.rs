use crate::ErrorLocation;

use std::panic::Location;

#[track_caller]
fn capture() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

/// **VALUE**: Locations point at the caller of a `#[track_caller]` constructor.
///
/// **BUG THIS CATCHES**: Every launcher error is built through a tracked helper. If the
/// attribute chain breaks, every result would point into the helper instead of the failing step.
#[test]
fn given_track_caller_helper_when_capturing_then_reports_call_site() {
    // GIVEN / WHEN: Capturing through a tracked helper
    let line = line!() + 1;
    let location = capture();

    // THEN: File and line are those of this test
    assert!(location.file.ends_with("error_location.rs"));
    assert_eq!(location.line, line);
}

#[test]
fn given_location_when_displayed_then_uses_bracketed_file_line_column() {
    let location = ErrorLocation {
        file: "src/lock.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/lock.rs:42:7]");
}
