use crate::{ModelError, ResultRecordBuilder};

/// **VALUE**: Verifies that builder validation rejects a zero port.
///
/// **WHY THIS MATTERS**: Port 0 means "let the OS pick" and is never a port a supervisor
/// can connect to. Publishing it would send callers to a dead address.
///
/// **BUG THIS CATCHES**: Would catch if the non-zero check is removed during refactoring.
#[test]
fn given_zero_port_when_building_then_returns_validation_error() {
    // GIVEN: Builder with port set to zero
    let builder = ResultRecordBuilder::default()
        .with_success(true)
        .with_port(0)
        .with_message("Server is started at port: 0");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Port must be non-zero");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_missing_success_flag_when_building_then_returns_validation_error() {
    let result = ResultRecordBuilder::default()
        .with_port(8983)
        .with_message("Server is started at port: 8983")
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Success flag is required");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

/// **VALUE**: Verifies that a record without a message cannot be built.
///
/// **WHY THIS MATTERS**: The message is the only human-readable part of the record. A
/// supervisor showing "Success=False" with nothing else leaves the operator guessing.
#[test]
fn given_blank_message_when_building_then_returns_validation_error() {
    // GIVEN: Builder with a whitespace-only message
    let builder = ResultRecordBuilder::default()
        .with_success(false)
        .with_message("  \n  ");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Message cannot be empty");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

/// **VALUE**: Multi-line error text is flattened into one message line.
///
/// **BUG THIS CATCHES**: An error message containing a newline would otherwise push
/// extra lines into the result file and break line-oriented pollers.
#[test]
fn given_multiline_message_when_building_then_flattens_to_single_line() {
    // GIVEN: A message spanning several lines
    let builder = ResultRecordBuilder::default()
        .with_success(false)
        .with_message("bind failed\n  address in use\r\n");

    // WHEN: Building
    let record = builder.build().expect("valid record");

    // THEN: Message is a single line
    assert_eq!(record.message, "bind failed address in use");
    assert_eq!(record.to_string().lines().count(), 3);
}

#[test]
fn given_no_port_when_building_then_port_is_unknown() {
    let record = ResultRecordBuilder::default()
        .with_success(false)
        .with_optional_port(None)
        .with_message("No arguments.")
        .build()
        .expect("valid record");

    assert_eq!(record.port, None);
}
