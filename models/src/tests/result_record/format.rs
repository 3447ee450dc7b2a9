// Unit tests for the on-disk result record format
// External supervisors parse these lines, so the exact text matters

use crate::{ResultRecord, ResultRecordBuilder};

/// **VALUE**: Locks down the exact three-line wire format.
///
/// **WHY THIS MATTERS**: Supervisors poll this file and match on `Success=True`,
/// `Port=<n>` and `Message=`. Any drift in casing or key names breaks them silently.
#[test]
fn given_success_record_when_displayed_then_writes_three_lines() {
    // GIVEN: A success record
    let record = ResultRecordBuilder::default()
        .with_success(true)
        .with_port(8983)
        .with_message("Server is started at port: 8983")
        .build()
        .expect("valid record");

    // WHEN: Rendering it
    let text = record.to_string();

    // THEN: Exactly the expected lines
    assert_eq!(
        text,
        "Success=True\nPort=8983\nMessage=Server is started at port: 8983"
    );
}

#[test]
fn given_failure_without_port_when_displayed_then_port_is_unknown() {
    let record = ResultRecordBuilder::default()
        .with_success(false)
        .with_message("No arguments.")
        .build()
        .expect("valid record");

    assert_eq!(
        record.to_string(),
        "Success=False\nPort=Unknown\nMessage=No arguments."
    );
}

/// **VALUE**: A message containing `=` survives parsing.
///
/// **BUG THIS CATCHES**: Splitting on every `=` instead of the first would truncate
/// messages such as URLs with query strings.
#[test]
fn given_message_with_equals_when_parsed_then_keeps_full_message() {
    // GIVEN: A record whose message contains '='
    let text = "Success=False\nPort=Unknown\nMessage=token=abc rejected";

    // WHEN: Parsing
    let record: ResultRecord = text.parse().expect("parsable record");

    // THEN: Message is intact
    assert!(!record.success);
    assert_eq!(record.port, None);
    assert_eq!(record.message, "token=abc rejected");
}

#[test]
fn given_record_missing_port_line_when_parsed_then_fails() {
    let result = "Success=True\nMessage=hello".parse::<ResultRecord>();

    assert!(result.is_err());
}

#[test]
fn given_invalid_success_value_when_parsed_then_fails() {
    let result = "Success=Maybe\nPort=1\nMessage=hello".parse::<ResultRecord>();

    assert!(result.is_err());
}
