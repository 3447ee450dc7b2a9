// Unit tests for argument parsing
// The result file carries these messages, so their wording matters

use crate::cli::{Command, Invocation, NO_ARGUMENTS_MESSAGE, parse_args};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|arg| arg.to_string()).collect()
}

fn command(list: &[&str]) -> Command {
    match parse_args(args(list)) {
        Invocation::Run(command) => command,
        other => panic!("expected a command for {list:?}, got {other:?}"),
    }
}

/// **VALUE**: Running without a command is an ArgumentError with the fixed message.
#[test]
fn given_program_name_only_when_parsed_then_no_arguments_error() {
    // GIVEN: Only the program name
    // WHEN: Parsing
    let invocation = parse_args(args(&["solr-launcher"]));

    // THEN: Invalid with the fixed message
    match invocation {
        Invocation::Invalid(error) => {
            assert_eq!(error.kind(), "ArgumentError");
            assert_eq!(error.summary(), NO_ARGUMENTS_MESSAGE);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

/// **VALUE**: The command word is case-insensitive.
///
/// **WHY THIS MATTERS**: Existing installers call `START` and `Shutdown`. Rejecting them
/// would break every deployed integration.
#[test]
fn given_mixed_case_commands_when_parsed_then_recognized() {
    assert_eq!(
        command(&["solr-launcher", "SHUTDOWN"]),
        Command::Shutdown { ignored: vec![] }
    );
    assert_eq!(
        command(&["solr-launcher", "Start"]),
        Command::Start {
            port: None,
            mode: None,
            ignored: vec![],
        }
    );
}

/// **VALUE**: Positional port and mode are passed through untouched.
///
/// **BUG THIS CATCHES**: Would catch lowercasing spreading past the command word and
/// turning `dynamicPort` into `dynamicport` before the controller sees it.
#[test]
fn given_start_with_port_and_mode_when_parsed_then_raw_values_are_kept() {
    let parsed = command(&["solr-launcher", "start", "8983", "dynamicPort"]);

    assert_eq!(
        parsed,
        Command::Start {
            port: Some(String::from("8983")),
            mode: Some(String::from("dynamicPort")),
            ignored: vec![],
        }
    );
}

/// **VALUE**: Non-numeric ports reach the controller so it can word the error itself.
#[test]
fn given_non_numeric_or_negative_port_when_parsed_then_left_for_validation() {
    for raw in ["abc", "-1"] {
        let parsed = command(&["solr-launcher", "start", raw]);

        assert_eq!(
            parsed,
            Command::Start {
                port: Some(raw.to_string()),
                mode: None,
                ignored: vec![],
            }
        );
    }
}

#[test]
fn given_unknown_command_when_parsed_then_argument_error() {
    let invocation = parse_args(args(&["solr-launcher", "restart"]));

    match invocation {
        Invocation::Invalid(error) => {
            assert_eq!(error.kind(), "ArgumentError");
            assert!(error.summary().contains("restart"), "{}", error.summary());
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

/// **VALUE**: Arguments past the ones a command uses are ignored, not rejected.
///
/// **WHY THIS MATTERS**: Wrapper scripts append their own flags. Failing on them would
/// stop servers from starting after an unrelated script change.
#[test]
fn given_trailing_extra_arguments_when_parsed_then_they_are_ignored() {
    let parsed = command(&["solr-launcher", "start", "8080", "dynamicPort", "x", "-v"]);
    assert_eq!(
        parsed,
        Command::Start {
            port: Some(String::from("8080")),
            mode: Some(String::from("dynamicPort")),
            ignored: vec![String::from("x"), String::from("-v")],
        }
    );

    let parsed = command(&["solr-launcher", "shutdown", "now"]);
    assert_eq!(
        parsed,
        Command::Shutdown {
            ignored: vec![String::from("now")],
        }
    );
}

#[test]
fn given_help_or_version_flag_when_parsed_then_informational() {
    for flag in ["--help", "-h", "--version", "-V"] {
        let invocation = parse_args(args(&["solr-launcher", flag]));

        assert!(
            matches!(invocation, Invocation::Informational(_)),
            "{flag} should be informational"
        );
    }
}
