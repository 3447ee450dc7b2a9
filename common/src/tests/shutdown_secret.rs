// Unit tests for the shutdown secret
// Covers redaction, comparison and generation

use crate::ShutdownSecret;

/// **VALUE**: The secret never appears in Debug or Display output.
///
/// **WHY THIS MATTERS**: Anyone holding the token can stop the server. Launcher logs are
/// written next to the executable and may be shared in bug reports.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Debug)]` replacing the manual impl.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    // GIVEN: A secret with a recognizable value
    let secret = ShutdownSecret::new("hunter2-token");

    // WHEN: Formatting it both ways
    let debug = format!("{secret:?}");
    let display = format!("{secret}");

    // THEN: Neither output contains the value
    assert!(!debug.contains("hunter2"));
    assert!(!display.contains("hunter2"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn given_secret_when_serialized_then_fails() {
    let secret = ShutdownSecret::new("hunter2-token");

    let result = serde_json::to_string(&secret);

    let error = result.expect_err("secret must refuse serialization");
    let message = error.to_string();
    assert!(message.contains("Secret Serialization Refused"), "{message}");
    assert!(!message.contains("hunter2"), "{message}");
}

/// **VALUE**: Token comparison accepts only the exact value.
///
/// **BUG THIS CATCHES**: Prefix matches, empty tokens or case folding would let a
/// local process stop the server without knowing the secret.
#[test]
fn given_secret_when_matching_candidates_then_only_exact_value_matches() {
    let secret = ShutdownSecret::new("abc123");

    assert!(secret.matches("abc123"));
    assert!(!secret.matches("abc12"));
    assert!(!secret.matches("abc1234"));
    assert!(!secret.matches("ABC123"));
    assert!(!secret.matches(""));
}

#[test]
fn given_empty_secret_when_matching_empty_candidate_then_rejects() {
    // An unset secret must not turn into "no authentication".
    let secret = ShutdownSecret::new("");

    assert!(secret.is_empty());
    assert!(!secret.matches(""));
}

#[test]
fn given_two_generated_secrets_when_compared_then_differ() {
    let first = ShutdownSecret::generate();
    let second = ShutdownSecret::generate();

    assert!(!first.is_empty());
    assert_ne!(first.as_str(), second.as_str());
}
