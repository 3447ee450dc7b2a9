use crate::HttpStatusCode;

#[test]
fn given_2xx_codes_when_checked_then_are_success() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(301).is_success());
    assert!(!HttpStatusCode(401).is_success());
}

/// **VALUE**: Distinguishes "wrong token" from other server failures.
///
/// **WHY THIS MATTERS**: A 401 from the shutdown endpoint means a live server refused our
/// secret, which calls for a different operator action than a 500.
#[test]
fn given_auth_codes_when_checked_then_flagged_as_auth_failure() {
    assert!(HttpStatusCode(401).is_auth_failure());
    assert!(HttpStatusCode(403).is_auth_failure());
    assert!(!HttpStatusCode(404).is_auth_failure());
    assert!(!HttpStatusCode(500).is_auth_failure());
}

#[test]
fn given_u16_when_converted_then_displays_numeric_code() {
    let status = HttpStatusCode::from(503);
    assert_eq!(status.to_string(), "503");
}
