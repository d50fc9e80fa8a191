use super::*;

#[test]
fn both_fields_are_required() {
    assert_eq!(credentials_error("", ""), Some("Enter your username and password."));
    assert_eq!(credentials_error("  ", "secret"), Some("Enter your username."));
    assert_eq!(credentials_error("alice", ""), Some("Enter your password."));
}

#[test]
fn filled_credentials_pass() {
    assert_eq!(credentials_error("alice", "correct horse"), None);
}

#[test]
fn whitespace_password_is_accepted_as_typed() {
    assert_eq!(credentials_error("alice", " "), None);
}

#[test]
fn rejected_credentials_are_not_reported_as_expiry() {
    assert_eq!(sign_in_error(&ApiError::Unauthorized), "Sign-in failed: invalid username or password.");
    assert_eq!(
        sign_in_error(&ApiError::Network("connection refused".to_owned())),
        "Sign-in failed: network error: connection refused"
    );
}
