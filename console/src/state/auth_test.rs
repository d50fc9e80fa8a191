use iam::mock;

use super::*;

fn login_as_alice() -> LoginResponse {
    LoginResponse {
        token: "t-1".to_owned(),
        user: mock::users().remove(0),
    }
}

#[test]
fn default_is_loading_and_does_not_redirect() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.is_authenticated());
    assert!(!state.should_redirect_unauth());
}

#[test]
fn restore_without_token_redirects() {
    let mut state = AuthState::default();
    state.restore(None);
    assert!(state.should_redirect_unauth());
}

#[test]
fn restore_with_token_authenticates_without_user() {
    let mut state = AuthState::default();
    state.restore(Some("stored".to_owned()));
    assert!(state.is_authenticated());
    assert!(!state.should_redirect_unauth());
    assert_eq!(state.display_name(), "Administrator");
}

#[test]
fn sign_in_then_out() {
    let mut state = AuthState::default();
    state.sign_in(login_as_alice());
    assert!(state.is_authenticated());
    assert_eq!(state.token.as_deref(), Some("t-1"));
    assert_eq!(state.display_name(), "Alice Nguyen");

    state.sign_out();
    assert!(state.user.is_none());
    assert!(state.should_redirect_unauth());
}
