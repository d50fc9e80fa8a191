use iam::evaluate::Decision;
use iam::mock;

use super::*;

#[test]
fn default_form_builds_a_request() {
    let request = PolicyTestForm::default().to_request().unwrap();
    assert_eq!(request.action, "read");
    assert_eq!(request.resource["path"], "documents/finance/q3.pdf");
    assert_eq!(request.subject["department"], "engineering");
}

#[test]
fn blank_environment_is_an_empty_object() {
    let form = PolicyTestForm {
        environment: "  ".to_owned(),
        ..PolicyTestForm::default()
    };
    let request = form.to_request().unwrap();
    assert_eq!(request.environment, serde_json::json!({}));
}

#[test]
fn malformed_json_and_missing_action_are_field_errors() {
    let form = PolicyTestForm {
        subject: "[1, 2]".to_owned(),
        resource: "{ nope".to_owned(),
        action: " ".to_owned(),
        environment: String::new(),
    };
    let errors = form.to_request().unwrap_err();
    assert_eq!(errors.get("subject"), Some("Subject must be a JSON object"));
    assert_eq!(errors.get("resource"), Some("Resource must be a JSON object"));
    assert_eq!(errors.get("action"), Some("Action is required"));
    assert!(!errors.has("environment"));
}

#[test]
fn start_blocks_while_running() {
    let mut state = PolicyTestState::default();
    assert!(state.start().is_some());
    assert!(state.running);
    assert!(state.start().is_none());
}

#[test]
fn backend_failure_falls_back_to_local_evaluation() {
    let mut state = PolicyTestState::default();
    state.form.resource = "documents/archive/old.pdf".to_owned();
    state.form.action = "delete".to_owned();
    let request = state.start().unwrap();

    state.finish(&request, Err(ApiError::Unavailable), &mock::policies());
    assert!(!state.running);
    assert!(state.local);
    let result = state.result.as_ref().unwrap();
    assert_eq!(result.decision, Decision::Deny);
    assert_eq!(result.determining_policy.as_deref(), Some("pol-no-delete"));
}

#[test]
fn unauthorized_is_reported_without_evaluating() {
    let mut state = PolicyTestState::default();
    let request = state.start().unwrap();
    state.finish(&request, Err(ApiError::Unauthorized), &mock::policies());
    assert!(state.result.is_none());
    assert_eq!(state.error.as_deref(), Some("session expired, sign in again"));
}

#[test]
fn unauthorized_clears_previous_local_result() {
    let mut state = PolicyTestState::default();
    let request = state.start().unwrap();
    state.finish(&request, Err(ApiError::Unavailable), &mock::policies());
    assert!(state.result.is_some());
    assert!(state.local);

    let request = state.start().unwrap();
    state.finish(&request, Err(ApiError::Unauthorized), &mock::policies());
    assert!(state.result.is_none());
    assert!(!state.local);
    assert!(state.error.is_some());
}
