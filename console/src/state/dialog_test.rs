use std::cell::Cell;

use iam::UserStatus;
use iam::validate::{RoleForm, UserForm};

use super::*;

fn filled_user_form(password: &str) -> UserForm {
    UserForm {
        username: "jdoe".to_owned(),
        email: "jdoe@example.com".to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
        password: password.to_owned(),
        confirm_password: password.to_owned(),
        roles: vec!["role-viewer".to_owned()],
        department: String::new(),
        status: UserStatus::Active,
        mfa_enabled: false,
    }
}

/// Mirrors the users page: only a returned form reaches the create call.
fn submit_user(dialog: &mut DialogState<UserForm>, create_calls: &Cell<u32>) {
    if let Some(_form) = dialog.submit(UserForm::validate) {
        create_calls.set(create_calls.get() + 1);
    }
}

#[test]
fn short_password_blocks_create_callback() {
    let mut dialog = DialogState::<UserForm>::default();
    dialog.open_create();
    dialog.edit(|f| *f = filled_user_form("1234567"));

    let calls = Cell::new(0);
    submit_user(&mut dialog, &calls);

    assert_eq!(calls.get(), 0);
    assert_eq!(
        dialog.error("password").as_deref(),
        Some("Password must be at least 8 characters")
    );
    assert!(!dialog.submitting);
    assert!(dialog.open);
}

#[test]
fn whitespace_password_blocks_create_callback() {
    let mut dialog = DialogState::<UserForm>::default();
    dialog.open_create();
    dialog.edit(|f| *f = filled_user_form("          "));

    let calls = Cell::new(0);
    submit_user(&mut dialog, &calls);

    assert_eq!(calls.get(), 0);
    assert_eq!(dialog.error("password").as_deref(), Some("Password is required"));
    assert!(!dialog.submitting);
}

#[test]
fn valid_form_is_returned_once_until_finished() {
    let mut dialog = DialogState::<UserForm>::default();
    dialog.open_create();
    dialog.edit(|f| *f = filled_user_form("12345678"));

    let calls = Cell::new(0);
    submit_user(&mut dialog, &calls);
    submit_user(&mut dialog, &calls);
    assert_eq!(calls.get(), 1);
    assert!(dialog.submitting);
    assert!(dialog.errors.is_empty());

    dialog.finish(Ok(()));
    assert!(!dialog.open);
    assert!(!dialog.submitting);
}

#[test]
fn fixing_the_form_clears_previous_errors() {
    let mut dialog = DialogState::<UserForm>::default();
    dialog.open_create();
    dialog.edit(|f| *f = filled_user_form("short"));
    assert!(dialog.submit(UserForm::validate).is_none());
    assert!(!dialog.errors.is_empty());

    dialog.edit(|f| {
        f.password = "long enough".to_owned();
        f.confirm_password = "long enough".to_owned();
    });
    assert!(dialog.submit(UserForm::validate).is_some());
    assert!(dialog.errors.is_empty());
}

#[test]
fn server_failure_keeps_dialog_open() {
    let mut dialog = DialogState::<RoleForm>::default();
    dialog.open_edit(
        "role-1",
        RoleForm {
            name: "Ops".to_owned(),
            description: "Operations".to_owned(),
            permissions: vec!["p1".to_owned()],
        },
    );
    assert_eq!(dialog.mode.edit_id(), Some("role-1"));
    assert_eq!(dialog.title("role"), "Edit role");

    assert!(dialog.submit(|f, _| f.validate()).is_some());
    dialog.finish(Err(ApiError::from_status(409, r#"{"error":"name taken"}"#)));
    assert!(dialog.open);
    assert!(!dialog.submitting);
    assert_eq!(dialog.server_error.as_deref(), Some("request failed (409): name taken"));
}

#[test]
fn reopening_resets_state() {
    let mut dialog = DialogState::<RoleForm>::default();
    dialog.open_create();
    assert!(dialog.submit(|f, _| f.validate()).is_none());
    assert!(!dialog.errors.is_empty());

    dialog.close();
    dialog.open_create();
    assert!(dialog.errors.is_empty());
    assert_eq!(dialog.form, RoleForm::default());
    assert_eq!(dialog.title("role"), "Create role");
}
