use super::*;

// =============================================================
// Paths
// =============================================================

#[test]
fn item_path_appends_encoded_id() {
    assert_eq!(item_path(USERS, "u-1"), "/api/users/u-1");
    assert_eq!(item_path(ROLES, "a b/c"), "/api/roles/a%20b%2Fc");
    assert_eq!(item_path(POLICIES, "pol.v2~x"), "/api/policies/pol.v2~x");
}

#[test]
fn action_paths_match_backend_routes() {
    assert_eq!(
        action_path(ROLE_CONFLICTS, "dup-1", "resolve"),
        "/api/roles/conflicts/dup-1/resolve"
    );
    assert_eq!(
        action_path(OPTIMIZATIONS, "opt-9", "apply"),
        "/api/permissions/optimizations/opt-9/apply"
    );
    assert_eq!(action_path(NOTIFICATIONS, "n-1", "read"), "/api/notifications/n-1/read");
    assert_eq!(item_path(CATEGORIES, "cat-users"), "/api/permissions/categories/cat-users");
}

#[test]
fn encode_segment_handles_multibyte() {
    assert_eq!(encode_segment("é"), "%C3%A9");
    assert_eq!(encode_segment(""), "");
}

#[test]
fn encode_segment_escapes_reserved_characters() {
    assert_eq!(encode_segment("a?b#c%d"), "a%3Fb%23c%25d");
    assert_eq!(item_path(RESOURCES, "db:prod+1"), "/api/resources/db%3Aprod%2B1");
}

#[test]
fn bearer_header_trims_token() {
    assert_eq!(bearer(" abc.def \n"), "Bearer abc.def");
}

#[test]
fn verb_names() {
    assert_eq!(Verb::Get.as_str(), "GET");
    assert_eq!(Verb::Delete.as_str(), "DELETE");
}

// =============================================================
// Bodies
// =============================================================

#[test]
fn empty_body_decodes_as_null() {
    assert_eq!(decode_body::<()>(""), Ok(()));
    assert_eq!(decode_body::<Option<User>>("  "), Ok(None));
    assert!(decode_body::<IgnoredAny>(r#"{"ok":true}"#).is_ok());
}

#[test]
fn malformed_body_is_decode_error() {
    let err = decode_body::<Vec<User>>("<html>").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn login_response_reads_camel_case_user() {
    let body = r#"{
        "token": "t-1",
        "user": {
            "id": "u-1", "username": "alice", "email": "alice@acme.example",
            "firstName": "Alice", "lastName": "Nguyen", "status": "active",
            "roles": ["role-admin"], "mfaEnabled": true,
            "createdAt": "2024-01-01T00:00:00Z"
        }
    }"#;
    let resp = decode_body::<LoginResponse>(body).unwrap();
    assert_eq!(resp.token, "t-1");
    assert_eq!(resp.user.first_name, "Alice");
    assert!(resp.user.has_role("role-admin"));
}

// =============================================================
// SSR stubs
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn calls_are_unavailable_outside_the_browser() {
    use futures::executor::block_on;

    assert_eq!(block_on(fetch_users()), Err(ApiError::Unavailable));
    assert_eq!(block_on(delete_role("r-1")), Err(ApiError::Unavailable));
    assert_eq!(block_on(export_users_csv()), Err(ApiError::Unavailable));
    assert_eq!(block_on(mark_all_notifications_read()), Err(ApiError::Unavailable));
}
