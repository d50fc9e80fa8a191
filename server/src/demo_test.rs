use axum::body::{Body, to_bytes};
use axum::http::Request as HttpRequest;
use tower::ServiceExt;

use super::*;

async fn call(request: HttpRequest<Body>) -> (StatusCode, serde_json::Value) {
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn authed_get(path: &str) -> HttpRequest<Body> {
    HttpRequest::get(path)
        .header(header::AUTHORIZATION, format!("Bearer {DEMO_TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

fn json_post(path: &str, body: &serde_json::Value, token: bool) -> HttpRequest<Body> {
    let mut builder = HttpRequest::post(path).header(header::CONTENT_TYPE, "application/json");
    if token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {DEMO_TOKEN}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================
// Auth
// =============================================================

#[tokio::test]
async fn login_returns_token_and_user() {
    let body = serde_json::json!({ "username": "Alice", "password": "anything" });
    let (status, json) = call(json_post("/api/auth/login", &body, false)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["token"], DEMO_TOKEN);
    assert_eq!(json["user"]["firstName"], "Alice");
}

#[tokio::test]
async fn login_rejects_unknown_user_and_empty_password() {
    let unknown = serde_json::json!({ "username": "mallory", "password": "x" });
    let (status, json) = call(json_post("/api/auth/login", &unknown, false)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "invalid username or password");

    let empty = serde_json::json!({ "username": "alice", "password": "" });
    let (status, _) = call(json_post("/api/auth/login", &empty, false)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn collections_require_a_bearer_token() {
    let request = HttpRequest::get("/api/users").body(Body::empty()).unwrap();
    let (status, json) = call(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "missing bearer token");
}

// =============================================================
// Fixtures
// =============================================================

#[tokio::test]
async fn collection_gets_serve_fixtures() {
    let (status, json) = call(authed_get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), mock::users().len());

    let (_, json) = call(authed_get("/api/permissions/categories")).await;
    assert_eq!(json.as_array().unwrap().len(), mock::categories().len());

    let (_, json) = call(authed_get("/api/resources")).await;
    assert_eq!(json[0]["type"], mock::resources()[0].kind);
}

#[tokio::test]
async fn audit_timestamps_are_shifted_to_now() {
    let (_, json) = call(authed_get("/api/audit-logs")).await;
    let logs: Vec<iam::AuditLog> = serde_json::from_value(json).unwrap();
    let newest = logs.iter().map(|l| l.timestamp).max().unwrap();
    assert!(Utc::now() - newest < TimeDelta::days(2));
}

#[tokio::test]
async fn role_conflicts_match_local_detection() {
    let (status, json) = call(authed_get("/api/roles/conflicts")).await;
    assert_eq!(status, StatusCode::OK);
    let expected = detect_role_conflicts(&mock::roles(), &mock::users(), &mock::permissions(), &default_sod_rules());
    assert_eq!(json.as_array().unwrap().len(), expected.len());
}

#[tokio::test]
async fn policy_test_evaluates_against_fixtures() {
    let body = serde_json::json!({
        "subject": { "department": "Finance" },
        "resource": { "path": "documents/finance/q3.pdf" },
        "action": "read",
        "environment": {}
    });
    let (status, json) = call(json_post("/api/policies/test", &body, true)).await;
    assert_eq!(status, StatusCode::OK);
    let result: iam::evaluate::PolicyTestResult = serde_json::from_value(json).unwrap();
    let request: PolicyTestRequest = serde_json::from_value(body).unwrap();
    assert_eq!(result, evaluate(&mock::policies(), &request));
}

#[tokio::test]
async fn writes_are_read_only() {
    let body = serde_json::json!({ "name": "Ops" });
    let (status, json) = call(json_post("/api/roles", &body, true)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "demo mode is read-only");

    let request = HttpRequest::delete("/api/users/u-alice")
        .header(header::AUTHORIZATION, format!("Bearer {DEMO_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(request).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_get_is_not_found() {
    let (status, json) = call(authed_get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not found");
}

// =============================================================
// CSV
// =============================================================

#[test]
fn csv_fields_are_quoted_only_when_needed() {
    assert_eq!(csv_field("plain"), "plain");
    assert_eq!(csv_field("a,b"), "\"a,b\"");
    assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
}

#[test]
fn users_csv_has_header_and_one_line_per_user() {
    let users = mock::users();
    let csv = users_csv(&users);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), users.len() + 1);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[2].starts_with("u-bob,bob,bob@acme.example,Bob,Martin,active,role-helpdesk;role-access-manager,IT,false,"));
}

#[tokio::test]
async fn export_serves_csv() {
    let response = router().oneshot(authed_get("/api/users/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
}
