//! Demo backend answering `/api/*` from the `iam::mock` fixtures.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted instead of the proxy when no `IAM_API_URL` is configured, so the
//! console can be explored without an IAM service behind it.
//!
//! DESIGN
//! ======
//! - Read-only: collection GETs, login and the policy tester answer; every
//!   other write is 503 with a JSON `{ "error": .. }` body.
//! - Every route except login requires a bearer token, any non-empty one.
//! - Fixture timestamps are shifted so the newest record is recent, keeping
//!   the audit time windows meaningful.

#[cfg(test)]
#[path = "demo_test.rs"]
mod demo_test;

use axum::extract::Request;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeDelta, Utc};
use iam::conflicts::{default_sod_rules, detect_role_conflicts};
use iam::evaluate::{PolicyTestRequest, evaluate};
use iam::{Role, Timestamp, User, mock, optimize};
use serde::{Deserialize, Serialize};

/// Token handed out by the demo login.
pub const DEMO_TOKEN: &str = "demo-session-token";

const POLICY_TEST_PATH: &str = "/api/policies/test";

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("missing bearer token")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("demo mode is read-only")]
    ReadOnly,
    #[error("not found")]
    NotFound,
}

impl IntoResponse for DemoError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::ReadOnly => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: &'static str,
    user: User,
}

/// Offset that moves the fixture reference time to now.
fn time_shift() -> TimeDelta {
    Utc::now() - mock::reference_time()
}

fn shifted(ts: Timestamp) -> Timestamp {
    ts + time_shift()
}

/// Demo API routes. Merge into the app router in place of the proxy.
pub fn router() -> Router {
    let protected = Router::new()
        .route("/api/users", get(users))
        .route("/api/users/export", get(users_export))
        .route("/api/roles", get(roles))
        .route("/api/roles/conflicts", get(role_conflicts))
        .route("/api/permissions", get(permissions))
        .route("/api/permissions/categories", get(categories))
        .route("/api/permissions/optimizations", get(optimizations))
        .route("/api/resources", get(resources))
        .route("/api/policies", get(policies))
        .route(POLICY_TEST_PATH, post(policy_test))
        .route("/api/audit-logs", get(audit_logs))
        .route("/api/security/alerts", get(alerts))
        .route("/api/compliance/reports", get(reports))
        .route("/api/notifications", get(notifications))
        .route("/api/{*rest}", axum::routing::any(unknown))
        // `layer` rather than `route_layer` so method mismatches on known
        // paths reach `guard` instead of answering 405.
        .layer(middleware::from_fn(guard));

    Router::new().route("/api/auth/login", post(login)).merge(protected)
}

fn bearer_present(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty())
}

/// Token check, then the read-only rule: only GETs and the policy tester pass.
async fn guard(request: Request, next: Next) -> Result<Response, DemoError> {
    if !bearer_present(request.headers()) {
        return Err(DemoError::Unauthorized);
    }
    if request.method() != Method::GET && request.uri().path() != POLICY_TEST_PATH {
        return Err(DemoError::ReadOnly);
    }
    Ok(next.run(request).await)
}

async fn unknown() -> DemoError {
    DemoError::NotFound
}

async fn login(Json(body): Json<LoginRequest>) -> Result<Json<LoginResponse>, DemoError> {
    let username = body.username.trim().to_lowercase();
    if body.password.is_empty() {
        return Err(DemoError::InvalidCredentials);
    }
    let user = mock::users()
        .into_iter()
        .find(|u| u.username == username)
        .ok_or(DemoError::InvalidCredentials)?;
    tracing::info!(username = %user.username, "demo login");
    Ok(Json(LoginResponse { token: DEMO_TOKEN, user }))
}

// =============================================================================
// COLLECTIONS
// =============================================================================

async fn users() -> Json<Vec<User>> {
    Json(
        mock::users()
            .into_iter()
            .map(|mut u| {
                u.last_login = u.last_login.map(shifted);
                u
            })
            .collect(),
    )
}

async fn roles() -> Json<Vec<Role>> {
    Json(mock::roles())
}

async fn role_conflicts() -> Json<Vec<iam::conflicts::RoleConflict>> {
    Json(detect_role_conflicts(
        &mock::roles(),
        &mock::users(),
        &mock::permissions(),
        &default_sod_rules(),
    ))
}

async fn permissions() -> Json<Vec<iam::Permission>> {
    Json(mock::permissions())
}

async fn categories() -> Json<Vec<iam::PermissionCategory>> {
    Json(mock::categories())
}

async fn optimizations() -> Json<Vec<optimize::Optimization>> {
    Json(optimize::analyze(&mock::roles(), &mock::permissions(), &mock::users()))
}

async fn resources() -> Json<Vec<iam::Resource>> {
    Json(mock::resources())
}

async fn policies() -> Json<Vec<iam::AbacPolicy>> {
    Json(mock::policies())
}

async fn policy_test(Json(request): Json<PolicyTestRequest>) -> Json<iam::evaluate::PolicyTestResult> {
    Json(evaluate(&mock::policies(), &request))
}

async fn audit_logs() -> Json<Vec<iam::AuditLog>> {
    Json(
        mock::audit_logs()
            .into_iter()
            .map(|mut l| {
                l.timestamp = shifted(l.timestamp);
                l
            })
            .collect(),
    )
}

async fn alerts() -> Json<Vec<iam::SecurityAlert>> {
    Json(
        mock::security_alerts()
            .into_iter()
            .map(|mut a| {
                a.created_at = shifted(a.created_at);
                a
            })
            .collect(),
    )
}

async fn reports() -> Json<Vec<iam::ComplianceReport>> {
    Json(
        mock::compliance_reports()
            .into_iter()
            .map(|mut r| {
                r.generated_at = shifted(r.generated_at);
                r
            })
            .collect(),
    )
}

async fn notifications() -> Json<Vec<iam::Notification>> {
    Json(
        mock::notifications()
            .into_iter()
            .map(|mut n| {
                n.created_at = shifted(n.created_at);
                n
            })
            .collect(),
    )
}

// =============================================================================
// CSV EXPORT
// =============================================================================

const CSV_HEADER: &str = "id,username,email,first_name,last_name,status,roles,department,mfa_enabled,last_login";

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// One header line plus one line per user; role ids are joined with `;`.
#[must_use]
pub fn users_csv(users: &[User]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for u in users {
        let fields = [
            u.id.clone(),
            u.username.clone(),
            u.email.clone(),
            u.first_name.clone(),
            u.last_name.clone(),
            u.status.as_str().to_owned(),
            u.roles.join(";"),
            u.department.clone().unwrap_or_default(),
            u.mfa_enabled.to_string(),
            u.last_login.map(|ts| ts.to_rfc3339()).unwrap_or_default(),
        ];
        let line = fields.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

async fn users_export() -> impl IntoResponse {
    let Json(users) = users().await;
    ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], users_csv(&users))
}
