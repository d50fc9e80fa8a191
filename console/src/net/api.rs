//! REST API helpers for the IAM backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with the stored
//! bearer token attached to every request.
//! Server-side (SSR): every call returns `ApiError::Unavailable`; data is
//! only fetched from the browser after hydration.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `ApiError::Status` (401 becomes `Unauthorized`),
//! transport failures `Network`, and unparseable bodies `Decode`. Each
//! failure is logged once here with the method and path so pages only store
//! the message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use iam::conflicts::RoleConflict;
use iam::evaluate::{PolicyTestRequest, PolicyTestResult};
use iam::optimize::Optimization;
use iam::validate::{CategoryPayload, PermissionPayload, PolicyPayload, ResourcePayload, RolePayload, UserPayload};
use iam::{
    AbacPolicy, AuditLog, ComplianceReport, Notification, Permission, PermissionCategory, Resource, Role,
    SecurityAlert, User,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

pub const LOGIN: &str = "/api/auth/login";
pub const USERS: &str = "/api/users";
pub const USERS_EXPORT: &str = "/api/users/export";
pub const ROLES: &str = "/api/roles";
pub const ROLE_CONFLICTS: &str = "/api/roles/conflicts";
pub const PERMISSIONS: &str = "/api/permissions";
pub const CATEGORIES: &str = "/api/permissions/categories";
pub const OPTIMIZATIONS: &str = "/api/permissions/optimizations";
pub const RESOURCES: &str = "/api/resources";
pub const POLICIES: &str = "/api/policies";
pub const POLICY_TEST: &str = "/api/policies/test";
pub const AUDIT_LOGS: &str = "/api/audit-logs";
pub const ALERTS: &str = "/api/security/alerts";
pub const COMPLIANCE_REPORTS: &str = "/api/compliance/reports";
pub const NOTIFICATIONS: &str = "/api/notifications";
pub const NOTIFICATIONS_READ_ALL: &str = "/api/notifications/read-all";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

// =============================================================================
// PATHS AND BODIES
// =============================================================================

/// Everything but RFC 3986 unreserved characters is escaped in an id segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// `{collection}/{id}`.
#[must_use]
pub fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", encode_segment(id))
}

/// `{collection}/{id}/{action}`, e.g. `/api/roles/conflicts/c1/resolve`.
#[must_use]
pub fn action_path(collection: &str, id: &str, action: &str) -> String {
    format!("{}/{action}", item_path(collection, id))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {}", token.trim())
}

/// Parse a response body; an empty body reads as JSON `null`.
#[cfg(any(test, feature = "hydrate"))]
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn to_body<P: Serialize>(payload: &P) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Send a request and return the raw body of a 2xx response.
async fn send_raw(verb: Verb, path: &str, body: Option<serde_json::Value>) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::{Method, RequestBuilder};

        let method = match verb {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        };
        let mut builder = RequestBuilder::new(path).method(method).header("Accept", "application/json");
        if let Some(token) = crate::util::token::load() {
            builder = builder.header("Authorization", &bearer(&token));
        }
        let result = async {
            let request = match &body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;
            let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let text = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
            if resp.ok() {
                Ok(text)
            } else {
                Err(ApiError::from_status(resp.status(), &text))
            }
        }
        .await;
        if let Err(e) = &result {
            log::warn!("{} {path} failed: {e}", verb.as_str());
        }
        result
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (verb, path, body);
        Err(ApiError::Unavailable)
    }
}

async fn send<T: DeserializeOwned>(verb: Verb, path: &str, body: Option<serde_json::Value>) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let text = send_raw(verb, path, body).await?;
        let decoded = decode_body(&text);
        if let Err(e) = &decoded {
            log::warn!("{} {path} returned an unreadable body: {e}", verb.as_str());
        }
        decoded
    }
    #[cfg(not(feature = "hydrate"))]
    {
        send_raw(verb, path, body).await?;
        Err(ApiError::Unavailable)
    }
}

/// `GET {collection}`.
///
/// # Errors
///
/// Any `ApiError`; `Unavailable` outside the browser.
pub async fn list<T: DeserializeOwned>(collection: &str) -> Result<Vec<T>, ApiError> {
    send(Verb::Get, collection, None).await
}

/// `POST {collection}` with a JSON payload, returning the created record.
///
/// # Errors
///
/// Any `ApiError`; `Unavailable` outside the browser.
pub async fn create<P: Serialize, T: DeserializeOwned>(collection: &str, payload: &P) -> Result<T, ApiError> {
    send(Verb::Post, collection, Some(to_body(payload)?)).await
}

/// `PUT {collection}/{id}` with a JSON payload, returning the stored record.
///
/// # Errors
///
/// Any `ApiError`; `Unavailable` outside the browser.
pub async fn update<P: Serialize, T: DeserializeOwned>(collection: &str, id: &str, payload: &P) -> Result<T, ApiError> {
    send(Verb::Put, &item_path(collection, id), Some(to_body(payload)?)).await
}

/// `DELETE {collection}/{id}`; any response body is ignored.
///
/// # Errors
///
/// Any `ApiError`; `Unavailable` outside the browser.
pub async fn remove(collection: &str, id: &str) -> Result<(), ApiError> {
    send::<IgnoredAny>(Verb::Delete, &item_path(collection, id), None).await?;
    Ok(())
}

async fn post_action(path: &str) -> Result<(), ApiError> {
    send::<IgnoredAny>(Verb::Post, path, None).await?;
    Ok(())
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /api/auth/login`.
///
/// # Errors
///
/// `Unauthorized` for bad credentials, otherwise any `ApiError`.
pub async fn login(username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let body = serde_json::json!({ "username": username.trim(), "password": password });
    send(Verb::Post, LOGIN, Some(body)).await
}

// =============================================================================
// DIRECTORY
// =============================================================================

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_users() -> Result<Vec<User>, ApiError> {
    list(USERS).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn create_user(payload: &UserPayload) -> Result<User, ApiError> {
    create(USERS, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn update_user(id: &str, payload: &UserPayload) -> Result<User, ApiError> {
    update(USERS, id, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn delete_user(id: &str) -> Result<(), ApiError> {
    remove(USERS, id).await
}

/// Download the user directory as CSV text.
///
/// # Errors
///
/// Any `ApiError`.
pub async fn export_users_csv() -> Result<String, ApiError> {
    send_raw(Verb::Get, USERS_EXPORT, None).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_roles() -> Result<Vec<Role>, ApiError> {
    list(ROLES).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn create_role(payload: &RolePayload) -> Result<Role, ApiError> {
    create(ROLES, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn update_role(id: &str, payload: &RolePayload) -> Result<Role, ApiError> {
    update(ROLES, id, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn delete_role(id: &str) -> Result<(), ApiError> {
    remove(ROLES, id).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_role_conflicts() -> Result<Vec<RoleConflict>, ApiError> {
    list(ROLE_CONFLICTS).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn resolve_role_conflict(id: &str) -> Result<(), ApiError> {
    post_action(&action_path(ROLE_CONFLICTS, id, "resolve")).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn dismiss_role_conflict(id: &str) -> Result<(), ApiError> {
    remove(ROLE_CONFLICTS, id).await
}

// =============================================================================
// PERMISSIONS AND RESOURCES
// =============================================================================

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_permissions() -> Result<Vec<Permission>, ApiError> {
    list(PERMISSIONS).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn create_permission(payload: &PermissionPayload) -> Result<Permission, ApiError> {
    create(PERMISSIONS, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn update_permission(id: &str, payload: &PermissionPayload) -> Result<Permission, ApiError> {
    update(PERMISSIONS, id, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn delete_permission(id: &str) -> Result<(), ApiError> {
    remove(PERMISSIONS, id).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_categories() -> Result<Vec<PermissionCategory>, ApiError> {
    list(CATEGORIES).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn create_category(payload: &CategoryPayload) -> Result<PermissionCategory, ApiError> {
    create(CATEGORIES, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn update_category(id: &str, payload: &CategoryPayload) -> Result<PermissionCategory, ApiError> {
    update(CATEGORIES, id, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn delete_category(id: &str) -> Result<(), ApiError> {
    remove(CATEGORIES, id).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_optimizations() -> Result<Vec<Optimization>, ApiError> {
    list(OPTIMIZATIONS).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn apply_optimization(id: &str) -> Result<(), ApiError> {
    post_action(&action_path(OPTIMIZATIONS, id, "apply")).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn dismiss_optimization(id: &str) -> Result<(), ApiError> {
    remove(OPTIMIZATIONS, id).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_resources() -> Result<Vec<Resource>, ApiError> {
    list(RESOURCES).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn create_resource(payload: &ResourcePayload) -> Result<Resource, ApiError> {
    create(RESOURCES, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn update_resource(id: &str, payload: &ResourcePayload) -> Result<Resource, ApiError> {
    update(RESOURCES, id, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn delete_resource(id: &str) -> Result<(), ApiError> {
    remove(RESOURCES, id).await
}

// =============================================================================
// POLICIES
// =============================================================================

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_policies() -> Result<Vec<AbacPolicy>, ApiError> {
    list(POLICIES).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn create_policy(payload: &PolicyPayload) -> Result<AbacPolicy, ApiError> {
    create(POLICIES, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn update_policy(id: &str, payload: &PolicyPayload) -> Result<AbacPolicy, ApiError> {
    update(POLICIES, id, payload).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn delete_policy(id: &str) -> Result<(), ApiError> {
    remove(POLICIES, id).await
}

/// `POST /api/policies/test`.
///
/// # Errors
///
/// Any `ApiError`.
pub async fn test_policy(request: &PolicyTestRequest) -> Result<PolicyTestResult, ApiError> {
    send(Verb::Post, POLICY_TEST, Some(to_body(request)?)).await
}

// =============================================================================
// AUDIT AND NOTIFICATIONS
// =============================================================================

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_audit_logs() -> Result<Vec<AuditLog>, ApiError> {
    list(AUDIT_LOGS).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_alerts() -> Result<Vec<SecurityAlert>, ApiError> {
    list(ALERTS).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_compliance_reports() -> Result<Vec<ComplianceReport>, ApiError> {
    list(COMPLIANCE_REPORTS).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn fetch_notifications() -> Result<Vec<Notification>, ApiError> {
    list(NOTIFICATIONS).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn mark_notification_read(id: &str) -> Result<(), ApiError> {
    post_action(&action_path(NOTIFICATIONS, id, "read")).await
}

/// # Errors
///
/// Any `ApiError`.
pub async fn mark_all_notifications_read() -> Result<(), ApiError> {
    post_action(NOTIFICATIONS_READ_ALL).await
}
