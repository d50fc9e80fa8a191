//! Demo fixtures.
//!
//! A small, internally consistent organization used by the server's demo mode
//! and by tests. Timestamps are relative to `reference_time()` so the data
//! does not drift.

use std::collections::BTreeMap;

use chrono::{TimeDelta, TimeZone, Utc};
use serde_json::json;

use crate::model::*;

#[must_use]
pub fn reference_time() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn hours_ago(hours: i64) -> Timestamp {
    reference_time() - TimeDelta::hours(hours)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

// =============================================================================
// USERS / ROLES / PERMISSIONS
// =============================================================================

#[must_use]
pub fn users() -> Vec<User> {
    #[allow(clippy::too_many_arguments)]
    fn user(
        id: &str,
        first: &str,
        last: &str,
        status: UserStatus,
        roles: &[&str],
        department: &str,
        mfa_enabled: bool,
        last_login: Option<i64>,
    ) -> User {
        let username = first.to_lowercase();
        User {
            id: id.to_owned(),
            email: format!("{username}@acme.example"),
            username,
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            status,
            roles: strings(roles),
            department: Some(department.to_owned()),
            mfa_enabled,
            last_login: last_login.map(hours_ago),
            created_at: hours_ago(24 * 120),
        }
    }

    vec![
        user("u-alice", "Alice", "Nguyen", UserStatus::Active, &["role-admin"], "Engineering", true, Some(2)),
        user(
            "u-bob",
            "Bob",
            "Martin",
            UserStatus::Active,
            &["role-helpdesk", "role-access-manager"],
            "IT",
            false,
            Some(5),
        ),
        user("u-carol", "Carol", "Diaz", UserStatus::Active, &["role-security"], "Security", true, Some(1)),
        user(
            "u-dave",
            "Dave",
            "Kim",
            UserStatus::Suspended,
            &["role-viewer", "role-admin"],
            "Finance",
            false,
            Some(24 * 14),
        ),
        user("u-erin", "Erin", "Walsh", UserStatus::Pending, &["role-viewer"], "Finance", false, None),
        user("u-frank", "Frank", "Osei", UserStatus::Inactive, &["role-auditor"], "Legal", true, Some(24 * 60)),
        user(
            "u-grace",
            "Grace",
            "Liu",
            UserStatus::Active,
            &["role-admin", "role-viewer"],
            "Engineering",
            true,
            Some(30),
        ),
    ]
}

#[must_use]
pub fn roles() -> Vec<Role> {
    fn role(id: &str, name: &str, description: &str, permissions: &[&str], user_count: u32, is_system: bool) -> Role {
        Role {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            permissions: strings(permissions),
            user_count,
            is_system,
            created_at: hours_ago(24 * 200),
            updated_at: hours_ago(24 * 10),
        }
    }

    vec![
        role(
            "role-admin",
            "Administrator",
            "Full administrative access",
            &[
                "perm-users-read",
                "perm-users-create",
                "perm-users-update",
                "perm-users-delete",
                "perm-roles-read",
                "perm-roles-assign",
                "perm-roles-manage",
                "perm-policies-read",
                "perm-policies-manage",
                "perm-audit-read",
            ],
            3,
            true,
        ),
        role(
            "role-security",
            "Security Officer",
            "Manages policies and the audit trail",
            &["perm-policies-read", "perm-policies-manage", "perm-audit-read", "perm-audit-delete"],
            1,
            true,
        ),
        role(
            "role-viewer",
            "Viewer",
            "Read-only access to the directory",
            &["perm-users-read", "perm-roles-read", "perm-policies-read"],
            3,
            true,
        ),
        role(
            "role-helpdesk",
            "Helpdesk",
            "Creates and updates user accounts",
            &["perm-users-read", "perm-users-create", "perm-users-update"],
            1,
            false,
        ),
        role(
            "role-access-manager",
            "Access Manager",
            "Grants roles to users",
            &["perm-roles-read", "perm-roles-assign"],
            1,
            false,
        ),
        role(
            "role-auditor",
            "Auditor",
            "Reviews audit logs",
            &["perm-audit-read", "perm-users-read"],
            1,
            false,
        ),
        role(
            "role-readonly",
            "Read Only",
            "Legacy read-only role",
            &["perm-users-read", "perm-roles-read", "perm-policies-read"],
            0,
            false,
        ),
        role("role-legacy", "Legacy Import", "Created by the 2019 directory import", &[], 0, false),
    ]
}

#[must_use]
pub fn permissions() -> Vec<Permission> {
    fn perm(
        id: &str,
        resource: &str,
        action: &str,
        description: &str,
        category: &str,
        scope: PermissionScope,
        risk: RiskLevel,
    ) -> Permission {
        Permission {
            id: id.to_owned(),
            name: format!("{resource}:{action}"),
            description: description.to_owned(),
            resource: resource.to_owned(),
            action: action.to_owned(),
            category: category.to_owned(),
            scope,
            risk,
        }
    }

    use PermissionScope::{Global, Organization, Team};
    use RiskLevel::{Critical, High, Low, Medium};

    let mut list = vec![
        perm("perm-users-read", "users", "read", "View user accounts", "cat-users", Global, Low),
        perm("perm-users-create", "users", "create", "Create user accounts", "cat-users", Organization, Medium),
        perm("perm-users-update", "users", "update", "Edit user accounts", "cat-users", Organization, Medium),
        perm("perm-users-delete", "users", "delete", "Remove user accounts", "cat-users", Global, High),
        perm("perm-roles-read", "roles", "read", "View roles", "cat-roles", Global, Low),
        perm("perm-roles-assign", "roles", "assign", "Assign roles to users", "cat-roles", Organization, High),
        perm("perm-roles-manage", "roles", "manage", "Create and edit roles", "cat-roles", Global, Critical),
        perm("perm-policies-read", "policies", "read", "View access policies", "cat-security", Global, Low),
        perm(
            "perm-policies-manage",
            "policies",
            "manage",
            "Create and edit access policies",
            "cat-security",
            Global,
            Critical,
        ),
        perm("perm-audit-read", "audit", "read", "Read the audit trail", "cat-security", Team, Medium),
        perm("perm-audit-delete", "audit", "delete", "Purge audit entries", "cat-security", Global, Critical),
        perm("perm-reports-export", "reports", "export", "Export compliance reports", "cat-reports", Team, Medium),
    ];
    // Same resource, action and scope as perm-users-read under another name.
    let mut view = perm("perm-users-view", "users", "read", "View users (legacy)", "cat-users", Global, Low);
    view.name = "users:view".to_owned();
    list.push(view);
    list
}

#[must_use]
pub fn categories() -> Vec<PermissionCategory> {
    let category = |id: &str, name: &str, description: &str, color: &str, count| PermissionCategory {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        color: Some(color.to_owned()),
        permission_count: count,
    };
    vec![
        category("cat-users", "User Management", "Account lifecycle", "#3b82f6", 5),
        category("cat-roles", "Role Management", "Role definitions and grants", "#8b5cf6", 3),
        category("cat-security", "Security", "Policies and audit", "#ef4444", 4),
        category("cat-reports", "Reporting", "Compliance exports", "#10b981", 1),
    ]
}

#[must_use]
pub fn resources() -> Vec<Resource> {
    let resource = |id: &str, name: &str, kind: &str, owner: &str, attributes: &[(&str, serde_json::Value)]| Resource {
        id: id.to_owned(),
        name: name.to_owned(),
        kind: kind.to_owned(),
        description: String::new(),
        owner: Some(owner.to_owned()),
        attributes: attributes
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    };
    vec![
        resource(
            "res-finance-docs",
            "Finance documents",
            "document",
            "u-dave",
            &[("path", json!("documents/finance")), ("classification", json!("confidential"))],
        ),
        resource(
            "res-hr-db",
            "HR records",
            "database",
            "u-frank",
            &[("path", json!("hr/records")), ("classification", json!("restricted"))],
        ),
        resource(
            "res-billing-api",
            "Billing API",
            "api",
            "u-alice",
            &[("path", json!("api/billing")), ("public", json!(false))],
        ),
    ]
}

// =============================================================================
// POLICIES
// =============================================================================

#[must_use]
pub fn policies() -> Vec<AbacPolicy> {
    #[allow(clippy::too_many_arguments)]
    fn policy(
        id: &str,
        name: &str,
        description: &str,
        effect: PolicyEffect,
        priority: i32,
        status: PolicyStatus,
        resources: &[&str],
        actions: &[&str],
        conditions: Vec<Condition>,
    ) -> AbacPolicy {
        AbacPolicy {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            effect,
            priority,
            status,
            resources: strings(resources),
            actions: strings(actions),
            conditions,
            created_at: hours_ago(24 * 90),
            updated_at: hours_ago(24 * 3),
        }
    }
    fn cond(attribute: &str, operator: ConditionOperator, value: serde_json::Value) -> Condition {
        Condition {
            attribute: attribute.to_owned(),
            operator,
            value,
        }
    }

    vec![
        policy(
            "pol-finance-docs",
            "Finance document access",
            "Finance staff may read finance documents",
            PolicyEffect::Allow,
            100,
            PolicyStatus::Active,
            &["documents/finance/**"],
            &["read", "list"],
            vec![cond("subject.department", ConditionOperator::Equals, json!("finance"))],
        ),
        policy(
            "pol-contractor-deny",
            "Contractor restriction",
            "Contractors may not read finance documents",
            PolicyEffect::Deny,
            100,
            PolicyStatus::Active,
            &["documents/finance/**"],
            &["read"],
            vec![cond("subject.employment", ConditionOperator::Equals, json!("contractor"))],
        ),
        policy(
            "pol-no-delete",
            "Protect documents",
            "Nobody deletes documents",
            PolicyEffect::Deny,
            500,
            PolicyStatus::Active,
            &["documents/**"],
            &["delete"],
            Vec::new(),
        ),
        policy(
            "pol-archive-cleanup",
            "Archive cleanup",
            "Allow deleting archived documents",
            PolicyEffect::Allow,
            100,
            PolicyStatus::Active,
            &["documents/archive/*"],
            &["delete"],
            Vec::new(),
        ),
        policy(
            "pol-after-hours",
            "After-hours lockout",
            "No document access outside business hours",
            PolicyEffect::Deny,
            200,
            PolicyStatus::Active,
            &["documents/**"],
            &["*"],
            vec![cond("environment.time", ConditionOperator::GreaterThan, json!("18:00"))],
        ),
        policy(
            "pol-admin-all",
            "Administrators",
            "Administrators may do anything",
            PolicyEffect::Allow,
            300,
            PolicyStatus::Active,
            &["**"],
            &["*"],
            vec![cond("subject.roles", ConditionOperator::Contains, json!("role-admin"))],
        ),
        policy(
            "pol-hr-records",
            "HR records",
            "HR may read personnel records",
            PolicyEffect::Allow,
            100,
            PolicyStatus::Draft,
            &["hr/records/*"],
            &["read"],
            vec![cond("subject.department", ConditionOperator::In, json!(["hr"]))],
        ),
    ]
}

// =============================================================================
// AUDIT / SECURITY / COMPLIANCE / NOTIFICATIONS
// =============================================================================

#[must_use]
pub fn audit_logs() -> Vec<AuditLog> {
    #[allow(clippy::too_many_arguments)]
    fn log(
        id: &str,
        hours: i64,
        user_id: &str,
        action: &str,
        resource: &str,
        outcome: AuditOutcome,
        risk: RiskLevel,
        ip: &str,
        details: Option<&str>,
    ) -> AuditLog {
        AuditLog {
            id: id.to_owned(),
            timestamp: hours_ago(hours),
            user_id: user_id.to_owned(),
            username: user_id.trim_start_matches("u-").to_owned(),
            action: action.to_owned(),
            resource: resource.to_owned(),
            resource_id: None,
            outcome,
            risk,
            ip_address: ip.to_owned(),
            details: details.map(str::to_owned),
        }
    }

    vec![
        log("log-1", 1, "u-alice", "login", "session", AuditOutcome::Success, RiskLevel::Low, "10.0.0.12", None),
        log(
            "log-2",
            3,
            "u-bob",
            "role.assign",
            "users/u-erin",
            AuditOutcome::Success,
            RiskLevel::Medium,
            "10.0.0.40",
            Some("Granted Viewer"),
        ),
        log(
            "log-3",
            30,
            "u-dave",
            "login",
            "session",
            AuditOutcome::Failure,
            RiskLevel::High,
            "203.0.113.7",
            Some("5 failed attempts"),
        ),
        log(
            "log-4",
            50,
            "u-carol",
            "audit.delete",
            "audit",
            AuditOutcome::Denied,
            RiskLevel::Critical,
            "10.0.0.33",
            Some("Blocked by policy"),
        ),
        log(
            "log-5",
            24 * 5,
            "u-grace",
            "policy.update",
            "policies/pol-admin-all",
            AuditOutcome::Success,
            RiskLevel::Medium,
            "10.0.0.51",
            None,
        ),
    ]
}

#[must_use]
pub fn security_alerts() -> Vec<SecurityAlert> {
    let alert = |id: &str, title: &str, description: &str, severity, status, hours, user: Option<&str>| SecurityAlert {
        id: id.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        severity,
        status,
        created_at: hours_ago(hours),
        user_id: user.map(str::to_owned),
    };
    vec![
        alert(
            "alert-1",
            "Repeated login failures",
            "Five failed logins for dave from an unknown address",
            RiskLevel::High,
            AlertStatus::Open,
            30,
            Some("u-dave"),
        ),
        alert(
            "alert-2",
            "Audit purge attempt",
            "carol attempted to delete audit entries",
            RiskLevel::Critical,
            AlertStatus::Investigating,
            50,
            Some("u-carol"),
        ),
        alert(
            "alert-3",
            "MFA disabled",
            "MFA was turned off for bob",
            RiskLevel::Medium,
            AlertStatus::Resolved,
            24 * 7,
            Some("u-bob"),
        ),
    ]
}

#[must_use]
pub fn compliance_reports() -> Vec<ComplianceReport> {
    let report = |id: &str, name: &str, framework: &str, status, score, findings, hours| ComplianceReport {
        id: id.to_owned(),
        name: name.to_owned(),
        framework: framework.to_owned(),
        status,
        score,
        findings,
        generated_at: hours_ago(hours),
    };
    vec![
        report("rep-soc2", "SOC 2 access review", "SOC 2", ComplianceStatus::Compliant, 96, 1, 24 * 2),
        report("rep-iso", "ISO 27001 controls", "ISO 27001", ComplianceStatus::InProgress, 78, 6, 24 * 9),
        report("rep-sox", "SOX segregation of duties", "SOX", ComplianceStatus::NonCompliant, 61, 4, 24 * 20),
    ]
}

#[must_use]
pub fn notifications() -> Vec<Notification> {
    let note = |id: &str, title: &str, message: &str, kind, read, hours, link: Option<&str>| Notification {
        id: id.to_owned(),
        title: title.to_owned(),
        message: message.to_owned(),
        kind,
        read,
        created_at: hours_ago(hours),
        link: link.map(str::to_owned),
    };
    vec![
        note(
            "n-1",
            "Critical alert",
            "Audit purge attempt detected",
            NotificationKind::Error,
            false,
            50,
            Some("/audit"),
        ),
        note(
            "n-2",
            "Role conflict",
            "Security Officer violates separation of duties",
            NotificationKind::Warning,
            false,
            24,
            Some("/roles"),
        ),
        note("n-3", "Report ready", "SOC 2 access review generated", NotificationKind::Success, true, 48, None),
        note("n-4", "Welcome", "Demo data loaded", NotificationKind::Info, true, 24 * 30, None),
    ]
}
