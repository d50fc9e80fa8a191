//! Wire records for every entity the console displays.
//!
//! DESIGN
//! ======
//! These types mirror the backend JSON payloads (camelCase fields, snake_case
//! enum values) so serde round-trips stay lossless. Relationships are plain id
//! lists; the console never enforces referential integrity.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps travel as RFC 3339 strings.
pub type Timestamp = DateTime<Utc>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown {kind} value: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Implements `ALL`, `as_str`, `label`, `FromStr` and `Display` for a
/// wire enum. `as_str` must agree with the serde snake_case rename.
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| ModelError::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_owned(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

// =============================================================================
// SHARED ENUMS
// =============================================================================

/// Risk grading shared by permissions, audit events, alerts and findings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

wire_enum!(RiskLevel {
    Low => ("low", "Low"),
    Medium => ("medium", "Medium"),
    High => ("high", "High"),
    Critical => ("critical", "Critical"),
});

// =============================================================================
// USERS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Pending,
}

wire_enum!(UserStatus {
    Active => ("active", "Active"),
    Inactive => ("inactive", "Inactive"),
    Suspended => ("suspended", "Suspended"),
    Pending => ("pending", "Pending"),
});

/// A console-managed identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status: UserStatus,
    /// Role ids held by this user.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default)]
    pub last_login: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl User {
    #[must_use]
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    #[must_use]
    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r == role_id)
    }
}

// =============================================================================
// ROLES AND PERMISSIONS
// =============================================================================

/// A named bundle of permissions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Permission ids granted by this role.
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub user_count: u32,
    #[serde(default)]
    pub is_system: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionScope {
    #[default]
    Global,
    Organization,
    Team,
    Own,
}

wire_enum!(PermissionScope {
    Global => ("global", "Global"),
    Organization => ("organization", "Organization"),
    Team => ("team", "Team"),
    Own => ("own", "Own"),
});

/// A single grantable capability, conventionally named `resource:action`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub resource: String,
    pub action: String,
    /// Category id.
    pub category: String,
    #[serde(default)]
    pub scope: PermissionScope,
    #[serde(default)]
    pub risk: RiskLevel,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub permission_count: u32,
}

/// A protected object type or instance that policies refer to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    /// Resource type, e.g. `document` or `api`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

// =============================================================================
// ABAC POLICIES
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyEffect {
    #[default]
    Allow,
    Deny,
}

wire_enum!(PolicyEffect {
    Allow => ("allow", "Allow"),
    Deny => ("deny", "Deny"),
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Active,
    Inactive,
    #[default]
    Draft,
}

wire_enum!(PolicyStatus {
    Active => ("active", "Active"),
    Inactive => ("inactive", "Inactive"),
    Draft => ("draft", "Draft"),
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    #[default]
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    In,
    NotIn,
    GreaterThan,
    LessThan,
}

wire_enum!(ConditionOperator {
    Equals => ("equals", "equals"),
    NotEquals => ("not_equals", "does not equal"),
    Contains => ("contains", "contains"),
    StartsWith => ("starts_with", "starts with"),
    In => ("in", "is one of"),
    NotIn => ("not_in", "is not one of"),
    GreaterThan => ("greater_than", "greater than"),
    LessThan => ("less_than", "less than"),
});

/// One attribute test. `attribute` is a dotted path rooted at `subject`,
/// `resource` or `environment`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub attribute: String,
    pub operator: ConditionOperator,
    pub value: serde_json::Value,
}

/// A named allow/deny rule with priority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbacPolicy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub effect: PolicyEffect,
    #[serde(default)]
    pub priority: i32,
    pub status: PolicyStatus,
    /// Resource path patterns (`*` one segment, `**` any depth).
    #[serde(default)]
    pub resources: Vec<String>,
    /// Action names or `*`.
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AbacPolicy {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }
}

// =============================================================================
// AUDIT AND COMPLIANCE
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    #[default]
    Success,
    Failure,
    Denied,
}

wire_enum!(AuditOutcome {
    Success => ("success", "Success"),
    Failure => ("failure", "Failure"),
    Denied => ("denied", "Denied"),
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub timestamp: Timestamp,
    pub user_id: String,
    pub username: String,
    pub action: String,
    pub resource: String,
    #[serde(default)]
    pub resource_id: Option<String>,
    pub outcome: AuditOutcome,
    pub risk: RiskLevel,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    #[default]
    Open,
    Investigating,
    Resolved,
    Dismissed,
}

wire_enum!(AlertStatus {
    Open => ("open", "Open"),
    Investigating => ("investigating", "Investigating"),
    Resolved => ("resolved", "Resolved"),
    Dismissed => ("dismissed", "Dismissed"),
});

impl AlertStatus {
    /// Open and investigating alerts still need attention.
    #[must_use]
    pub fn is_unresolved(self) -> bool {
        matches!(self, Self::Open | Self::Investigating)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAlert {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: RiskLevel,
    pub status: AlertStatus,
    pub created_at: Timestamp,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    #[default]
    InProgress,
}

wire_enum!(ComplianceStatus {
    Compliant => ("compliant", "Compliant"),
    NonCompliant => ("non_compliant", "Non-compliant"),
    InProgress => ("in_progress", "In progress"),
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub id: String,
    pub name: String,
    /// Framework short name, e.g. `SOC 2`.
    pub framework: String,
    pub status: ComplianceStatus,
    /// Percentage score, 0 to 100.
    pub score: u8,
    #[serde(default)]
    pub findings: u32,
    pub generated_at: Timestamp,
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

wire_enum!(NotificationKind {
    Info => ("info", "Info"),
    Success => ("success", "Success"),
    Warning => ("warning", "Warning"),
    Error => ("error", "Error"),
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: Timestamp,
    #[serde(default)]
    pub link: Option<String>,
}

#[must_use]
pub fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.read).count()
}
