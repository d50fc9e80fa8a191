//! Create/edit form state and client-side validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every dialog in the console owns one of these form structs, edits it field
//! by field, and calls `validate` on submit. An empty `FieldErrors` means the
//! form may be turned into a payload with `to_payload` and sent.
//!
//! Validation is presence and format only; server-side errors are surfaced as
//! a single message by the caller, never mapped back onto fields.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::{
    AbacPolicy, Condition, ConditionOperator, Permission, PermissionCategory, PermissionScope, PolicyEffect,
    PolicyStatus, Resource, RiskLevel, Role, User, UserStatus,
};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_POLICY_PRIORITY: i32 = 1000;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));
static HEX_COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("color pattern compiles"));

/// Field name -> message, ordered by field name for stable rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Whether a dialog is creating a new record or editing an existing id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(String),
}

impl FormMode {
    #[must_use]
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }

    #[must_use]
    pub fn edit_id(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id.as_str()),
        }
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_create() { "Create" } else { "Save changes" }
    }
}

#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose email shape check: `something@something.something`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_PATTERN.is_match(value.trim())
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if is_blank(value) {
        errors.add(field, message);
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Split comma or newline separated text into trimmed, non-empty entries.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn toggle(list: &mut Vec<String>, id: &str) {
    if let Some(pos) = list.iter().position(|x| x == id) {
        list.remove(pos);
    } else {
        list.push(id.to_owned());
    }
}

// =============================================================================
// USER
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
    pub roles: Vec<String>,
    pub department: String,
    pub status: UserStatus,
    pub mfa_enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub roles: Vec<String>,
    pub department: Option<String>,
    pub status: UserStatus,
    pub mfa_enabled: bool,
}

impl UserForm {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password: String::new(),
            confirm_password: String::new(),
            roles: user.roles.clone(),
            department: user.department.clone().unwrap_or_default(),
            status: user.status,
            mfa_enabled: user.mfa_enabled,
        }
    }

    pub fn toggle_role(&mut self, role_id: &str) {
        toggle(&mut self.roles, role_id);
    }

    #[must_use]
    pub fn validate(&self, mode: &FormMode) -> FieldErrors {
        let mut errors = FieldErrors::new();

        require(&mut errors, "username", &self.username, "Username is required");
        if !errors.has("username") && self.username.trim().chars().count() < MIN_USERNAME_LEN {
            errors.add("username", format!("Username must be at least {MIN_USERNAME_LEN} characters"));
        }

        require(&mut errors, "email", &self.email, "Email is required");
        if !errors.has("email") && !is_valid_email(&self.email) {
            errors.add("email", "Email is invalid");
        }

        require(&mut errors, "first_name", &self.first_name, "First name is required");
        require(&mut errors, "last_name", &self.last_name, "Last name is required");

        // Editing keeps the stored password unless something is typed; a
        // whitespace-only entry counts as typed and fails as blank.
        let check_password = mode.is_create() || !self.password.is_empty();
        if check_password {
            if is_blank(&self.password) {
                errors.add("password", "Password is required");
            } else if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.add("password", format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
            }
            if self.confirm_password != self.password {
                errors.add("confirm_password", "Passwords do not match");
            }
        }

        errors
    }

    #[must_use]
    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            username: self.username.trim().to_owned(),
            email: self.email.trim().to_owned(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            roles: self.roles.clone(),
            department: optional(&self.department),
            status: self.status,
            mfa_enabled: self.mfa_enabled,
        }
    }
}

// =============================================================================
// ROLE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleForm {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

impl RoleForm {
    #[must_use]
    pub fn from_role(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone(),
            permissions: role.permissions.clone(),
        }
    }

    pub fn toggle_permission(&mut self, permission_id: &str) {
        toggle(&mut self.permissions, permission_id);
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Role name is required");
        require(&mut errors, "description", &self.description, "Description is required");
        if self.permissions.is_empty() {
            errors.add("permissions", "Select at least one permission");
        }
        errors
    }

    #[must_use]
    pub fn to_payload(&self) -> RolePayload {
        RolePayload {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            permissions: self.permissions.clone(),
        }
    }
}

// =============================================================================
// PERMISSION AND CATEGORY
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionForm {
    pub name: String,
    pub description: String,
    pub resource: String,
    pub action: String,
    pub category: String,
    pub scope: PermissionScope,
    pub risk: RiskLevel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPayload {
    pub name: String,
    pub description: String,
    pub resource: String,
    pub action: String,
    pub category: String,
    pub scope: PermissionScope,
    pub risk: RiskLevel,
}

fn is_action_name(value: &str) -> bool {
    let value = value.trim();
    value == "*"
        || (!value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'))
}

impl PermissionForm {
    #[must_use]
    pub fn from_permission(p: &Permission) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            resource: p.resource.clone(),
            action: p.action.clone(),
            category: p.category.clone(),
            scope: p.scope,
            risk: p.risk,
        }
    }

    /// Conventional `resource:action` name for the current fields.
    #[must_use]
    pub fn suggested_name(&self) -> String {
        format!("{}:{}", self.resource.trim(), self.action.trim())
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Permission name is required");
        require(&mut errors, "resource", &self.resource, "Resource is required");
        require(&mut errors, "action", &self.action, "Action is required");
        if !errors.has("action") && !is_action_name(&self.action) {
            errors.add("action", "Action must be lowercase letters, digits, '-' or '_'");
        }
        require(&mut errors, "category", &self.category, "Category is required");
        errors
    }

    #[must_use]
    pub fn to_payload(&self) -> PermissionPayload {
        PermissionPayload {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            resource: self.resource.trim().to_owned(),
            action: self.action.trim().to_owned(),
            category: self.category.clone(),
            scope: self.scope,
            risk: self.risk,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    pub color: Option<String>,
}

impl CategoryForm {
    #[must_use]
    pub fn from_category(c: &PermissionCategory) -> Self {
        Self {
            name: c.name.clone(),
            description: c.description.clone(),
            color: c.color.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Category name is required");
        if !is_blank(&self.color) && !is_hex_color(&self.color) {
            errors.add("color", "Color must be a hex value like #3b82f6");
        }
        errors
    }

    #[must_use]
    pub fn to_payload(&self) -> CategoryPayload {
        CategoryPayload {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            color: optional(&self.color),
        }
    }
}

// =============================================================================
// RESOURCE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceForm {
    pub name: String,
    pub kind: String,
    pub description: String,
    pub owner: String,
    /// Carried through edits untouched.
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub owner: Option<String>,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl ResourceForm {
    #[must_use]
    pub fn from_resource(r: &Resource) -> Self {
        Self {
            name: r.name.clone(),
            kind: r.kind.clone(),
            description: r.description.clone(),
            owner: r.owner.clone().unwrap_or_default(),
            attributes: r.attributes.clone(),
        }
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Resource name is required");
        require(&mut errors, "kind", &self.kind, "Type is required");
        errors
    }

    #[must_use]
    pub fn to_payload(&self) -> ResourcePayload {
        ResourcePayload {
            name: self.name.trim().to_owned(),
            kind: self.kind.trim().to_owned(),
            description: self.description.trim().to_owned(),
            owner: optional(&self.owner),
            attributes: self.attributes.clone(),
        }
    }
}

// =============================================================================
// POLICY
// =============================================================================

/// Editable condition row; `value` is raw text until submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionRow {
    pub attribute: String,
    pub operator: ConditionOperator,
    pub value: String,
}

impl ConditionRow {
    #[must_use]
    pub fn from_condition(c: &Condition) -> Self {
        let value = match &c.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) if items.iter().all(serde_json::Value::is_string) => items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        };
        Self {
            attribute: c.attribute.clone(),
            operator: c.operator,
            value,
        }
    }

    /// Interpret the raw text: list operators take comma lists, everything
    /// else takes JSON literals (numbers, booleans) or falls back to a string.
    #[must_use]
    pub fn to_condition(&self) -> Condition {
        let raw = self.value.trim();
        let value = match self.operator {
            ConditionOperator::In | ConditionOperator::NotIn => {
                match serde_json::from_str::<serde_json::Value>(raw) {
                    Ok(v @ serde_json::Value::Array(_)) => v,
                    _ => serde_json::Value::Array(split_list(raw).into_iter().map(serde_json::Value::String).collect()),
                }
            }
            _ => match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => v,
                _ => serde_json::Value::String(raw.to_owned()),
            },
        };
        Condition {
            attribute: self.attribute.trim().to_owned(),
            operator: self.operator,
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyForm {
    pub name: String,
    pub description: String,
    pub effect: PolicyEffect,
    pub status: PolicyStatus,
    /// Raw text input; parsed on validate.
    pub priority: String,
    /// Comma or newline separated resource patterns.
    pub resources: String,
    /// Comma or newline separated actions.
    pub actions: String,
    pub conditions: Vec<ConditionRow>,
}

impl Default for PolicyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            effect: PolicyEffect::Allow,
            status: PolicyStatus::Draft,
            priority: "100".to_owned(),
            resources: String::new(),
            actions: String::new(),
            conditions: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyPayload {
    pub name: String,
    pub description: String,
    pub effect: PolicyEffect,
    pub status: PolicyStatus,
    pub priority: i32,
    pub resources: Vec<String>,
    pub actions: Vec<String>,
    pub conditions: Vec<Condition>,
}

impl PolicyForm {
    #[must_use]
    pub fn from_policy(p: &AbacPolicy) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            effect: p.effect,
            status: p.status,
            priority: p.priority.to_string(),
            resources: p.resources.join(", "),
            actions: p.actions.join(", "),
            conditions: p.conditions.iter().map(ConditionRow::from_condition).collect(),
        }
    }

    #[must_use]
    pub fn parsed_priority(&self) -> Option<i32> {
        self.priority
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|p| (0..=MAX_POLICY_PRIORITY).contains(p))
    }

    pub fn add_condition(&mut self) {
        self.conditions.push(ConditionRow::default());
    }

    pub fn remove_condition(&mut self, index: usize) {
        if index < self.conditions.len() {
            self.conditions.remove(index);
        }
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Policy name is required");
        if self.parsed_priority().is_none() {
            errors.add(
                "priority",
                format!("Priority must be a number between 0 and {MAX_POLICY_PRIORITY}"),
            );
        }
        if split_list(&self.resources).is_empty() {
            errors.add("resources", "At least one resource pattern is required");
        }
        if split_list(&self.actions).is_empty() {
            errors.add("actions", "At least one action is required");
        }
        if let Some(index) = self.conditions.iter().position(|c| is_blank(&c.attribute)) {
            errors.add("conditions", format!("Condition {} needs an attribute", index + 1));
        }
        errors
    }

    #[must_use]
    pub fn to_payload(&self) -> PolicyPayload {
        PolicyPayload {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            effect: self.effect,
            status: self.status,
            priority: self.parsed_priority().unwrap_or_default(),
            resources: split_list(&self.resources),
            actions: split_list(&self.actions),
            conditions: self.conditions.iter().map(ConditionRow::to_condition).collect(),
        }
    }
}
