//! Role and policy conflict detection.
//!
//! Role conflicts are found over the RBAC graph (users -> roles ->
//! permissions); policy conflicts over pairs of active ABAC policies whose
//! targets overlap. Both produce deterministic ids so a dismissed finding
//! stays dismissed across re-analysis.
//!
//! ROLE CONFLICTS
//! ==============
//! - Duplicate roles: identical non-empty permission sets.
//! - Redundant assignment: a user holds a role whose permissions are a subset
//!   of another role they hold.
//! - Separation of duties: a role, or a user's combined roles, grants both
//!   permissions of an `SodRule`.
//!
//! POLICY CONFLICTS
//! ================
//! Only pairs whose resource and action patterns overlap and whose equality
//! conditions do not rule each other out are compared.
//! - Contradictory: opposite effects at equal priority.
//! - Shadowed: opposite effects where the higher-priority policy is
//!   unconditional and covers every request the lower one targets.
//! - Duplicate: same effect, same targets, same conditions.

#[cfg(test)]
#[path = "conflicts_test.rs"]
mod conflicts_test;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{AbacPolicy, Condition, ConditionOperator, Permission, RiskLevel, Role, User};
use crate::pattern::{action_covers, actions_overlap, resource_covers, resources_overlap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleConflictKind {
    DuplicateRoles,
    RedundantAssignment,
    SeparationOfDuties,
}

impl RoleConflictKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DuplicateRoles => "Duplicate roles",
            Self::RedundantAssignment => "Redundant assignment",
            Self::SeparationOfDuties => "Separation of duties",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleConflict {
    pub id: String,
    pub kind: RoleConflictKind,
    pub severity: RiskLevel,
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    pub description: String,
}

/// Two permissions that must not be held by the same principal. `first` and
/// `second` may name a permission by id or by `resource:action` name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SodRule {
    pub id: String,
    pub name: String,
    pub first: String,
    pub second: String,
    pub severity: RiskLevel,
}

#[must_use]
pub fn default_sod_rules() -> Vec<SodRule> {
    let rule = |id: &str, name: &str, first: &str, second: &str, severity| SodRule {
        id: id.to_owned(),
        name: name.to_owned(),
        first: first.to_owned(),
        second: second.to_owned(),
        severity,
    };
    vec![
        rule(
            "sod-audit-tamper",
            "Policy changes vs audit deletion",
            "policies:manage",
            "audit:delete",
            RiskLevel::Critical,
        ),
        rule(
            "sod-provisioning",
            "User provisioning vs role assignment",
            "users:create",
            "roles:assign",
            RiskLevel::High,
        ),
        rule(
            "sod-role-admin",
            "Role administration vs audit deletion",
            "roles:manage",
            "audit:delete",
            RiskLevel::High,
        ),
    ]
}

fn sorted_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

fn by_severity_then_id<T>(items: &mut [T], key: impl Fn(&T) -> (RiskLevel, &str)) {
    items.sort_by(|a, b| {
        let (sa, ia) = key(a);
        let (sb, ib) = key(b);
        sb.cmp(&sa).then_with(|| ia.cmp(ib))
    });
}

// =============================================================================
// ROLE CONFLICTS
// =============================================================================

/// Find duplicate roles, redundant assignments and SoD violations.
#[must_use]
pub fn detect_role_conflicts(
    roles: &[Role],
    users: &[User],
    permissions: &[Permission],
    rules: &[SodRule],
) -> Vec<RoleConflict> {
    let role_perms = roles
        .iter()
        .map(|r| (r.id.as_str(), r.permissions.iter().map(String::as_str).collect::<BTreeSet<_>>()))
        .collect::<BTreeMap<_, _>>();
    let role_names = roles
        .iter()
        .map(|r| (r.id.as_str(), r.name.as_str()))
        .collect::<HashMap<_, _>>();
    let name_of = |id: &str| role_names.get(id).copied().unwrap_or(id).to_owned();

    let mut conflicts = Vec::new();
    duplicate_roles(roles, &role_perms, &name_of, &mut conflicts);
    redundant_assignments(users, &role_perms, &name_of, &mut conflicts);
    sod_violations(roles, users, permissions, rules, &role_perms, &name_of, &mut conflicts);

    by_severity_then_id(&mut conflicts, |c| (c.severity, c.id.as_str()));
    conflicts
}

fn duplicate_roles(
    roles: &[Role],
    role_perms: &BTreeMap<&str, BTreeSet<&str>>,
    name_of: &impl Fn(&str) -> String,
    out: &mut Vec<RoleConflict>,
) {
    for (i, a) in roles.iter().enumerate() {
        for b in &roles[i + 1..] {
            let (Some(pa), Some(pb)) = (role_perms.get(a.id.as_str()), role_perms.get(b.id.as_str())) else {
                continue;
            };
            if pa.is_empty() || pa != pb {
                continue;
            }
            let (first, second) = sorted_pair(&a.id, &b.id);
            out.push(RoleConflict {
                id: format!("duplicate:{first}:{second}"),
                kind: RoleConflictKind::DuplicateRoles,
                severity: RiskLevel::Medium,
                roles: vec![first.to_owned(), second.to_owned()],
                permissions: pa.iter().map(|p| (*p).to_owned()).collect(),
                users: Vec::new(),
                description: format!(
                    "Roles '{}' and '{}' grant identical permissions",
                    name_of(first),
                    name_of(second)
                ),
            });
        }
    }
}

fn redundant_assignments(
    users: &[User],
    role_perms: &BTreeMap<&str, BTreeSet<&str>>,
    name_of: &impl Fn(&str) -> String,
    out: &mut Vec<RoleConflict>,
) {
    // (contained role, containing role) -> users holding both.
    let mut pairs = BTreeMap::<(&str, &str), Vec<String>>::new();

    for user in users {
        let held = user
            .roles
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| role_perms.get(id).map(|perms| (id, perms)))
            .filter(|(_, perms)| !perms.is_empty())
            .collect::<Vec<_>>();

        for (i, (a, pa)) in held.iter().enumerate() {
            for (j, (b, pb)) in held.iter().enumerate() {
                if i == j || !pa.is_subset(pb) {
                    continue;
                }
                // Equal sets: report once, smaller id as the redundant one.
                if pa == pb && a > b {
                    continue;
                }
                pairs.entry((*a, *b)).or_default().push(user.id.clone());
            }
        }
    }

    for ((contained, container), user_ids) in pairs {
        out.push(RoleConflict {
            id: format!("redundant:{contained}:{container}"),
            kind: RoleConflictKind::RedundantAssignment,
            severity: RiskLevel::Low,
            roles: vec![contained.to_owned(), container.to_owned()],
            permissions: Vec::new(),
            description: format!(
                "'{}' is fully contained in '{}'; {} user(s) hold both",
                name_of(contained),
                name_of(container),
                user_ids.len()
            ),
            users: user_ids,
        });
    }
}

/// Resolve a rule reference (id or name) to permission ids.
fn resolve_permission<'a>(reference: &str, permissions: &'a [Permission]) -> BTreeSet<&'a str> {
    let reference = reference.trim();
    permissions
        .iter()
        .filter(|p| p.id == reference || p.name.eq_ignore_ascii_case(reference))
        .map(|p| p.id.as_str())
        .collect()
}

fn grants_any(perms: &BTreeSet<&str>, wanted: &BTreeSet<&str>) -> bool {
    !perms.is_disjoint(wanted)
}

#[allow(clippy::too_many_arguments)]
fn sod_violations(
    roles: &[Role],
    users: &[User],
    permissions: &[Permission],
    rules: &[SodRule],
    role_perms: &BTreeMap<&str, BTreeSet<&str>>,
    name_of: &impl Fn(&str) -> String,
    out: &mut Vec<RoleConflict>,
) {
    for rule in rules {
        let first = resolve_permission(&rule.first, permissions);
        let second = resolve_permission(&rule.second, permissions);
        if first.is_empty() || second.is_empty() {
            continue;
        }
        let involved = first.iter().chain(second.iter()).map(|p| (*p).to_owned()).collect::<Vec<_>>();

        let toxic_roles = roles
            .iter()
            .filter(|r| {
                role_perms
                    .get(r.id.as_str())
                    .is_some_and(|perms| grants_any(perms, &first) && grants_any(perms, &second))
            })
            .map(|r| r.id.as_str())
            .collect::<BTreeSet<_>>();

        for role_id in &toxic_roles {
            out.push(RoleConflict {
                id: format!("sod:{}:role:{role_id}", rule.id),
                kind: RoleConflictKind::SeparationOfDuties,
                severity: rule.severity,
                roles: vec![(*role_id).to_owned()],
                permissions: involved.clone(),
                users: Vec::new(),
                description: format!("Role '{}' violates '{}' on its own", name_of(role_id), rule.name),
            });
        }

        for user in users {
            if user.roles.iter().any(|r| toxic_roles.contains(r.as_str())) {
                continue;
            }
            let held = user
                .roles
                .iter()
                .filter_map(|r| role_perms.get(r.as_str()).map(|perms| (r.as_str(), perms)))
                .collect::<Vec<_>>();
            let has_first = held.iter().any(|(_, perms)| grants_any(perms, &first));
            let has_second = held.iter().any(|(_, perms)| grants_any(perms, &second));
            if !(has_first && has_second) {
                continue;
            }
            let contributing = held
                .iter()
                .filter(|(_, perms)| grants_any(perms, &first) || grants_any(perms, &second))
                .map(|(id, _)| (*id).to_owned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect::<Vec<_>>();
            out.push(RoleConflict {
                id: format!("sod:{}:user:{}", rule.id, user.id),
                kind: RoleConflictKind::SeparationOfDuties,
                severity: rule.severity,
                description: format!(
                    "User '{}' violates '{}' through roles {}",
                    user.username,
                    rule.name,
                    contributing.iter().map(|id| format!("'{}'", name_of(id))).collect::<Vec<_>>().join(" and ")
                ),
                roles: contributing,
                permissions: involved.clone(),
                users: vec![user.id.clone()],
            });
        }
    }
}

// =============================================================================
// POLICY CONFLICTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyConflictKind {
    Contradictory,
    Shadowed,
    Duplicate,
}

impl PolicyConflictKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Contradictory => "Contradictory",
            Self::Shadowed => "Shadowed",
            Self::Duplicate => "Duplicate",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Contradictory => "contradictory",
            Self::Shadowed => "shadowed",
            Self::Duplicate => "duplicate",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConflict {
    pub id: String,
    pub kind: PolicyConflictKind,
    pub severity: RiskLevel,
    /// For `Shadowed`, the shadowing policy comes first.
    pub policies: Vec<String>,
    pub description: String,
}

/// Compare every pair of active policies.
#[must_use]
pub fn detect_policy_conflicts(policies: &[AbacPolicy]) -> Vec<PolicyConflict> {
    let active = policies.iter().filter(|p| p.is_active()).collect::<Vec<_>>();
    let mut conflicts = Vec::new();

    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if let Some(conflict) = compare_policies(a, b) {
                conflicts.push(conflict);
            }
        }
    }

    by_severity_then_id(&mut conflicts, |c| (c.severity, c.id.as_str()));
    conflicts
}

fn compare_policies(a: &AbacPolicy, b: &AbacPolicy) -> Option<PolicyConflict> {
    if !targets_overlap(a, b) || conditions_disjoint(&a.conditions, &b.conditions) {
        return None;
    }
    let (lo_id, hi_id) = sorted_pair(&a.id, &b.id);
    let make = |kind: PolicyConflictKind, severity, policies: Vec<String>, description: String| PolicyConflict {
        id: format!("{}:{lo_id}:{hi_id}", kind.slug()),
        kind,
        severity,
        policies,
        description,
    };

    if a.effect != b.effect {
        if a.priority == b.priority {
            let (allow, deny) = if a.effect == crate::model::PolicyEffect::Allow { (a, b) } else { (b, a) };
            return Some(make(
                PolicyConflictKind::Contradictory,
                RiskLevel::High,
                vec![lo_id.to_owned(), hi_id.to_owned()],
                format!(
                    "'{}' allows and '{}' denies overlapping requests at priority {}",
                    allow.name, deny.name, a.priority
                ),
            ));
        }
        let (high, low) = if a.priority > b.priority { (a, b) } else { (b, a) };
        if high.conditions.is_empty() && covers(high, low) {
            return Some(make(
                PolicyConflictKind::Shadowed,
                RiskLevel::Medium,
                vec![high.id.clone(), low.id.clone()],
                format!(
                    "'{}' can never decide: '{}' (priority {}) always takes precedence on the same requests",
                    low.name, high.name, high.priority
                ),
            ));
        }
        return None;
    }

    if same_targets(a, b) && same_conditions(&a.conditions, &b.conditions) {
        return Some(make(
            PolicyConflictKind::Duplicate,
            RiskLevel::Low,
            vec![lo_id.to_owned(), hi_id.to_owned()],
            format!("'{}' and '{}' are duplicates", a.name, b.name),
        ));
    }
    None
}

fn targets_overlap(a: &AbacPolicy, b: &AbacPolicy) -> bool {
    let resources = a
        .resources
        .iter()
        .any(|ra| b.resources.iter().any(|rb| resources_overlap(ra, rb)));
    let actions = a
        .actions
        .iter()
        .any(|xa| b.actions.iter().any(|xb| actions_overlap(xa, xb)));
    resources && actions
}

/// Every target of `low` is also a target of `high`.
fn covers(high: &AbacPolicy, low: &AbacPolicy) -> bool {
    low.resources
        .iter()
        .all(|rl| high.resources.iter().any(|rh| resource_covers(rh, rl)))
        && low
            .actions
            .iter()
            .all(|xl| high.actions.iter().any(|xh| action_covers(xh, xl)))
}

fn normalized(values: &[String]) -> BTreeSet<String> {
    values.iter().map(|v| v.trim().to_lowercase()).collect()
}

fn same_targets(a: &AbacPolicy, b: &AbacPolicy) -> bool {
    normalized(&a.resources) == normalized(&b.resources) && normalized(&a.actions) == normalized(&b.actions)
}

fn condition_key(c: &Condition) -> String {
    format!("{}|{}|{}", c.attribute.trim(), c.operator.as_str(), c.value)
}

fn same_conditions(a: &[Condition], b: &[Condition]) -> bool {
    a.iter().map(condition_key).collect::<BTreeSet<_>>() == b.iter().map(condition_key).collect::<BTreeSet<_>>()
}

/// True when the two condition lists can never hold together: the same
/// attribute is pinned to different values, or pinned and excluded.
fn conditions_disjoint(a: &[Condition], b: &[Condition]) -> bool {
    let clash = |x: &Condition, y: &Condition| {
        if x.attribute.trim() != y.attribute.trim() {
            return false;
        }
        match (x.operator, y.operator) {
            (ConditionOperator::Equals, ConditionOperator::Equals) => x.value != y.value,
            (ConditionOperator::Equals, ConditionOperator::NotEquals)
            | (ConditionOperator::NotEquals, ConditionOperator::Equals) => x.value == y.value,
            (ConditionOperator::Equals, ConditionOperator::In) => {
                y.value.as_array().is_some_and(|opts| !opts.contains(&x.value))
            }
            (ConditionOperator::In, ConditionOperator::Equals) => {
                x.value.as_array().is_some_and(|opts| !opts.contains(&y.value))
            }
            _ => false,
        }
    };
    a.iter().any(|x| b.iter().any(|y| clash(x, y)))
}
