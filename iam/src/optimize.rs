//! Permission optimization suggestions.
//!
//! Looks for grants that can be removed without changing anyone's effective
//! access: permissions no role uses, permissions that duplicate each other,
//! roles that grant nothing or are held by nobody, and role assignments made
//! redundant by another role the same user holds.
//!
//! `reduction` is the number of grants or entities the suggestion removes.

#[cfg(test)]
#[path = "optimize_test.rs"]
mod optimize_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{Permission, RiskLevel, Role, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationKind {
    UnusedPermission,
    DuplicatePermission,
    EmptyRole,
    UnassignedRole,
    RedundantAssignment,
}

impl OptimizationKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UnusedPermission => "Unused permission",
            Self::DuplicatePermission => "Duplicate permission",
            Self::EmptyRole => "Empty role",
            Self::UnassignedRole => "Unassigned role",
            Self::RedundantAssignment => "Redundant assignment",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub id: String,
    pub kind: OptimizationKind,
    /// Ids of the permissions, roles or users involved.
    pub targets: Vec<String>,
    pub description: String,
    pub impact: RiskLevel,
    pub reduction: u32,
}

#[must_use]
pub fn analyze(roles: &[Role], permissions: &[Permission], users: &[User]) -> Vec<Optimization> {
    let mut out = Vec::new();
    unused_permissions(roles, permissions, &mut out);
    duplicate_permissions(permissions, &mut out);
    idle_roles(roles, users, &mut out);
    redundant_assignments(roles, users, &mut out);

    out.sort_by(|a, b| b.impact.cmp(&a.impact).then_with(|| a.id.cmp(&b.id)));
    out
}

fn unused_permissions(roles: &[Role], permissions: &[Permission], out: &mut Vec<Optimization>) {
    let granted = roles
        .iter()
        .flat_map(|r| r.permissions.iter().map(String::as_str))
        .collect::<BTreeSet<_>>();

    for perm in permissions.iter().filter(|p| !granted.contains(p.id.as_str())) {
        out.push(Optimization {
            id: format!("unused-permission:{}", perm.id),
            kind: OptimizationKind::UnusedPermission,
            targets: vec![perm.id.clone()],
            description: format!("Permission '{}' is not granted by any role", perm.name),
            impact: RiskLevel::Low,
            reduction: 1,
        });
    }
}

fn duplicate_permissions(permissions: &[Permission], out: &mut Vec<Optimization>) {
    let mut groups = BTreeMap::<(String, String, &'static str), Vec<&Permission>>::new();
    for perm in permissions {
        let key = (
            perm.resource.trim().to_lowercase(),
            perm.action.trim().to_lowercase(),
            perm.scope.as_str(),
        );
        groups.entry(key).or_default().push(perm);
    }

    for ((resource, action, scope), mut group) in groups {
        if group.len() < 2 {
            continue;
        }
        group.sort_by(|a, b| a.id.cmp(&b.id));
        let names = group.iter().map(|p| format!("'{}'", p.name)).collect::<Vec<_>>();
        out.push(Optimization {
            id: format!("duplicate-permission:{}", group[0].id),
            kind: OptimizationKind::DuplicatePermission,
            targets: group.iter().map(|p| p.id.clone()).collect(),
            description: format!(
                "{} all grant {resource}:{action} at {scope} scope; keep one",
                names.join(", "),
            ),
            impact: RiskLevel::Medium,
            reduction: u32::try_from(group.len() - 1).unwrap_or(u32::MAX),
        });
    }
}

fn idle_roles(roles: &[Role], users: &[User], out: &mut Vec<Optimization>) {
    let held = users
        .iter()
        .flat_map(|u| u.roles.iter().map(String::as_str))
        .collect::<BTreeSet<_>>();

    for role in roles {
        if role.permissions.is_empty() {
            out.push(Optimization {
                id: format!("empty-role:{}", role.id),
                kind: OptimizationKind::EmptyRole,
                targets: vec![role.id.clone()],
                description: format!("Role '{}' grants no permissions", role.name),
                impact: RiskLevel::Low,
                reduction: 1,
            });
        } else if !role.is_system && !held.contains(role.id.as_str()) {
            out.push(Optimization {
                id: format!("unassigned-role:{}", role.id),
                kind: OptimizationKind::UnassignedRole,
                targets: vec![role.id.clone()],
                description: format!("Role '{}' is not assigned to any user", role.name),
                impact: RiskLevel::Low,
                reduction: 1,
            });
        }
    }
}

fn redundant_assignments(roles: &[Role], users: &[User], out: &mut Vec<Optimization>) {
    let by_id = roles.iter().map(|r| (r.id.as_str(), r)).collect::<BTreeMap<_, _>>();

    for user in users {
        let held = user
            .roles
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| by_id.get(id).copied())
            .filter(|r| !r.permissions.is_empty())
            .map(|r| (r, permission_set(r)))
            .collect::<Vec<_>>();

        for (role, perms) in &held {
            // Keep the smallest id among identical roles.
            let covered_by = held.iter().find(|(other, other_perms)| {
                other.id != role.id
                    && perms.is_subset(other_perms)
                    && (perms != other_perms || other.id < role.id)
            });
            let Some((other, _)) = covered_by else {
                continue;
            };
            out.push(Optimization {
                id: format!("redundant-assignment:{}:{}", user.id, role.id),
                kind: OptimizationKind::RedundantAssignment,
                targets: vec![user.id.clone(), role.id.clone()],
                description: format!(
                    "Remove '{}' from {}; '{}' already grants all of it",
                    role.name, user.username, other.name
                ),
                impact: RiskLevel::Medium,
                reduction: 1,
            });
        }
    }
}

fn permission_set(role: &Role) -> BTreeSet<&str> {
    role.permissions.iter().map(String::as_str).collect()
}
