//! Dashboard metrics computed from loaded lists.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{AbacPolicy, AuditLog, Permission, RiskLevel, Role, SecurityAlert, User, UserStatus};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_users: usize,
    pub suspended_users: usize,
    /// Rounded percentage of users with MFA enabled; 0 with no users.
    pub mfa_percent: u8,
    pub total_roles: usize,
    pub total_permissions: usize,
    pub active_policies: usize,
    pub open_alerts: usize,
    /// Audit entries at high or critical risk.
    pub high_risk_events: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(
        users: &[User],
        roles: &[Role],
        permissions: &[Permission],
        policies: &[AbacPolicy],
        alerts: &[SecurityAlert],
        logs: &[AuditLog],
    ) -> Self {
        let count = |status: UserStatus| users.iter().filter(|u| u.status == status).count();
        Self {
            total_users: users.len(),
            active_users: count(UserStatus::Active),
            suspended_users: count(UserStatus::Suspended),
            mfa_percent: percent(users.iter().filter(|u| u.mfa_enabled).count(), users.len()),
            total_roles: roles.len(),
            total_permissions: permissions.len(),
            active_policies: policies.iter().filter(|p| p.is_active()).count(),
            open_alerts: alerts.iter().filter(|a| a.status.is_unresolved()).count(),
            high_risk_events: logs.iter().filter(|l| l.risk >= RiskLevel::High).count(),
        }
    }
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 100 + whole / 2) / whole;
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Count of audit entries per risk level, every level present.
#[must_use]
pub fn risk_breakdown(logs: &[AuditLog]) -> Vec<(RiskLevel, usize)> {
    RiskLevel::ALL
        .iter()
        .map(|level| (*level, logs.iter().filter(|l| l.risk == *level).count()))
        .collect()
}

/// The `n` most frequent actions, most frequent first, ties by name.
#[must_use]
pub fn top_actions(logs: &[AuditLog], n: usize) -> Vec<(String, usize)> {
    let mut counts = BTreeMap::<&str, usize>::new();
    for log in logs {
        *counts.entry(log.action.as_str()).or_default() += 1;
    }
    let mut ranked = counts
        .into_iter()
        .map(|(action, count)| (action.to_owned(), count))
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
