//! Dashboard data: six independent fetches feeding one metrics view.
//!
//! Each fetch lands on its own; metrics are recomputed from whatever has
//! arrived so far, and failures are collected rather than blocking the rest.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use iam::query::sort_newest_first;
use iam::stats::{DashboardStats, risk_breakdown, top_actions};
use iam::{AbacPolicy, AuditLog, Permission, RiskLevel, Role, SecurityAlert, User};

use crate::net::error::ApiError;

/// Fetches issued on mount.
pub const FEED_COUNT: usize = 6;

/// One completed dashboard fetch.
#[derive(Clone, Debug)]
pub enum Feed {
    Users(Vec<User>),
    Roles(Vec<Role>),
    Permissions(Vec<Permission>),
    Policies(Vec<AbacPolicy>),
    Alerts(Vec<SecurityAlert>),
    AuditLogs(Vec<AuditLog>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub policies: Vec<AbacPolicy>,
    pub alerts: Vec<SecurityAlert>,
    pub logs: Vec<AuditLog>,
    /// Fetches finished, successful or not.
    pub completed: usize,
    pub errors: Vec<String>,
}

impl DashboardState {
    pub fn apply(&mut self, result: Result<Feed, ApiError>) {
        self.completed += 1;
        match result {
            Ok(Feed::Users(v)) => self.users = v,
            Ok(Feed::Roles(v)) => self.roles = v,
            Ok(Feed::Permissions(v)) => self.permissions = v,
            Ok(Feed::Policies(v)) => self.policies = v,
            Ok(Feed::Alerts(v)) => self.alerts = v,
            Ok(Feed::AuditLogs(mut v)) => {
                sort_newest_first(&mut v);
                self.logs = v;
            }
            Err(e) => {
                let message = e.to_string();
                if !self.errors.contains(&message) {
                    self.errors.push(message);
                }
            }
        }
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.completed < FEED_COUNT
    }

    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(
            &self.users,
            &self.roles,
            &self.permissions,
            &self.policies,
            &self.alerts,
            &self.logs,
        )
    }

    #[must_use]
    pub fn recent_activity(&self, n: usize) -> &[AuditLog] {
        &self.logs[..self.logs.len().min(n)]
    }

    #[must_use]
    pub fn risk_breakdown(&self) -> Vec<(RiskLevel, usize)> {
        risk_breakdown(&self.logs)
    }

    #[must_use]
    pub fn top_actions(&self, n: usize) -> Vec<(String, usize)> {
        top_actions(&self.logs, n)
    }

    /// Unresolved alerts, most severe first.
    #[must_use]
    pub fn open_alerts(&self) -> Vec<SecurityAlert> {
        let mut open: Vec<_> = self.alerts.iter().filter(|a| a.status.is_unresolved()).cloned().collect();
        open.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| b.created_at.cmp(&a.created_at)));
        open
    }
}
