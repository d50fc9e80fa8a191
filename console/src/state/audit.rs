//! Audit screen state: logs, security alerts and compliance reports.
//!
//! DESIGN
//! ======
//! Logs re-fetch every `AUDIT_REFRESH_INTERVAL` while auto-refresh is on. A
//! relative time window is resolved to an absolute lower bound against the
//! time of the latest fetch, so the window slides forward with each refresh.

#[cfg(test)]
#[path = "audit_test.rs"]
mod audit_test;

use std::time::Duration;

use iam::query::{AlertFilter, AuditFilter, ReportFilter, TimeWindow, distinct, sort_newest_first};
use iam::{AuditLog, ComplianceReport, SecurityAlert, Timestamp};

use super::list::ListState;
use crate::net::error::ApiError;

pub const AUDIT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuditTab {
    #[default]
    Logs,
    Alerts,
    Reports,
}

impl AuditTab {
    pub const ALL: [AuditTab; 3] = [Self::Logs, Self::Alerts, Self::Reports];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Logs => "Audit logs",
            Self::Alerts => "Security alerts",
            Self::Reports => "Compliance reports",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuditState {
    pub tab: AuditTab,
    pub logs: ListState<AuditLog, AuditFilter>,
    pub alerts: ListState<SecurityAlert, AlertFilter>,
    pub reports: ListState<ComplianceReport, ReportFilter>,
    pub auto_refresh: bool,
    pub last_refreshed: Option<Timestamp>,
}

impl Default for AuditState {
    fn default() -> Self {
        Self {
            tab: AuditTab::default(),
            logs: ListState::default(),
            alerts: ListState::default(),
            reports: ListState::default(),
            auto_refresh: true,
            last_refreshed: None,
        }
    }
}

impl AuditState {
    /// Store a log fetch made at `now`.
    pub fn apply_logs(&mut self, result: Result<Vec<AuditLog>, ApiError>, now: Timestamp) {
        let ok = result.is_ok();
        let result = result.map(|mut logs| {
            sort_newest_first(&mut logs);
            logs
        });
        let window = self.logs.filter.window;
        self.logs.filter.set_window(window, now);
        self.logs.apply_fetch(result);
        if ok {
            self.last_refreshed = Some(now);
        }
    }

    /// Select a time window; resolves against the last refresh when known.
    pub fn set_window(&mut self, window: TimeWindow, now: Timestamp) {
        let anchor = self.last_refreshed.unwrap_or(now);
        self.logs.update_filter(|f| f.set_window(window, anchor));
    }

    pub fn toggle_auto_refresh(&mut self) {
        self.auto_refresh = !self.auto_refresh;
    }

    /// Distinct actions present in the fetched logs, for the action filter.
    #[must_use]
    pub fn action_options(&self) -> Vec<String> {
        distinct(self.logs.items.iter().map(|l| l.action.as_str()))
    }

    /// Alerts that are still open or under investigation.
    #[must_use]
    pub fn unresolved_alerts(&self) -> usize {
        self.alerts.items.iter().filter(|a| a.status.is_unresolved()).count()
    }
}
