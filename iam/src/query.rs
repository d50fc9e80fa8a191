//! In-memory list querying: search, categorical filters and pagination.
//!
//! DESIGN
//! ======
//! Every list screen holds its full fetched collection and derives the visible
//! page on each render: filter (AND across all active predicates), then slice.
//! Filters are plain data so screen state can be compared and cloned freely.
//!
//! INVARIANTS
//! ==========
//! - `filter_items` output is an order-preserving subset of its input.
//! - A `Pager` page is always within `1..=total_pages` once clamped, and the
//!   slice it yields never extends past the end of the list.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::BTreeSet;
use std::ops::Range;

use chrono::TimeDelta;

use crate::model::{
    AbacPolicy, AlertStatus, AuditLog, AuditOutcome, ComplianceReport, ComplianceStatus, Permission, PermissionCategory, PermissionScope,
    PolicyEffect, PolicyStatus, Resource, RiskLevel, Role, SecurityAlert, Timestamp, User, UserStatus,
};

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A predicate over list items with AND semantics across its fields.
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// True when at least one predicate would exclude something.
    fn is_active(&self) -> bool;
}

/// Keep items matching `filter`, preserving input order.
#[must_use]
pub fn filter_items<T: Clone, F: ListFilter<T>>(items: &[T], filter: &F) -> Vec<T> {
    items.iter().filter(|item| filter.matches(item)).cloned().collect()
}

/// Normalized search needle, or `None` when the input is blank.
fn needle(search: &str) -> Option<String> {
    let trimmed = search.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn search_hits<'a>(search: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let Some(needle) = needle(search) else {
        return true;
    };
    fields.into_iter().any(|field| field.to_lowercase().contains(&needle))
}

fn option_hits<T: PartialEq>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.is_none_or(|w| w == actual)
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: String,
    pub status: Option<UserStatus>,
    /// Role id the user must hold.
    pub role: Option<String>,
    pub department: Option<String>,
}

impl ListFilter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        let full_name = user.full_name();
        let text = [
            user.username.as_str(),
            user.email.as_str(),
            user.first_name.as_str(),
            user.last_name.as_str(),
            full_name.as_str(),
            user.department.as_deref().unwrap_or_default(),
        ];
        search_hits(&self.search, text)
            && option_hits(self.status.as_ref(), &user.status)
            && self.role.as_deref().is_none_or(|r| user.has_role(r))
            && self
                .department
                .as_deref()
                .is_none_or(|d| user.department.as_deref() == Some(d))
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some() || self.status.is_some() || self.role.is_some() || self.department.is_some()
    }
}

// =============================================================================
// ROLES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleKind {
    System,
    Custom,
}

impl RoleKind {
    pub const ALL: [RoleKind; 2] = [Self::System, Self::Custom];

    #[must_use]
    pub fn of(role: &Role) -> Self {
        if role.is_system { Self::System } else { Self::Custom }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Custom => "Custom",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Custom => "custom",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw.trim())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleFilter {
    pub search: String,
    pub kind: Option<RoleKind>,
}

impl ListFilter<Role> for RoleFilter {
    fn matches(&self, role: &Role) -> bool {
        search_hits(&self.search, [role.name.as_str(), role.description.as_str()])
            && option_hits(self.kind.as_ref(), &RoleKind::of(role))
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some() || self.kind.is_some()
    }
}

// =============================================================================
// PERMISSIONS, CATEGORIES, RESOURCES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionFilter {
    pub search: String,
    /// Category id.
    pub category: Option<String>,
    pub scope: Option<PermissionScope>,
    pub risk: Option<RiskLevel>,
}

impl ListFilter<Permission> for PermissionFilter {
    fn matches(&self, p: &Permission) -> bool {
        let text = [
            p.name.as_str(),
            p.description.as_str(),
            p.resource.as_str(),
            p.action.as_str(),
        ];
        search_hits(&self.search, text)
            && option_hits(self.category.as_ref(), &p.category)
            && option_hits(self.scope.as_ref(), &p.scope)
            && option_hits(self.risk.as_ref(), &p.risk)
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some() || self.category.is_some() || self.scope.is_some() || self.risk.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub search: String,
}

impl ListFilter<PermissionCategory> for CategoryFilter {
    fn matches(&self, c: &PermissionCategory) -> bool {
        search_hits(&self.search, [c.name.as_str(), c.description.as_str()])
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub search: String,
    pub kind: Option<String>,
}

impl ListFilter<Resource> for ResourceFilter {
    fn matches(&self, r: &Resource) -> bool {
        let text = [
            r.name.as_str(),
            r.kind.as_str(),
            r.description.as_str(),
            r.owner.as_deref().unwrap_or_default(),
        ];
        search_hits(&self.search, text) && option_hits(self.kind.as_ref(), &r.kind)
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some() || self.kind.is_some()
    }
}

// =============================================================================
// POLICIES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyFilter {
    pub search: String,
    pub effect: Option<PolicyEffect>,
    pub status: Option<PolicyStatus>,
}

impl ListFilter<AbacPolicy> for PolicyFilter {
    fn matches(&self, p: &AbacPolicy) -> bool {
        let text = [p.name.as_str(), p.description.as_str()]
            .into_iter()
            .chain(p.resources.iter().map(String::as_str))
            .chain(p.actions.iter().map(String::as_str));
        search_hits(&self.search, text)
            && option_hits(self.effect.as_ref(), &p.effect)
            && option_hits(self.status.as_ref(), &p.status)
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some() || self.effect.is_some() || self.status.is_some()
    }
}

// =============================================================================
// AUDIT LOGS AND ALERTS
// =============================================================================

/// Relative time window for audit log browsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeWindow {
    #[default]
    All,
    LastHour,
    Last24Hours,
    Last7Days,
    Last30Days,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 5] = [
        Self::All,
        Self::LastHour,
        Self::Last24Hours,
        Self::Last7Days,
        Self::Last30Days,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LastHour => "1h",
            Self::Last24Hours => "24h",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::LastHour => "Last hour",
            Self::Last24Hours => "Last 24 hours",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == raw.trim())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn duration(self) -> Option<TimeDelta> {
        match self {
            Self::All => None,
            Self::LastHour => Some(TimeDelta::hours(1)),
            Self::Last24Hours => Some(TimeDelta::hours(24)),
            Self::Last7Days => Some(TimeDelta::days(7)),
            Self::Last30Days => Some(TimeDelta::days(30)),
        }
    }

    /// Earliest timestamp inside the window ending at `now`.
    #[must_use]
    pub fn since(self, now: Timestamp) -> Option<Timestamp> {
        self.duration().map(|d| now - d)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub search: String,
    pub risk: Option<RiskLevel>,
    pub outcome: Option<AuditOutcome>,
    pub action: Option<String>,
    pub window: TimeWindow,
    /// Resolved lower bound for `window`; set through `set_window`.
    pub since: Option<Timestamp>,
}

impl AuditFilter {
    pub fn set_window(&mut self, window: TimeWindow, now: Timestamp) {
        self.window = window;
        self.since = window.since(now);
    }
}

impl ListFilter<AuditLog> for AuditFilter {
    fn matches(&self, log: &AuditLog) -> bool {
        let text = [
            log.username.as_str(),
            log.action.as_str(),
            log.resource.as_str(),
            log.ip_address.as_str(),
            log.details.as_deref().unwrap_or_default(),
        ];
        search_hits(&self.search, text)
            && option_hits(self.risk.as_ref(), &log.risk)
            && option_hits(self.outcome.as_ref(), &log.outcome)
            && option_hits(self.action.as_ref(), &log.action)
            && self.since.is_none_or(|since| log.timestamp >= since)
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some()
            || self.risk.is_some()
            || self.outcome.is_some()
            || self.action.is_some()
            || self.since.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub search: String,
    pub severity: Option<RiskLevel>,
    pub status: Option<AlertStatus>,
}

impl ListFilter<SecurityAlert> for AlertFilter {
    fn matches(&self, a: &SecurityAlert) -> bool {
        search_hits(&self.search, [a.title.as_str(), a.description.as_str()])
            && option_hits(self.severity.as_ref(), &a.severity)
            && option_hits(self.status.as_ref(), &a.status)
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some() || self.severity.is_some() || self.status.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub search: String,
    pub status: Option<ComplianceStatus>,
}

impl ListFilter<ComplianceReport> for ReportFilter {
    fn matches(&self, r: &ComplianceReport) -> bool {
        search_hits(&self.search, [r.name.as_str(), r.framework.as_str()])
            && option_hits(self.status.as_ref(), &r.status)
    }

    fn is_active(&self) -> bool {
        needle(&self.search).is_some() || self.status.is_some()
    }
}

/// Newest first; equal timestamps keep a stable id order.
pub fn sort_newest_first(logs: &mut [AuditLog]) {
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}

/// Sorted distinct non-empty values, for building filter dropdowns.
#[must_use]
pub fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// =============================================================================
// PAGINATION
// =============================================================================

/// 1-based page cursor over a list whose length is supplied per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Never less than 1, so an empty list still has one (empty) page.
    #[must_use]
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Change the page size and return to the first page. Zero is rejected.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    /// Jump to `page`, clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, self.total_pages(total));
    }

    pub fn next(&mut self, total: usize) {
        self.go_to(self.page.saturating_add(1), total);
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Pull the page back inside range after the list shrank.
    pub fn clamp(&mut self, total: usize) {
        self.go_to(self.page, total);
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self, total: usize) -> bool {
        self.page < self.total_pages(total)
    }

    /// Index range of the current page within a list of `total` items.
    #[must_use]
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}

/// One rendered page plus the numbers the pagination bar shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-based index of the first shown item, 0 when empty.
    #[must_use]
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }

    /// Footer text such as `Showing 11-20 of 42`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Showing {}-{} of {}", self.first_index(), self.last_index(), self.total)
    }
}

/// Slice `items` at the pager's position, clamping a stale page first.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], pager: &Pager) -> Page<T> {
    let mut pager = *pager;
    pager.clamp(items.len());
    Page {
        items: pager.slice(items).to_vec(),
        total: items.len(),
        page: pager.page(),
        page_size: pager.page_size(),
        total_pages: pager.total_pages(items.len()),
    }
}
