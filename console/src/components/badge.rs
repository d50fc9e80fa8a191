//! Colored pills for risk levels and record statuses.

#[cfg(test)]
#[path = "badge_test.rs"]
mod badge_test;

use iam::conflicts::{PolicyConflictKind, RoleConflictKind};
use iam::{AlertStatus, ComplianceStatus, PolicyEffect, PolicyStatus, RiskLevel, UserStatus};
use leptos::prelude::*;

/// Color family for a badge; maps to `badge--{tone}` in the stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Good,
    Info,
    Warn,
    Bad,
    Severe,
}

impl Tone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Neutral => "badge badge--neutral",
            Self::Good => "badge badge--good",
            Self::Info => "badge badge--info",
            Self::Warn => "badge badge--warn",
            Self::Bad => "badge badge--bad",
            Self::Severe => "badge badge--severe",
        }
    }
}

#[must_use]
pub fn risk_tone(risk: RiskLevel) -> Tone {
    match risk {
        RiskLevel::Low => Tone::Good,
        RiskLevel::Medium => Tone::Warn,
        RiskLevel::High => Tone::Bad,
        RiskLevel::Critical => Tone::Severe,
    }
}

#[must_use]
pub fn user_status_tone(status: UserStatus) -> Tone {
    match status {
        UserStatus::Active => Tone::Good,
        UserStatus::Pending => Tone::Info,
        UserStatus::Inactive => Tone::Neutral,
        UserStatus::Suspended => Tone::Bad,
    }
}

#[must_use]
pub fn policy_status_tone(status: PolicyStatus) -> Tone {
    match status {
        PolicyStatus::Active => Tone::Good,
        PolicyStatus::Draft => Tone::Info,
        PolicyStatus::Inactive => Tone::Neutral,
    }
}

#[must_use]
pub fn effect_tone(effect: PolicyEffect) -> Tone {
    match effect {
        PolicyEffect::Allow => Tone::Good,
        PolicyEffect::Deny => Tone::Bad,
    }
}

#[must_use]
pub fn alert_status_tone(status: AlertStatus) -> Tone {
    match status {
        AlertStatus::Open => Tone::Bad,
        AlertStatus::Investigating => Tone::Warn,
        AlertStatus::Resolved => Tone::Good,
        AlertStatus::Dismissed => Tone::Neutral,
    }
}

#[must_use]
pub fn compliance_tone(status: ComplianceStatus) -> Tone {
    match status {
        ComplianceStatus::Compliant => Tone::Good,
        ComplianceStatus::InProgress => Tone::Info,
        ComplianceStatus::NonCompliant => Tone::Bad,
    }
}

#[must_use]
pub fn role_conflict_tone(kind: RoleConflictKind) -> Tone {
    match kind {
        RoleConflictKind::SeparationOfDuties => Tone::Severe,
        RoleConflictKind::DuplicateRoles | RoleConflictKind::RedundantAssignment => Tone::Info,
    }
}

#[must_use]
pub fn policy_conflict_tone(kind: PolicyConflictKind) -> Tone {
    match kind {
        PolicyConflictKind::Contradictory => Tone::Bad,
        PolicyConflictKind::Shadowed => Tone::Warn,
        PolicyConflictKind::Duplicate => Tone::Info,
    }
}

#[component]
pub fn Badge(tone: Tone, #[prop(into)] label: String) -> impl IntoView {
    view! { <span class=tone.class()>{label}</span> }
}

#[component]
pub fn RiskBadge(risk: RiskLevel) -> impl IntoView {
    view! { <Badge tone=risk_tone(risk) label=risk.label()/> }
}
