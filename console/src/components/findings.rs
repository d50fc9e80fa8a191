//! Shared list for role conflicts, policy conflicts and optimizations.
//!
//! Each finding kind is flattened into a `Finding` row so the three screens
//! render, resolve and dismiss through one component.

#[cfg(test)]
#[path = "findings_test.rs"]
mod findings_test;

use std::collections::BTreeSet;

use iam::RiskLevel;
use iam::conflicts::{PolicyConflict, RoleConflict};
use iam::optimize::Optimization;
use leptos::prelude::*;

use super::badge::{Badge, RiskBadge, Tone, policy_conflict_tone, role_conflict_tone};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub id: String,
    pub kind: &'static str,
    pub tone: Tone,
    pub severity: RiskLevel,
    pub description: String,
    /// Ids of the records involved, for display.
    pub involved: Vec<String>,
    /// Optional figure such as `-3 grants`.
    pub detail: Option<String>,
}

impl From<&RoleConflict> for Finding {
    fn from(c: &RoleConflict) -> Self {
        let involved = c.roles.iter().chain(&c.users).chain(&c.permissions).cloned().collect();
        Self {
            id: c.id.clone(),
            kind: c.kind.label(),
            tone: role_conflict_tone(c.kind),
            severity: c.severity,
            description: c.description.clone(),
            involved,
            detail: None,
        }
    }
}

impl From<&PolicyConflict> for Finding {
    fn from(c: &PolicyConflict) -> Self {
        Self {
            id: c.id.clone(),
            kind: c.kind.label(),
            tone: policy_conflict_tone(c.kind),
            severity: c.severity,
            description: c.description.clone(),
            involved: c.policies.clone(),
            detail: None,
        }
    }
}

impl From<&Optimization> for Finding {
    fn from(o: &Optimization) -> Self {
        Self {
            id: o.id.clone(),
            kind: o.kind.label(),
            tone: Tone::Info,
            severity: o.impact,
            description: o.description.clone(),
            involved: o.targets.clone(),
            detail: (o.reduction > 0).then(|| format!("-{} grants", o.reduction)),
        }
    }
}

/// Rows from any finding type.
pub fn to_findings<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<Finding>
where
    Finding: From<&'a T>,
{
    items.into_iter().map(Finding::from).collect()
}

#[component]
pub fn FindingsList(
    #[prop(into)] items: Signal<Vec<Finding>>,
    #[prop(into)] pending: Signal<BTreeSet<String>>,
    /// Hidden when `None` (policy conflicts have no backend resolve action).
    #[prop(optional)]
    resolve_label: Option<&'static str>,
    #[prop(optional)] on_resolve: Option<Callback<String>>,
    on_dismiss: Callback<String>,
    #[prop(into)] empty: String,
) -> impl IntoView {
    view! {
        <Show
            when=move || !items.get().is_empty()
            fallback=move || view! { <p class="panel__empty">{empty.clone()}</p> }
        >
            <ul class="findings">
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|f| {
                            let busy_id = f.id.clone();
                            let busy = move || pending.with(|p| p.contains(&busy_id));
                            let resolve_busy = busy.clone();
                            let resolve_id = f.id.clone();
                            let dismiss_id = f.id.clone();
                            view! {
                                <li class="findings__item">
                                    <div class="findings__head">
                                        <Badge tone=f.tone label=f.kind/>
                                        <RiskBadge risk=f.severity/>
                                        {f.detail.map(|d| view! { <span class="findings__detail">{d}</span> })}
                                    </div>
                                    <p class="findings__description">{f.description}</p>
                                    <p class="findings__involved">{f.involved.join(", ")}</p>
                                    <div class="findings__actions">
                                        {resolve_label
                                            .zip(on_resolve)
                                            .map(|(label, on_resolve)| {
                                                view! {
                                                    <button
                                                        class="btn btn--small btn--primary"
                                                        disabled=resolve_busy
                                                        on:click=move |_| on_resolve.run(resolve_id.clone())
                                                    >
                                                        {label}
                                                    </button>
                                                }
                                            })}
                                        <button
                                            class="btn btn--small"
                                            disabled=busy
                                            on:click=move |_| on_dismiss.run(dismiss_id.clone())
                                        >
                                            "Dismiss"
                                        </button>
                                    </div>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </Show>
    }
}
