//! Audit screen: the audit trail, security alerts and compliance reports.
//!
//! SYSTEM CONTEXT
//! ==============
//! The audit trail is re-fetched every `AUDIT_REFRESH_INTERVAL` while
//! auto-refresh is on. The loop lives as long as the page does and stops on
//! cleanup; switching tabs does not stop it.

use iam::query::{ListFilter, TimeWindow};
use iam::{AlertStatus, AuditOutcome, ComplianceStatus, RiskLevel};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::badge::{Badge, RiskBadge, alert_status_tone, compliance_tone};
use crate::components::filters::{ClearFilters, FilterSelect, SearchBox, parse_choice, text_choice};
use crate::components::form::enum_options;
use crate::components::pagination::{PageInfo, Pagination};
use crate::components::tabs::TabBar;
use crate::state::audit::{AuditState, AuditTab};
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;
use crate::util::format;

type Audit = RwSignal<AuditState>;

/// Fetch the audit trail and stamp it with the fetch time.
fn refresh_logs(audit: Audit, auth: RwSignal<AuthState>) {
    audit.update(|a| a.logs.start_loading());
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_audit_logs().await;
        if let Err(e) = &result {
            crate::util::auth::note_failure(auth, e);
        }
        audit.update(|a| a.apply_logs(result, format::now()));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = auth;
}

#[component]
pub fn AuditPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let audit: Audit = RwSignal::new(AuditState::default());

    refresh_logs(audit, auth);
    audit.update(|a| {
        a.alerts.start_loading();
        a.reports.start_loading();
    });

    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        use crate::net::api;
        use crate::state::audit::AUDIT_REFRESH_INTERVAL;
        use crate::util::retry::sleep;

        leptos::task::spawn_local(async move {
            let result = api::fetch_alerts().await;
            if let Err(e) = &result {
                crate::util::auth::note_failure(auth, e);
            }
            audit.update(|a| a.alerts.apply_fetch(result));
        });
        leptos::task::spawn_local(async move {
            let result = api::fetch_compliance_reports().await;
            if let Err(e) = &result {
                crate::util::auth::note_failure(auth, e);
            }
            audit.update(|a| a.reports.apply_fetch(result));
        });

        let alive = Arc::new(AtomicBool::new(true));
        let running = Arc::clone(&alive);
        leptos::task::spawn_local(async move {
            loop {
                sleep(AUDIT_REFRESH_INTERVAL).await;
                if !running.load(Ordering::Relaxed) {
                    break;
                }
                let wanted = audit.try_with_untracked(|a| a.auto_refresh && !a.logs.loading);
                match wanted {
                    Some(true) => refresh_logs(audit, auth),
                    Some(false) => {}
                    // Signal disposed with the page.
                    None => break,
                }
            }
        });
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    let tabs = AuditTab::ALL.into_iter().map(|t| (t, t.label())).collect::<Vec<_>>();

    view! {
        <div class="page audit-page">
            <header class="page__header">
                <h1>"Audit and compliance"</h1>
                <Show when=move || audit.with(|a| a.unresolved_alerts() > 0)>
                    <span class="page__status page__status--warn">
                        {move || audit.with(|a| format::count(a.unresolved_alerts(), "open alert", "open alerts"))}
                    </span>
                </Show>
            </header>
            <TabBar
                tabs
                active=Signal::derive(move || audit.with(|a| a.tab))
                on_select=Callback::new(move |t| audit.update(|a| a.tab = t))
            />
            {move || match audit.with(|a| a.tab) {
                AuditTab::Logs => view! { <LogsTab audit auth/> }.into_any(),
                AuditTab::Alerts => view! { <AlertsTab audit/> }.into_any(),
                AuditTab::Reports => view! { <ReportsTab audit/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn LogsTab(audit: Audit, auth: RwSignal<AuthState>) -> impl IntoView {
    let visible = Memo::new(move |_| audit.with(|a| a.logs.visible()));
    let risk_options = enum_options(RiskLevel::ALL, RiskLevel::as_str, RiskLevel::label);
    let outcome_options = enum_options(AuditOutcome::ALL, AuditOutcome::as_str, AuditOutcome::label);
    let action_options = Signal::derive(move || audit.with(|a| a.action_options().into_iter().map(|x| (x.clone(), x)).collect()));
    let window_options = TimeWindow::ALL
        .into_iter()
        .filter(|w| *w != TimeWindow::All)
        .map(|w| (w.as_str().to_owned(), w.label().to_owned()))
        .collect::<Vec<_>>();

    view! {
        <div class="toolbar">
            <SearchBox
                placeholder="Search user, action, resource or IP"
                value=Signal::derive(move || audit.with(|a| a.logs.filter.search.clone()))
                on_input=Callback::new(move |v: String| audit.update(|a| a.logs.update_filter(|f| f.search = v)))
            />
            <FilterSelect
                all_label="All risk levels"
                options=risk_options
                value=Signal::derive(move || audit.with(|a| a.logs.filter.risk.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| audit.update(|a| a.logs.update_filter(|f| f.risk = parse_choice(&v))))
            />
            <FilterSelect
                all_label="All outcomes"
                options=outcome_options
                value=Signal::derive(move || audit.with(|a| a.logs.filter.outcome.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| audit.update(|a| a.logs.update_filter(|f| f.outcome = parse_choice(&v))))
            />
            <FilterSelect
                all_label="All actions"
                options=action_options
                value=Signal::derive(move || audit.with(|a| a.logs.filter.action.clone().unwrap_or_default()))
                on_change=Callback::new(move |v: String| audit.update(|a| a.logs.update_filter(|f| f.action = text_choice(&v))))
            />
            <FilterSelect
                all_label="All time"
                options=window_options
                value=Signal::derive(move || {
                    audit.with(|a| match a.logs.filter.window {
                        TimeWindow::All => String::new(),
                        w => w.as_str().to_owned(),
                    })
                })
                on_change=Callback::new(move |v: String| audit.update(|a| a.set_window(TimeWindow::parse(&v), format::now())))
            />
            <ClearFilters
                active=Signal::derive(move || audit.with(|a| a.logs.filter.is_active()))
                on_clear=Callback::new(move |()| audit.update(|a| a.logs.clear_filter()))
            />
        </div>

        <div class="toolbar toolbar--secondary">
            <label class="toggle">
                <input
                    type="checkbox"
                    prop:checked=move || audit.with(|a| a.auto_refresh)
                    on:change=move |_| audit.update(AuditState::toggle_auto_refresh)
                />
                "Auto-refresh every 30s"
            </label>
            <button class="btn btn--small" disabled=move || audit.with(|a| a.logs.loading) on:click=move |_| refresh_logs(audit, auth)>
                "Refresh now"
            </button>
            <span class="toolbar__note">
                {move || {
                    audit.with(|a| match a.last_refreshed {
                        Some(ts) => format!("Last refreshed {}", format::timestamp(ts)),
                        None => "Not refreshed yet".to_owned(),
                    })
                }}
            </span>
        </div>

        <Show when=move || audit.with(|a| a.logs.error.is_some())>
            <p class="page__error">{move || audit.with(|a| a.logs.error.clone().unwrap_or_default())}</p>
        </Show>

        <table class="table">
            <thead>
                <tr>
                    <th>"Time"</th>
                    <th>"User"</th>
                    <th>"Action"</th>
                    <th>"Resource"</th>
                    <th>"Outcome"</th>
                    <th>"Risk"</th>
                    <th>"IP address"</th>
                </tr>
            </thead>
            <tbody>
                <Show when=move || audit.with(|a| a.logs.loaded) && visible.with(|p| p.items.is_empty())>
                    <tr>
                        <td colspan="7" class="table__empty">"No audit events match the current filters."</td>
                    </tr>
                </Show>
                {move || {
                    visible
                        .get()
                        .items
                        .into_iter()
                        .map(|log| {
                            let resource = match &log.resource_id {
                                Some(id) => format!("{}/{id}", log.resource),
                                None => log.resource.clone(),
                            };
                            view! {
                                <tr title=log.details.clone().unwrap_or_default()>
                                    <td>{format::timestamp(log.timestamp)}</td>
                                    <td>{log.username.clone()}</td>
                                    <td><code>{log.action.clone()}</code></td>
                                    <td>{resource}</td>
                                    <td class=format!("outcome outcome--{}", log.outcome.as_str())>{log.outcome.label()}</td>
                                    <td><RiskBadge risk=log.risk/></td>
                                    <td>{log.ip_address.clone()}</td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>

        <Pagination
            info=Signal::derive(move || visible.with(PageInfo::of))
            on_page=Callback::new(move |page| audit.update(|a| a.logs.go_to(page)))
            on_page_size=Callback::new(move |size| audit.update(|a| a.logs.set_page_size(size)))
        />
    }
}

#[component]
fn AlertsTab(audit: Audit) -> impl IntoView {
    let visible = Memo::new(move |_| audit.with(|a| a.alerts.visible()));
    let severity_options = enum_options(RiskLevel::ALL, RiskLevel::as_str, RiskLevel::label);
    let status_options = enum_options(AlertStatus::ALL, AlertStatus::as_str, AlertStatus::label);

    view! {
        <div class="toolbar">
            <SearchBox
                placeholder="Search alerts"
                value=Signal::derive(move || audit.with(|a| a.alerts.filter.search.clone()))
                on_input=Callback::new(move |v: String| audit.update(|a| a.alerts.update_filter(|f| f.search = v)))
            />
            <FilterSelect
                all_label="All severities"
                options=severity_options
                value=Signal::derive(move || audit.with(|a| a.alerts.filter.severity.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| audit.update(|a| a.alerts.update_filter(|f| f.severity = parse_choice(&v))))
            />
            <FilterSelect
                all_label="All statuses"
                options=status_options
                value=Signal::derive(move || audit.with(|a| a.alerts.filter.status.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| audit.update(|a| a.alerts.update_filter(|f| f.status = parse_choice(&v))))
            />
        </div>

        <Show when=move || audit.with(|a| a.alerts.error.is_some())>
            <p class="page__error">{move || audit.with(|a| a.alerts.error.clone().unwrap_or_default())}</p>
        </Show>

        <table class="table">
            <thead>
                <tr>
                    <th>"Alert"</th>
                    <th>"Severity"</th>
                    <th>"Status"</th>
                    <th>"User"</th>
                    <th>"Raised"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    visible
                        .get()
                        .items
                        .into_iter()
                        .map(|alert| {
                            view! {
                                <tr>
                                    <td>
                                        <strong>{alert.title.clone()}</strong>
                                        <span class="table__sub">{alert.description.clone()}</span>
                                    </td>
                                    <td><RiskBadge risk=alert.severity/></td>
                                    <td><Badge tone=alert_status_tone(alert.status) label=alert.status.label()/></td>
                                    <td>{alert.user_id.clone().unwrap_or_else(|| "-".to_owned())}</td>
                                    <td>{format::timestamp(alert.created_at)}</td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>

        <Pagination
            info=Signal::derive(move || visible.with(PageInfo::of))
            on_page=Callback::new(move |page| audit.update(|a| a.alerts.go_to(page)))
            on_page_size=Callback::new(move |size| audit.update(|a| a.alerts.set_page_size(size)))
        />
    }
}

#[component]
fn ReportsTab(audit: Audit) -> impl IntoView {
    let visible = Memo::new(move |_| audit.with(|a| a.reports.visible()));
    let status_options = enum_options(ComplianceStatus::ALL, ComplianceStatus::as_str, ComplianceStatus::label);

    view! {
        <div class="toolbar">
            <SearchBox
                placeholder="Search report or framework"
                value=Signal::derive(move || audit.with(|a| a.reports.filter.search.clone()))
                on_input=Callback::new(move |v: String| audit.update(|a| a.reports.update_filter(|f| f.search = v)))
            />
            <FilterSelect
                all_label="All statuses"
                options=status_options
                value=Signal::derive(move || audit.with(|a| a.reports.filter.status.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| audit.update(|a| a.reports.update_filter(|f| f.status = parse_choice(&v))))
            />
        </div>

        <Show when=move || audit.with(|a| a.reports.error.is_some())>
            <p class="page__error">{move || audit.with(|a| a.reports.error.clone().unwrap_or_default())}</p>
        </Show>

        <table class="table">
            <thead>
                <tr>
                    <th>"Report"</th>
                    <th>"Framework"</th>
                    <th>"Status"</th>
                    <th>"Score"</th>
                    <th>"Findings"</th>
                    <th>"Generated"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    visible
                        .get()
                        .items
                        .into_iter()
                        .map(|report| {
                            view! {
                                <tr>
                                    <td><strong>{report.name.clone()}</strong></td>
                                    <td>{report.framework.clone()}</td>
                                    <td><Badge tone=compliance_tone(report.status) label=report.status.label()/></td>
                                    <td>
                                        <meter min="0" max="100" value=report.score.to_string()></meter>
                                        {format!(" {}%", report.score)}
                                    </td>
                                    <td>{report.findings}</td>
                                    <td>{format::date(report.generated_at)}</td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>

        <Pagination
            info=Signal::derive(move || visible.with(PageInfo::of))
            on_page=Callback::new(move |page| audit.update(|a| a.reports.go_to(page)))
            on_page_size=Callback::new(move |size| audit.update(|a| a.reports.set_page_size(size)))
        />
    }
}
