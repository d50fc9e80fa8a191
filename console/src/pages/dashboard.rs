//! Landing page: headline metrics, recent activity and open alerts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Issues its six collection fetches in parallel on mount and renders
//! metrics from whatever has arrived; there is no refresh loop here.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::badge::{Badge, RiskBadge, alert_status_tone};
use crate::components::stat_card::StatCard;
use crate::state::auth::AuthState;
use crate::state::dashboard::DashboardState;
use crate::util::auth::install_unauth_redirect;
use crate::util::format;

const RECENT_ACTIVITY: usize = 8;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let data = RwSignal::new(DashboardState::default());

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api;
        use crate::net::error::ApiError;
        use crate::state::dashboard::Feed;

        fn spawn_feed<T, Fut>(data: RwSignal<DashboardState>, auth: RwSignal<AuthState>, fut: Fut, wrap: fn(T) -> Feed)
        where
            Fut: std::future::Future<Output = Result<T, ApiError>> + 'static,
            T: 'static,
        {
            leptos::task::spawn_local(async move {
                let result = fut.await.map(wrap);
                if let Err(e) = &result {
                    crate::util::auth::note_failure(auth, e);
                }
                data.update(|d| d.apply(result));
            });
        }

        spawn_feed(data, auth, api::fetch_users(), Feed::Users);
        spawn_feed(data, auth, api::fetch_roles(), Feed::Roles);
        spawn_feed(data, auth, api::fetch_permissions(), Feed::Permissions);
        spawn_feed(data, auth, api::fetch_policies(), Feed::Policies);
        spawn_feed(data, auth, api::fetch_alerts(), Feed::Alerts);
        spawn_feed(data, auth, api::fetch_audit_logs(), Feed::AuditLogs);
    }

    let stats = Memo::new(move |_| data.with(DashboardState::stats));
    let stat = move |get: fn(&iam::stats::DashboardStats) -> String| Signal::derive(move || stats.with(get));

    view! {
        <div class="page dashboard-page">
            <header class="page__header">
                <h1>"Dashboard"</h1>
                <Show when=move || data.with(DashboardState::loading)>
                    <span class="page__status">"Loading..."</span>
                </Show>
            </header>

            <Show when=move || data.with(|d| !d.errors.is_empty())>
                <div class="page__error">
                    {move || data.with(|d| d.errors.iter().map(|e| view! { <p>{e.clone()}</p> }).collect_view())}
                </div>
            </Show>

            <div class="stat-grid">
                <StatCard
                    label="Users"
                    href="/users"
                    value=stat(|s| s.total_users.to_string())
                    detail=stat(|s| format!("{} active, {} suspended", s.active_users, s.suspended_users))
                />
                <StatCard label="MFA coverage" href="/users" value=stat(|s| format!("{}%", s.mfa_percent))/>
                <StatCard
                    label="Roles"
                    href="/roles"
                    value=stat(|s| s.total_roles.to_string())
                    detail=stat(|s| format::count(s.total_permissions, "permission", "permissions"))
                />
                <StatCard label="Active policies" href="/policies" value=stat(|s| s.active_policies.to_string())/>
                <StatCard
                    label="Open alerts"
                    href="/audit"
                    value=stat(|s| s.open_alerts.to_string())
                    warn=Signal::derive(move || stats.with(|s| s.open_alerts > 0))
                />
                <StatCard
                    label="High-risk events"
                    href="/audit"
                    value=stat(|s| s.high_risk_events.to_string())
                    warn=Signal::derive(move || stats.with(|s| s.high_risk_events > 0))
                />
            </div>

            <div class="dashboard-page__columns">
                <section class="panel">
                    <h2>"Recent activity"</h2>
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"When"</th>
                                <th>"User"</th>
                                <th>"Action"</th>
                                <th>"Resource"</th>
                                <th>"Risk"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let now = format::now();
                                data.with(|d| {
                                    d.recent_activity(RECENT_ACTIVITY)
                                        .iter()
                                        .map(|log| {
                                            view! {
                                                <tr>
                                                    <td title=format::timestamp(log.timestamp)>{format::relative(log.timestamp, now)}</td>
                                                    <td>{log.username.clone()}</td>
                                                    <td>{log.action.clone()}</td>
                                                    <td>{log.resource.clone()}</td>
                                                    <td><RiskBadge risk=log.risk/></td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                })
                            }}
                        </tbody>
                    </table>
                </section>

                <section class="panel">
                    <h2>"Open alerts"</h2>
                    <ul class="alert-list">
                        {move || {
                            data.with(DashboardState::open_alerts)
                                .into_iter()
                                .map(|alert| {
                                    view! {
                                        <li class="alert-list__item">
                                            <RiskBadge risk=alert.severity/>
                                            <Badge tone=alert_status_tone(alert.status) label=alert.status.label()/>
                                            <strong>{alert.title}</strong>
                                            <p>{alert.description}</p>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>

                    <h2>"Events by risk"</h2>
                    <ul class="risk-bars">
                        {move || {
                            data.with(DashboardState::risk_breakdown)
                                .into_iter()
                                .map(|(risk, n)| {
                                    view! {
                                        <li class="risk-bars__row">
                                            <RiskBadge risk/>
                                            <span class="risk-bars__count">{n}</span>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>

                    <h2>"Top actions"</h2>
                    <ol class="top-actions">
                        {move || {
                            data.with(|d| d.top_actions(5))
                                .into_iter()
                                .map(|(action, n)| view! { <li>{format!("{action} ({n})")}</li> })
                                .collect_view()
                        }}
                    </ol>
                </section>
            </div>
        </div>
    }
}
