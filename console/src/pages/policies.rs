//! Policies screen: ABAC policy table, the policy tester and the conflict
//! report on three tabs.
//!
//! DESIGN
//! ======
//! Policy conflicts are derived from the loaded policies only; the backend
//! keeps no record of them, so dismissing one hides it until the page is
//! reloaded.

use iam::conflicts::{PolicyConflict, detect_policy_conflicts};
use iam::query::{ListFilter, PolicyFilter};
use iam::validate::PolicyForm;
use iam::{AbacPolicy, PolicyEffect, PolicyStatus};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::crud::{load_list, pending_delete_message, spawn_delete, spawn_save};
use crate::components::badge::{Badge, effect_tone, policy_status_tone};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::filters::{ClearFilters, FilterSelect, SearchBox, parse_choice};
use crate::components::findings::{FindingsList, to_findings};
use crate::components::form::enum_options;
use crate::components::pagination::{PageInfo, Pagination};
use crate::components::policy_dialog::PolicyDialog;
use crate::components::policy_test_panel::PolicyTestPanel;
use crate::components::tabs::TabBar;
use crate::net::api;
use crate::state::analysis::{AnalysisState, Outcome};
use crate::state::auth::AuthState;
use crate::state::dialog::DialogState;
use crate::state::list::ListState;
use crate::state::ui::PoliciesTab;
use crate::util::auth::install_unauth_redirect;

type Policies = RwSignal<ListState<AbacPolicy, PolicyFilter>>;

#[component]
pub fn PoliciesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let tab = RwSignal::new(PoliciesTab::default());
    let policies: Policies = RwSignal::new(ListState::default());
    let conflicts = RwSignal::new(AnalysisState::<PolicyConflict>::default());

    load_list(policies, auth, api::fetch_policies);

    Effect::new(move |_| {
        let found = policies.with(|p| detect_policy_conflicts(&p.items));
        conflicts.update(|c| c.set_detected(found));
    });

    let policy_list = Signal::derive(move || policies.with(|s| s.items.clone()));
    let tabs = PoliciesTab::ALL.into_iter().map(|t| (t, t.label())).collect::<Vec<_>>();

    view! {
        <div class="page policies-page">
            <header class="page__header">
                <h1>"Access policies"</h1>
            </header>
            <TabBar tabs active=tab on_select=Callback::new(move |t| tab.set(t))/>
            {move || match tab.get() {
                PoliciesTab::Policies => view! { <PoliciesTable policies auth/> }.into_any(),
                PoliciesTab::Test => view! { <PolicyTestPanel policies=policy_list/> }.into_any(),
                PoliciesTab::Conflicts => view! { <ConflictsPanel conflicts/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn PoliciesTable(policies: Policies, auth: RwSignal<AuthState>) -> impl IntoView {
    let dialog = RwSignal::new(DialogState::<PolicyForm>::default());
    let pending_delete = RwSignal::new(None::<String>);
    let visible = Memo::new(move |_| policies.with(ListState::visible));

    let on_save = Callback::new(move |form: PolicyForm| {
        let payload = form.to_payload();
        let id = dialog.with_untracked(|d| d.mode.edit_id().map(str::to_owned));
        spawn_save(policies, dialog, auth, async move {
            match id {
                Some(id) => api::update_policy(&id, &payload).await,
                None => api::create_policy(&payload).await,
            }
        });
    });
    let on_confirm_delete = Callback::new(move |()| {
        if let Some(id) = pending_delete.get_untracked() {
            pending_delete.set(None);
            spawn_delete(policies, auth, id.clone(), async move { api::delete_policy(&id).await });
        }
    });

    let effect_options = enum_options(PolicyEffect::ALL, PolicyEffect::as_str, PolicyEffect::label);
    let status_options = enum_options(PolicyStatus::ALL, PolicyStatus::as_str, PolicyStatus::label);

    view! {
        <div class="toolbar">
            <SearchBox
                placeholder="Search policies"
                value=Signal::derive(move || policies.with(|s| s.filter.search.clone()))
                on_input=Callback::new(move |v: String| policies.update(|s| s.update_filter(|f| f.search = v)))
            />
            <FilterSelect
                all_label="Allow and deny"
                options=effect_options
                value=Signal::derive(move || policies.with(|s| s.filter.effect.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| policies.update(|s| s.update_filter(|f| f.effect = parse_choice(&v))))
            />
            <FilterSelect
                all_label="All statuses"
                options=status_options
                value=Signal::derive(move || policies.with(|s| s.filter.status.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| policies.update(|s| s.update_filter(|f| f.status = parse_choice(&v))))
            />
            <ClearFilters
                active=Signal::derive(move || policies.with(|s| s.filter.is_active()))
                on_clear=Callback::new(move |()| policies.update(ListState::clear_filter))
            />
            <button class="btn btn--primary" on:click=move |_| dialog.update(DialogState::open_create)>
                "+ New policy"
            </button>
        </div>

        <Show when=move || policies.with(|s| s.error.is_some())>
            <p class="page__error">{move || policies.with(|s| s.error.clone().unwrap_or_default())}</p>
        </Show>

        <table class="table">
            <thead>
                <tr>
                    <th>"Policy"</th>
                    <th>"Effect"</th>
                    <th>"Priority"</th>
                    <th>"Resources"</th>
                    <th>"Actions"</th>
                    <th>"Conditions"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <Show when=move || policies.with(|s| s.loaded) && visible.with(|p| p.items.is_empty())>
                    <tr>
                        <td colspan="8" class="table__empty">"No policies match the current filters."</td>
                    </tr>
                </Show>
                {move || {
                    visible
                        .get()
                        .items
                        .into_iter()
                        .map(|p| {
                            let edit = p.clone();
                            let delete_id = p.id.clone();
                            view! {
                                <tr>
                                    <td>
                                        <strong>{p.name.clone()}</strong>
                                        <span class="table__sub">{p.description.clone()}</span>
                                    </td>
                                    <td><Badge tone=effect_tone(p.effect) label=p.effect.label()/></td>
                                    <td>{p.priority}</td>
                                    <td><code>{p.resources.join(", ")}</code></td>
                                    <td>{p.actions.join(", ")}</td>
                                    <td>{p.conditions.len()}</td>
                                    <td><Badge tone=policy_status_tone(p.status) label=p.status.label()/></td>
                                    <td class="table__actions">
                                        <button
                                            class="btn btn--small"
                                            on:click=move |_| {
                                                dialog.update(|d| d.open_edit(edit.id.clone(), PolicyForm::from_policy(&edit)));
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            class="btn btn--small btn--danger"
                                            on:click=move |_| pending_delete.set(Some(delete_id.clone()))
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>

        <Pagination
            info=Signal::derive(move || visible.with(PageInfo::of))
            on_page=Callback::new(move |page| policies.update(|s| s.go_to(page)))
            on_page_size=Callback::new(move |size| policies.update(|s| s.set_page_size(size)))
        />

        <Show when=move || dialog.with(|d| d.open)>
            <PolicyDialog dialog on_save/>
        </Show>
        <Show when=move || pending_delete.get().is_some()>
            <ConfirmDialog
                title="Delete policy"
                message=pending_delete_message(policies, pending_delete, |p: &AbacPolicy| p.name.clone())
                on_confirm=on_confirm_delete
                on_cancel=Callback::new(move |()| pending_delete.set(None))
            />
        </Show>
    }
}

#[component]
fn ConflictsPanel(conflicts: RwSignal<AnalysisState<PolicyConflict>>) -> impl IntoView {
    let on_dismiss = Callback::new(move |id: String| {
        conflicts.update(|c| c.finish(&id, Outcome::Dismissed, Ok(())));
    });

    view! {
        <section class="panel">
            <header class="panel__header">
                <h2>"Policy conflicts"</h2>
                <span class="panel__count">{move || conflicts.with(|c| c.visible().len())}</span>
            </header>
            <FindingsList
                items=Signal::derive(move || conflicts.with(|c| to_findings(&c.visible())))
                pending=Signal::derive(move || conflicts.with(|c| c.pending.clone()))
                on_dismiss=on_dismiss
                empty="No policy conflicts detected."
            />
        </section>
    }
}
