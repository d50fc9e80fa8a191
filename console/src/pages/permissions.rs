//! Permissions screen: permission catalogue, categories and optimization
//! suggestions on three tabs.
//!
//! SYSTEM CONTEXT
//! ==============
//! All four collections (permissions, categories, roles, users) load once
//! on mount. The optimization tab recomputes its suggestions locally from
//! them and merges in the backend's stored list.

#[cfg(test)]
#[path = "permissions_test.rs"]
mod permissions_test;

use iam::optimize::{Optimization, analyze};
use iam::query::{CategoryFilter, ListFilter, PermissionFilter, RoleFilter, UserFilter};
use iam::validate::{CategoryForm, PermissionForm};
use iam::{Permission, PermissionCategory, PermissionScope, RiskLevel, Role, User};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::crud::{load_findings, load_list, pending_delete_message, spawn_delete, spawn_finding_action, spawn_save};
use crate::components::badge::RiskBadge;
use crate::components::category_dialog::CategoryDialog;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::filters::{ClearFilters, FilterSelect, SearchBox, parse_choice, text_choice};
use crate::components::findings::{FindingsList, to_findings};
use crate::components::form::enum_options;
use crate::components::pagination::{PageInfo, Pagination};
use crate::components::permission_dialog::PermissionDialog;
use crate::components::tabs::TabBar;
use crate::net::api;
use crate::state::analysis::{AnalysisState, Outcome};
use crate::state::auth::AuthState;
use crate::state::dialog::DialogState;
use crate::state::list::ListState;
use crate::state::ui::PermissionsTab;
use crate::util::auth::install_unauth_redirect;

type Permissions = RwSignal<ListState<Permission, PermissionFilter>>;
type Categories = RwSignal<ListState<PermissionCategory, CategoryFilter>>;

/// Category display name, falling back to the raw id.
pub(crate) fn category_name(id: &str, categories: &[PermissionCategory]) -> String {
    categories.iter().find(|c| c.id == id).map_or_else(|| id.to_owned(), |c| c.name.clone())
}

/// Number of permissions filed under `category_id`.
pub(crate) fn permissions_in(category_id: &str, permissions: &[Permission]) -> usize {
    permissions.iter().filter(|p| p.category == category_id).count()
}

#[component]
pub fn PermissionsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let tab = RwSignal::new(PermissionsTab::default());
    let permissions: Permissions = RwSignal::new(ListState::default());
    let categories: Categories = RwSignal::new(ListState::default());
    let roles = RwSignal::new(ListState::<Role, RoleFilter>::default());
    let users = RwSignal::new(ListState::<User, UserFilter>::default());
    let optimizations = RwSignal::new(AnalysisState::<Optimization>::default());

    load_list(permissions, auth, api::fetch_permissions);
    load_list(categories, auth, api::fetch_categories);
    load_list(roles, auth, api::fetch_roles);
    load_list(users, auth, api::fetch_users);
    load_findings(optimizations, auth, api::fetch_optimizations);

    Effect::new(move |_| {
        let found = roles.with(|r| permissions.with(|p| users.with(|u| analyze(&r.items, &p.items, &u.items))));
        optimizations.update(|o| o.set_detected(found));
    });

    let tabs = PermissionsTab::ALL.into_iter().map(|t| (t, t.label())).collect::<Vec<_>>();

    view! {
        <div class="page permissions-page">
            <header class="page__header">
                <h1>"Permissions"</h1>
            </header>
            <TabBar tabs active=tab on_select=Callback::new(move |t| tab.set(t))/>
            {move || match tab.get() {
                PermissionsTab::Permissions => view! { <PermissionsTable permissions categories auth/> }.into_any(),
                PermissionsTab::Categories => view! { <CategoriesTable categories permissions auth/> }.into_any(),
                PermissionsTab::Optimizations => view! { <OptimizationsPanel optimizations auth/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn PermissionsTable(permissions: Permissions, categories: Categories, auth: RwSignal<AuthState>) -> impl IntoView {
    let dialog = RwSignal::new(DialogState::<PermissionForm>::default());
    let pending_delete = RwSignal::new(None::<String>);
    let visible = Memo::new(move |_| permissions.with(ListState::visible));
    let category_list = Signal::derive(move || categories.with(|s| s.items.clone()));

    let on_save = Callback::new(move |form: PermissionForm| {
        let payload = form.to_payload();
        let id = dialog.with_untracked(|d| d.mode.edit_id().map(str::to_owned));
        spawn_save(permissions, dialog, auth, async move {
            match id {
                Some(id) => api::update_permission(&id, &payload).await,
                None => api::create_permission(&payload).await,
            }
        });
    });
    let on_confirm_delete = Callback::new(move |()| {
        if let Some(id) = pending_delete.get_untracked() {
            pending_delete.set(None);
            spawn_delete(permissions, auth, id.clone(), async move { api::delete_permission(&id).await });
        }
    });

    let category_options = Signal::derive(move || categories.with(|s| s.items.iter().map(|c| (c.id.clone(), c.name.clone())).collect()));
    let scope_options = enum_options(PermissionScope::ALL, PermissionScope::as_str, PermissionScope::label);
    let risk_options = enum_options(RiskLevel::ALL, RiskLevel::as_str, RiskLevel::label);

    view! {
        <div class="toolbar">
            <SearchBox
                placeholder="Search name, resource or action"
                value=Signal::derive(move || permissions.with(|s| s.filter.search.clone()))
                on_input=Callback::new(move |v: String| permissions.update(|s| s.update_filter(|f| f.search = v)))
            />
            <FilterSelect
                all_label="All categories"
                options=category_options
                value=Signal::derive(move || permissions.with(|s| s.filter.category.clone().unwrap_or_default()))
                on_change=Callback::new(move |v: String| permissions.update(|s| s.update_filter(|f| f.category = text_choice(&v))))
            />
            <FilterSelect
                all_label="All scopes"
                options=scope_options
                value=Signal::derive(move || permissions.with(|s| s.filter.scope.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| permissions.update(|s| s.update_filter(|f| f.scope = parse_choice(&v))))
            />
            <FilterSelect
                all_label="All risk levels"
                options=risk_options
                value=Signal::derive(move || permissions.with(|s| s.filter.risk.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                on_change=Callback::new(move |v: String| permissions.update(|s| s.update_filter(|f| f.risk = parse_choice(&v))))
            />
            <ClearFilters
                active=Signal::derive(move || permissions.with(|s| s.filter.is_active()))
                on_clear=Callback::new(move |()| permissions.update(ListState::clear_filter))
            />
            <button class="btn btn--primary" on:click=move |_| dialog.update(DialogState::open_create)>
                "+ New permission"
            </button>
        </div>

        <Show when=move || permissions.with(|s| s.error.is_some())>
            <p class="page__error">{move || permissions.with(|s| s.error.clone().unwrap_or_default())}</p>
        </Show>

        <table class="table">
            <thead>
                <tr>
                    <th>"Permission"</th>
                    <th>"Resource"</th>
                    <th>"Action"</th>
                    <th>"Category"</th>
                    <th>"Scope"</th>
                    <th>"Risk"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <Show when=move || permissions.with(|s| s.loaded) && visible.with(|p| p.items.is_empty())>
                    <tr>
                        <td colspan="7" class="table__empty">"No permissions match the current filters."</td>
                    </tr>
                </Show>
                {move || {
                    let cats = category_list.get();
                    visible
                        .get()
                        .items
                        .into_iter()
                        .map(|p| {
                            let category = category_name(&p.category, &cats);
                            let edit = p.clone();
                            let delete_id = p.id.clone();
                            view! {
                                <tr>
                                    <td>
                                        <strong>{p.name.clone()}</strong>
                                        <span class="table__sub">{p.description.clone()}</span>
                                    </td>
                                    <td><code>{p.resource.clone()}</code></td>
                                    <td>{p.action.clone()}</td>
                                    <td>{category}</td>
                                    <td>{p.scope.label()}</td>
                                    <td><RiskBadge risk=p.risk/></td>
                                    <td class="table__actions">
                                        <button
                                            class="btn btn--small"
                                            on:click=move |_| {
                                                dialog.update(|d| d.open_edit(edit.id.clone(), PermissionForm::from_permission(&edit)));
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
            on_page=Callback::new(move |page| permissions.update(|s| s.go_to(page)))
            on_page_size=Callback::new(move |size| permissions.update(|s| s.set_page_size(size)))
        />

        <Show when=move || dialog.with(|d| d.open)>
            <PermissionDialog dialog categories=category_list on_save/>
        </Show>
        <Show when=move || pending_delete.get().is_some()>
            <ConfirmDialog
                title="Delete permission"
                message=pending_delete_message(permissions, pending_delete, |p: &Permission| p.name.clone())
                on_confirm=on_confirm_delete
                on_cancel=Callback::new(move |()| pending_delete.set(None))
            />
        </Show>
    }
}

#[component]
fn CategoriesTable(categories: Categories, permissions: Permissions, auth: RwSignal<AuthState>) -> impl IntoView {
    let dialog = RwSignal::new(DialogState::<CategoryForm>::default());
    let pending_delete = RwSignal::new(None::<String>);
    let visible = Memo::new(move |_| categories.with(ListState::visible));

    let on_save = Callback::new(move |form: CategoryForm| {
        let payload = form.to_payload();
        let id = dialog.with_untracked(|d| d.mode.edit_id().map(str::to_owned));
        spawn_save(categories, dialog, auth, async move {
            match id {
                Some(id) => api::update_category(&id, &payload).await,
                None => api::create_category(&payload).await,
            }
        });
    });
    let on_confirm_delete = Callback::new(move |()| {
        if let Some(id) = pending_delete.get_untracked() {
            pending_delete.set(None);
            spawn_delete(categories, auth, id.clone(), async move { api::delete_category(&id).await });
        }
    });

    view! {
        <div class="toolbar">
            <SearchBox
                placeholder="Search categories"
                value=Signal::derive(move || categories.with(|s| s.filter.search.clone()))
                on_input=Callback::new(move |v: String| categories.update(|s| s.update_filter(|f| f.search = v)))
            />
            <button class="btn btn--primary" on:click=move |_| dialog.update(DialogState::open_create)>
                "+ New category"
            </button>
        </div>

        <Show when=move || categories.with(|s| s.error.is_some())>
            <p class="page__error">{move || categories.with(|s| s.error.clone().unwrap_or_default())}</p>
        </Show>

        <table class="table">
            <thead>
                <tr>
                    <th>"Category"</th>
                    <th>"Description"</th>
                    <th>"Permissions"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let all = permissions.with(|s| s.items.clone());
                    visible
                        .get()
                        .items
                        .into_iter()
                        .map(|c| {
                            let count = permissions_in(&c.id, &all);
                            let color = c.color.clone().unwrap_or_else(|| "transparent".to_owned());
                            let edit = c.clone();
                            let delete_id = c.id.clone();
                            view! {
                                <tr>
                                    <td>
                                        <span class="swatch" style:background-color=color></span>
                                        <strong>{c.name.clone()}</strong>
                                    </td>
                                    <td>{c.description.clone()}</td>
                                    <td>{count}</td>
                                    <td class="table__actions">
                                        <button
                                            class="btn btn--small"
                                            on:click=move |_| {
                                                dialog.update(|d| d.open_edit(edit.id.clone(), CategoryForm::from_category(&edit)));
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            class="btn btn--small btn--danger"
                                            disabled={count > 0}
                                            title={if count > 0 { "Move its permissions elsewhere first" } else { "" }}
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
            on_page=Callback::new(move |page| categories.update(|s| s.go_to(page)))
            on_page_size=Callback::new(move |size| categories.update(|s| s.set_page_size(size)))
        />

        <Show when=move || dialog.with(|d| d.open)>
            <CategoryDialog dialog on_save/>
        </Show>
        <Show when=move || pending_delete.get().is_some()>
            <ConfirmDialog
                title="Delete category"
                message=pending_delete_message(categories, pending_delete, |c: &PermissionCategory| c.name.clone())
                on_confirm=on_confirm_delete
                on_cancel=Callback::new(move |()| pending_delete.set(None))
            />
        </Show>
    }
}

#[component]
fn OptimizationsPanel(optimizations: RwSignal<AnalysisState<Optimization>>, auth: RwSignal<AuthState>) -> impl IntoView {
    let on_apply = Callback::new(move |id: String| {
        spawn_finding_action(optimizations, auth, id, Outcome::Resolved, |id| async move {
            api::apply_optimization(&id).await
        });
    });
    let on_dismiss = Callback::new(move |id: String| {
        spawn_finding_action(optimizations, auth, id, Outcome::Dismissed, |id| async move {
            api::dismiss_optimization(&id).await
        });
    });
    let total_reduction = move || optimizations.with(|o| o.visible().iter().map(|x| x.reduction).sum::<u32>());

    view! {
        <section class="panel">
            <header class="panel__header">
                <h2>"Suggested optimizations"</h2>
                <span class="panel__count">{move || format!("{} grants removable", total_reduction())}</span>
            </header>
            <Show when=move || optimizations.with(|o| o.error.is_some())>
                <p class="panel__error">{move || optimizations.with(|o| o.error.clone().unwrap_or_default())}</p>
            </Show>
            <FindingsList
                items=Signal::derive(move || optimizations.with(|o| to_findings(&o.visible())))
                pending=Signal::derive(move || optimizations.with(|o| o.pending.clone()))
                resolve_label="Apply"
                on_resolve=on_apply
                on_dismiss=on_dismiss
                empty="No optimizations suggested."
            />
        </section>
    }
}
