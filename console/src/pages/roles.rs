//! Roles screen: role table with create/edit/delete and the conflict panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Needs users and permissions as well as roles: the permission picker in
//! the dialog groups by category, and conflict detection runs over all
//! three collections whenever any of them changes.

use iam::conflicts::{RoleConflict, default_sod_rules, detect_role_conflicts};
use iam::query::{CategoryFilter, ListFilter, PermissionFilter, RoleFilter, RoleKind, UserFilter};
use iam::validate::RoleForm;
use iam::{Permission, PermissionCategory, Role, User};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::crud::{load_findings, load_list, pending_delete_message, spawn_delete, spawn_finding_action, spawn_save};
use crate::components::badge::{Badge, Tone};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::filters::{ClearFilters, FilterSelect, SearchBox};
use crate::components::findings::{FindingsList, to_findings};
use crate::components::pagination::{PageInfo, Pagination};
use crate::components::role_dialog::RoleDialog;
use crate::net::api;
use crate::state::analysis::{AnalysisState, Outcome};
use crate::state::auth::AuthState;
use crate::state::dialog::DialogState;
use crate::state::list::ListState;
use crate::util::auth::install_unauth_redirect;
use crate::util::format;

#[component]
pub fn RolesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let roles = RwSignal::new(ListState::<Role, RoleFilter>::default());
    let permissions = RwSignal::new(ListState::<Permission, PermissionFilter>::default());
    let categories = RwSignal::new(ListState::<PermissionCategory, CategoryFilter>::default());
    let users = RwSignal::new(ListState::<User, UserFilter>::default());
    let conflicts = RwSignal::new(AnalysisState::<RoleConflict>::default());
    let dialog = RwSignal::new(DialogState::<RoleForm>::default());
    let pending_delete = RwSignal::new(None::<String>);

    load_list(roles, auth, api::fetch_roles);
    load_list(permissions, auth, api::fetch_permissions);
    load_list(categories, auth, api::fetch_categories);
    load_list(users, auth, api::fetch_users);
    load_findings(conflicts, auth, api::fetch_role_conflicts);

    Effect::new(move |_| {
        let found = roles.with(|r| {
            users.with(|u| permissions.with(|p| detect_role_conflicts(&r.items, &u.items, &p.items, &default_sod_rules())))
        });
        conflicts.update(|c| c.set_detected(found));
    });

    let visible = Memo::new(move |_| roles.with(ListState::visible));
    let permission_list = Signal::derive(move || permissions.with(|s| s.items.clone()));
    let category_list = Signal::derive(move || categories.with(|s| s.items.clone()));

    let on_save = Callback::new(move |form: RoleForm| {
        let payload = form.to_payload();
        let id = dialog.with_untracked(|d| d.mode.edit_id().map(str::to_owned));
        spawn_save(roles, dialog, auth, async move {
            match id {
                Some(id) => api::update_role(&id, &payload).await,
                None => api::create_role(&payload).await,
            }
        });
    });

    let on_confirm_delete = Callback::new(move |()| {
        if let Some(id) = pending_delete.get_untracked() {
            pending_delete.set(None);
            spawn_delete(roles, auth, id.clone(), async move { api::delete_role(&id).await });
        }
    });

    let on_resolve = Callback::new(move |id: String| {
        spawn_finding_action(conflicts, auth, id, Outcome::Resolved, |id| async move {
            api::resolve_role_conflict(&id).await
        });
    });
    let on_dismiss = Callback::new(move |id: String| {
        spawn_finding_action(conflicts, auth, id, Outcome::Dismissed, |id| async move {
            api::dismiss_role_conflict(&id).await
        });
    });

    let kind_options: Vec<(String, String)> =
        RoleKind::ALL.into_iter().map(|k| (k.as_str().to_owned(), k.label().to_owned())).collect();

    view! {
        <div class="page roles-page">
            <header class="page__header">
                <h1>"Roles"</h1>
                <div class="page__actions">
                    <button class="btn btn--primary" on:click=move |_| dialog.update(DialogState::open_create)>
                        "+ New role"
                    </button>
                </div>
            </header>

            <div class="toolbar">
                <SearchBox
                    placeholder="Search roles"
                    value=Signal::derive(move || roles.with(|s| s.filter.search.clone()))
                    on_input=Callback::new(move |v: String| roles.update(|s| s.update_filter(|f| f.search = v)))
                />
                <FilterSelect
                    all_label="System and custom"
                    options=kind_options
                    value=Signal::derive(move || roles.with(|s| s.filter.kind.map(|k| k.as_str().to_owned()).unwrap_or_default()))
                    on_change=Callback::new(move |v: String| roles.update(|s| s.update_filter(|f| f.kind = RoleKind::parse(&v))))
                />
                <ClearFilters
                    active=Signal::derive(move || roles.with(|s| s.filter.is_active()))
                    on_clear=Callback::new(move |()| roles.update(ListState::clear_filter))
                />
            </div>

            <Show when=move || roles.with(|s| s.error.is_some())>
                <p class="page__error">{move || roles.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Role"</th>
                        <th>"Permissions"</th>
                        <th>"Users"</th>
                        <th>"Type"</th>
                        <th>"Created"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || roles.with(|s| s.loading && s.items.is_empty())>
                        <tr>
                            <td colspan="6" class="table__empty">"Loading roles..."</td>
                        </tr>
                    </Show>
                    <Show when=move || roles.with(|s| s.loaded) && visible.with(|p| p.items.is_empty())>
                        <tr>
                            <td colspan="6" class="table__empty">"No roles match the current filters."</td>
                        </tr>
                    </Show>
                    {move || {
                        visible
                            .get()
                            .items
                            .into_iter()
                            .map(|role| {
                                let edit_role = role.clone();
                                let delete_id = role.id.clone();
                                let system = role.is_system;
                                let kind = RoleKind::of(&role);
                                view! {
                                    <tr>
                                        <td>
                                            <strong>{role.name.clone()}</strong>
                                            <span class="table__sub">{role.description.clone()}</span>
                                        </td>
                                        <td>{format::count(role.permissions.len(), "permission", "permissions")}</td>
                                        <td>{role.user_count}</td>
                                        <td>
                                            <Badge tone={if system { Tone::Info } else { Tone::Neutral }} label=kind.label()/>
                                        </td>
                                        <td>{format::date(role.created_at)}</td>
                                        <td class="table__actions">
                                            <button
                                                class="btn btn--small"
                                                on:click=move |_| {
                                                    dialog.update(|d| d.open_edit(edit_role.id.clone(), RoleForm::from_role(&edit_role)));
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                class="btn btn--small btn--danger"
                                                disabled=system
                                                title={if system { "System roles cannot be deleted" } else { "" }}
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
                on_page=Callback::new(move |page| roles.update(|s| s.go_to(page)))
                on_page_size=Callback::new(move |size| roles.update(|s| s.set_page_size(size)))
            />

            <section class="panel">
                <header class="panel__header">
                    <h2>"Role conflicts"</h2>
                    <span class="panel__count">{move || conflicts.with(|c| c.visible().len())}</span>
                </header>
                <Show when=move || conflicts.with(|c| c.error.is_some())>
                    <p class="panel__error">{move || conflicts.with(|c| c.error.clone().unwrap_or_default())}</p>
                </Show>
                <FindingsList
                    items=Signal::derive(move || conflicts.with(|c| to_findings(&c.visible())))
                    pending=Signal::derive(move || conflicts.with(|c| c.pending.clone()))
                    resolve_label="Resolve"
                    on_resolve=on_resolve
                    on_dismiss=on_dismiss
                    empty="No role conflicts detected."
                />
            </section>

            <Show when=move || dialog.with(|d| d.open)>
                <RoleDialog dialog permissions=permission_list categories=category_list on_save/>
            </Show>
            <Show when=move || pending_delete.get().is_some()>
                <ConfirmDialog
                    title="Delete role"
                    message=pending_delete_message(roles, pending_delete, |r: &Role| r.name.clone())
                    on_confirm=on_confirm_delete
                    on_cancel=Callback::new(move |()| pending_delete.set(None))
                />
            </Show>
        </div>
    }
}
