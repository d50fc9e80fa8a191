//! Users screen: searchable, filterable user table with create/edit/delete
//! and CSV export.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use iam::query::{ListFilter, UserFilter, distinct};
use iam::validate::UserForm;
use iam::{Role, User, UserStatus};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::crud::{load_list, pending_delete_message, spawn_delete, spawn_save};
use crate::components::badge::{Badge, user_status_tone};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::filters::{ClearFilters, FilterSelect, SearchBox, parse_choice, text_choice};
use crate::components::form::enum_options;
use crate::components::pagination::{PageInfo, Pagination};
use crate::components::user_dialog::UserDialog;
use crate::net::api;
use crate::state::auth::AuthState;
use crate::state::dialog::DialogState;
use crate::state::list::ListState;
use crate::util::auth::install_unauth_redirect;
use crate::util::format;

/// Role names for a user's role ids; unknown ids are shown as-is.
pub(crate) fn role_names(user: &User, roles: &[Role]) -> String {
    user.roles
        .iter()
        .map(|id| roles.iter().find(|r| &r.id == id).map_or(id.as_str(), |r| r.name.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let users = RwSignal::new(ListState::<User, UserFilter>::default());
    let roles = RwSignal::new(ListState::<Role, iam::query::RoleFilter>::default());
    let dialog = RwSignal::new(DialogState::<UserForm>::default());
    let pending_delete = RwSignal::new(None::<String>);
    let exporting = RwSignal::new(false);

    load_list(users, auth, api::fetch_users);
    load_list(roles, auth, api::fetch_roles);

    let visible = Memo::new(move |_| users.with(ListState::visible));
    let role_list = Signal::derive(move || roles.with(|r| r.items.clone()));

    let on_save = Callback::new(move |form: UserForm| {
        let payload = form.to_payload();
        let id = dialog.with_untracked(|d| d.mode.edit_id().map(str::to_owned));
        spawn_save(users, dialog, auth, async move {
            match id {
                Some(id) => api::update_user(&id, &payload).await,
                None => api::create_user(&payload).await,
            }
        });
    });

    let on_confirm_delete = Callback::new(move |()| {
        if let Some(id) = pending_delete.get_untracked() {
            pending_delete.set(None);
            spawn_delete(users, auth, id.clone(), async move { api::delete_user(&id).await });
        }
    });

    let on_export = move |_| {
        if exporting.get() {
            return;
        }
        exporting.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::util::download;
            match api::export_users_csv().await {
                Ok(csv) => download::save_text(&download::export_filename("users", format::now()), "text/csv", &csv),
                Err(e) => {
                    crate::util::auth::note_failure(auth, &e);
                    users.update(|s| s.error = Some(format!("Export failed: {e}")));
                }
            }
            exporting.set(false);
        });
    };

    let status_options = enum_options(UserStatus::ALL, UserStatus::as_str, UserStatus::label);
    let role_options = Signal::derive(move || roles.with(|r| r.items.iter().map(|r| (r.id.clone(), r.name.clone())).collect()));
    let department_options = Signal::derive(move || {
        users.with(|s| {
            distinct(s.items.iter().filter_map(|u| u.department.as_deref()))
                .into_iter()
                .map(|d| (d.clone(), d))
                .collect()
        })
    });

    view! {
        <div class="page users-page">
            <header class="page__header">
                <h1>"Users"</h1>
                <div class="page__actions">
                    <button class="btn" on:click=on_export disabled=move || exporting.get()>
                        {move || if exporting.get() { "Exporting..." } else { "Export CSV" }}
                    </button>
                    <button class="btn btn--primary" on:click=move |_| dialog.update(DialogState::open_create)>
                        "+ New user"
                    </button>
                </div>
            </header>

            <div class="toolbar">
                <SearchBox
                    placeholder="Search name, username, email or department"
                    value=Signal::derive(move || users.with(|s| s.filter.search.clone()))
                    on_input=Callback::new(move |v: String| users.update(|s| s.update_filter(|f| f.search = v)))
                />
                <FilterSelect
                    all_label="All statuses"
                    options=status_options
                    value=Signal::derive(move || users.with(|s| s.filter.status.map(|v| v.as_str().to_owned()).unwrap_or_default()))
                    on_change=Callback::new(move |v: String| users.update(|s| s.update_filter(|f| f.status = parse_choice(&v))))
                />
                <FilterSelect
                    all_label="All roles"
                    options=role_options
                    value=Signal::derive(move || users.with(|s| s.filter.role.clone().unwrap_or_default()))
                    on_change=Callback::new(move |v: String| users.update(|s| s.update_filter(|f| f.role = text_choice(&v))))
                />
                <FilterSelect
                    all_label="All departments"
                    options=department_options
                    value=Signal::derive(move || users.with(|s| s.filter.department.clone().unwrap_or_default()))
                    on_change=Callback::new(move |v: String| users.update(|s| s.update_filter(|f| f.department = text_choice(&v))))
                />
                <ClearFilters
                    active=Signal::derive(move || users.with(|s| s.filter.is_active()))
                    on_clear=Callback::new(move |()| users.update(ListState::clear_filter))
                />
            </div>

            <Show when=move || users.with(|s| s.error.is_some())>
                <p class="page__error">{move || users.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"User"</th>
                        <th>"Email"</th>
                        <th>"Roles"</th>
                        <th>"Department"</th>
                        <th>"Status"</th>
                        <th>"MFA"</th>
                        <th>"Last login"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || users.with(|s| s.loading && s.items.is_empty())>
                        <tr>
                            <td colspan="8" class="table__empty">"Loading users..."</td>
                        </tr>
                    </Show>
                    <Show when=move || users.with(|s| s.loaded) && visible.with(|p| p.items.is_empty())>
                        <tr>
                            <td colspan="8" class="table__empty">"No users match the current filters."</td>
                        </tr>
                    </Show>
                    {move || {
                        let all_roles = role_list.get();
                        visible
                            .get()
                            .items
                            .into_iter()
                            .map(|user| {
                                let roles_text = role_names(&user, &all_roles);
                                let edit_user = user.clone();
                                let delete_id = user.id.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <strong>{user.full_name()}</strong>
                                            <span class="table__sub">{user.username.clone()}</span>
                                        </td>
                                        <td>{user.email.clone()}</td>
                                        <td>{roles_text}</td>
                                        <td>{user.department.clone().unwrap_or_default()}</td>
                                        <td><Badge tone=user_status_tone(user.status) label=user.status.label()/></td>
                                        <td>{if user.mfa_enabled { "On" } else { "Off" }}</td>
                                        <td>{format::optional_timestamp(user.last_login)}</td>
                                        <td class="table__actions">
                                            <button
                                                class="btn btn--small"
                                                on:click=move |_| {
                                                    dialog.update(|d| d.open_edit(edit_user.id.clone(), UserForm::from_user(&edit_user)));
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
                on_page=Callback::new(move |page| users.update(|s| s.go_to(page)))
                on_page_size=Callback::new(move |size| users.update(|s| s.set_page_size(size)))
            />

            <Show when=move || dialog.with(|d| d.open)>
                <UserDialog dialog roles=role_list on_save/>
            </Show>
            <Show when=move || pending_delete.get().is_some()>
                <ConfirmDialog
                    title="Delete user"
                    message=pending_delete_message(users, pending_delete, User::full_name)
                    on_confirm=on_confirm_delete
                    on_cancel=Callback::new(move |()| pending_delete.set(None))
                />
            </Show>
        </div>
    }
}
