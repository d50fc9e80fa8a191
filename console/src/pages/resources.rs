//! Resources screen: the protected objects policies are written against.

use iam::Resource;
use iam::query::{ListFilter, ResourceFilter, distinct};
use iam::validate::ResourceForm;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::crud::{load_list, pending_delete_message, spawn_delete, spawn_save};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::filters::{ClearFilters, FilterSelect, SearchBox, text_choice};
use crate::components::pagination::{PageInfo, Pagination};
use crate::components::resource_dialog::ResourceDialog;
use crate::net::api;
use crate::state::auth::AuthState;
use crate::state::dialog::DialogState;
use crate::state::list::ListState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ResourcesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let resources = RwSignal::new(ListState::<Resource, ResourceFilter>::default());
    let dialog = RwSignal::new(DialogState::<ResourceForm>::default());
    let pending_delete = RwSignal::new(None::<String>);

    load_list(resources, auth, api::fetch_resources);

    let visible = Memo::new(move |_| resources.with(ListState::visible));

    let on_save = Callback::new(move |form: ResourceForm| {
        let payload = form.to_payload();
        let id = dialog.with_untracked(|d| d.mode.edit_id().map(str::to_owned));
        spawn_save(resources, dialog, auth, async move {
            match id {
                Some(id) => api::update_resource(&id, &payload).await,
                None => api::create_resource(&payload).await,
            }
        });
    });
    let on_confirm_delete = Callback::new(move |()| {
        if let Some(id) = pending_delete.get_untracked() {
            pending_delete.set(None);
            spawn_delete(resources, auth, id.clone(), async move { api::delete_resource(&id).await });
        }
    });

    let kind_options = Signal::derive(move || {
        resources.with(|s| {
            distinct(s.items.iter().map(|r| r.kind.as_str()))
                .into_iter()
                .map(|k| (k.clone(), k))
                .collect()
        })
    });

    view! {
        <div class="page resources-page">
            <header class="page__header">
                <h1>"Resources"</h1>
                <div class="page__actions">
                    <button class="btn btn--primary" on:click=move |_| dialog.update(DialogState::open_create)>
                        "+ New resource"
                    </button>
                </div>
            </header>

            <div class="toolbar">
                <SearchBox
                    placeholder="Search name, type or owner"
                    value=Signal::derive(move || resources.with(|s| s.filter.search.clone()))
                    on_input=Callback::new(move |v: String| resources.update(|s| s.update_filter(|f| f.search = v)))
                />
                <FilterSelect
                    all_label="All types"
                    options=kind_options
                    value=Signal::derive(move || resources.with(|s| s.filter.kind.clone().unwrap_or_default()))
                    on_change=Callback::new(move |v: String| resources.update(|s| s.update_filter(|f| f.kind = text_choice(&v))))
                />
                <ClearFilters
                    active=Signal::derive(move || resources.with(|s| s.filter.is_active()))
                    on_clear=Callback::new(move |()| resources.update(ListState::clear_filter))
                />
            </div>

            <Show when=move || resources.with(|s| s.error.is_some())>
                <p class="page__error">{move || resources.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Resource"</th>
                        <th>"Type"</th>
                        <th>"Owner"</th>
                        <th>"Attributes"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || resources.with(|s| s.loaded) && visible.with(|p| p.items.is_empty())>
                        <tr>
                            <td colspan="5" class="table__empty">"No resources match the current filters."</td>
                        </tr>
                    </Show>
                    {move || {
                        visible
                            .get()
                            .items
                            .into_iter()
                            .map(|r| {
                                let attributes = r.attributes.keys().cloned().collect::<Vec<_>>().join(", ");
                                let edit = r.clone();
                                let delete_id = r.id.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <strong>{r.name.clone()}</strong>
                                            <span class="table__sub">{r.description.clone()}</span>
                                        </td>
                                        <td><code>{r.kind.clone()}</code></td>
                                        <td>{r.owner.clone().unwrap_or_else(|| "-".to_owned())}</td>
                                        <td>{attributes}</td>
                                        <td class="table__actions">
                                            <button
                                                class="btn btn--small"
                                                on:click=move |_| {
                                                    dialog.update(|d| d.open_edit(edit.id.clone(), ResourceForm::from_resource(&edit)));
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
                on_page=Callback::new(move |page| resources.update(|s| s.go_to(page)))
                on_page_size=Callback::new(move |size| resources.update(|s| s.set_page_size(size)))
            />

            <Show when=move || dialog.with(|d| d.open)>
                <ResourceDialog dialog on_save/>
            </Show>
            <Show when=move || pending_delete.get().is_some()>
                <ConfirmDialog
                    title="Delete resource"
                    message=pending_delete_message(resources, pending_delete, |r: &Resource| r.name.clone())
                    on_confirm=on_confirm_delete
                    on_cancel=Callback::new(move |()| pending_delete.set(None))
                />
            </Show>
        </div>
    }
}
