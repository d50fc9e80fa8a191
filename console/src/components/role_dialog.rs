//! Create/edit role dialog with a permission picker grouped by category.

#[cfg(test)]
#[path = "role_dialog_test.rs"]
mod role_dialog_test;

use iam::validate::RoleForm;
use iam::{Permission, PermissionCategory};
use leptos::prelude::*;

use super::form::{
    DialogFrame, FieldError, TextArea, TextField, dialog_busy, dialog_callbacks, dialog_server_error,
    dialog_submit_label, dialog_title, field_error, form_setter, form_value,
};
use crate::state::dialog::DialogState;

/// `(category name, permissions)` in category order; unknown categories last.
pub fn group_by_category(
    permissions: &[Permission],
    categories: &[PermissionCategory],
) -> Vec<(String, Vec<Permission>)> {
    let mut groups: Vec<(String, Vec<Permission>)> = categories
        .iter()
        .map(|c| {
            let members: Vec<Permission> = permissions.iter().filter(|p| p.category == c.id).cloned().collect();
            (c.name.clone(), members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect();
    let other: Vec<Permission> = permissions
        .iter()
        .filter(|p| !categories.iter().any(|c| c.id == p.category))
        .cloned()
        .collect();
    if !other.is_empty() {
        groups.push(("Other".to_owned(), other));
    }
    groups
}

#[component]
pub fn RoleDialog(
    dialog: RwSignal<DialogState<RoleForm>>,
    #[prop(into)] permissions: Signal<Vec<Permission>>,
    #[prop(into)] categories: Signal<Vec<PermissionCategory>>,
    on_save: Callback<RoleForm>,
) -> impl IntoView {
    let (submit, cancel) = dialog_callbacks(dialog, |f, _| f.validate(), on_save);
    let selected = move || dialog.with(|d| d.form.permissions.len());

    view! {
        <DialogFrame
            title=dialog_title(dialog, "role")
            submit_label=dialog_submit_label(dialog)
            busy=dialog_busy(dialog)
            server_error=dialog_server_error(dialog)
            on_cancel=cancel
            on_submit=submit
            wide=true
        >
            <TextField
                label="Name"
                value=form_value(dialog, |f| f.name.clone())
                on_input=form_setter(dialog, |f, v| f.name = v)
                error=field_error(dialog, "name")
            />
            <TextArea
                label="Description"
                value=form_value(dialog, |f| f.description.clone())
                on_input=form_setter(dialog, |f, v| f.description = v)
                error=field_error(dialog, "description")
            />
            <fieldset class="dialog__fieldset">
                <legend>{move || format!("Permissions ({} selected)", selected())}</legend>
                {move || {
                    group_by_category(&permissions.get(), &categories.get())
                        .into_iter()
                        .map(|(name, members)| {
                            view! {
                                <div class="dialog__group">
                                    <h3>{name}</h3>
                                    {members
                                        .into_iter()
                                        .map(|p| {
                                            let id = p.id.clone();
                                            let checked_id = id.clone();
                                            view! {
                                                <label class="dialog__check" title=p.description>
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=move || {
                                                            dialog.with(|d| d.form.permissions.contains(&checked_id))
                                                        }
                                                        on:change=move |_| {
                                                            dialog.update(|d| d.edit(|f| f.toggle_permission(&id)));
                                                        }
                                                    />
                                                    {p.name}
                                                </label>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                        })
                        .collect_view()
                }}
                <FieldError error=field_error(dialog, "permissions")/>
            </fieldset>
        </DialogFrame>
    }
}
