//! Create/edit permission dialog.

use iam::validate::PermissionForm;
use iam::{PermissionCategory, PermissionScope, RiskLevel};
use leptos::prelude::*;

use super::form::{
    DialogFrame, SelectField, TextArea, TextField, dialog_busy, dialog_callbacks, dialog_server_error,
    dialog_submit_label, dialog_title, enum_options, field_error, form_setter, form_value,
};
use crate::state::dialog::DialogState;

#[component]
pub fn PermissionDialog(
    dialog: RwSignal<DialogState<PermissionForm>>,
    #[prop(into)] categories: Signal<Vec<PermissionCategory>>,
    on_save: Callback<PermissionForm>,
) -> impl IntoView {
    let (submit, cancel) = dialog_callbacks(dialog, |f, _| f.validate(), on_save);
    let category_options = Signal::derive(move || {
        std::iter::once((String::new(), "Select a category".to_owned()))
            .chain(categories.get().into_iter().map(|c| (c.id, c.name)))
            .collect::<Vec<_>>()
    });
    let use_suggested = move |_| {
        dialog.update(|d| d.edit(|f| f.name = f.suggested_name()));
    };

    view! {
        <DialogFrame
            title=dialog_title(dialog, "permission")
            submit_label=dialog_submit_label(dialog)
            busy=dialog_busy(dialog)
            server_error=dialog_server_error(dialog)
            on_cancel=cancel
            on_submit=submit
        >
            <div class="dialog__grid">
                <TextField
                    label="Resource"
                    placeholder="users"
                    value=form_value(dialog, |f| f.resource.clone())
                    on_input=form_setter(dialog, |f, v| f.resource = v)
                    error=field_error(dialog, "resource")
                />
                <TextField
                    label="Action"
                    placeholder="read"
                    value=form_value(dialog, |f| f.action.clone())
                    on_input=form_setter(dialog, |f, v| f.action = v)
                    error=field_error(dialog, "action")
                />
            </div>
            <TextField
                label="Name"
                value=form_value(dialog, |f| f.name.clone())
                on_input=form_setter(dialog, |f, v| f.name = v)
                error=field_error(dialog, "name")
            />
            <button type="button" class="btn btn--small" on:click=use_suggested>
                {move || format!("Use \"{}\"", dialog.with(|d| d.form.suggested_name()))}
            </button>
            <TextArea
                label="Description"
                value=form_value(dialog, |f| f.description.clone())
                on_input=form_setter(dialog, |f, v| f.description = v)
                error=field_error(dialog, "description")
            />
            <div class="dialog__grid">
                <SelectField
                    label="Category"
                    options=category_options
                    value=form_value(dialog, |f| f.category.clone())
                    on_change=form_setter(dialog, |f, v| f.category = v)
                    error=field_error(dialog, "category")
                />
                <SelectField
                    label="Scope"
                    options=enum_options(PermissionScope::ALL, PermissionScope::as_str, PermissionScope::label)
                    value=form_value(dialog, |f| f.scope.as_str().to_owned())
                    on_change=form_setter(dialog, |f, v: String| f.scope = v.parse().unwrap_or_default())
                    error=field_error(dialog, "scope")
                />
                <SelectField
                    label="Risk"
                    options=enum_options(RiskLevel::ALL, RiskLevel::as_str, RiskLevel::label)
                    value=form_value(dialog, |f| f.risk.as_str().to_owned())
                    on_change=form_setter(dialog, |f, v: String| f.risk = v.parse().unwrap_or_default())
                    error=field_error(dialog, "risk")
                />
            </div>
        </DialogFrame>
    }
}
