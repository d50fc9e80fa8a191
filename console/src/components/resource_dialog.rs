//! Create/edit resource dialog. Attributes are kept as-is across edits.

use iam::validate::ResourceForm;
use leptos::prelude::*;

use super::form::{
    DialogFrame, TextArea, TextField, dialog_busy, dialog_callbacks, dialog_server_error, dialog_submit_label,
    dialog_title, field_error, form_setter, form_value,
};
use crate::state::dialog::DialogState;

#[component]
pub fn ResourceDialog(dialog: RwSignal<DialogState<ResourceForm>>, on_save: Callback<ResourceForm>) -> impl IntoView {
    let (submit, cancel) = dialog_callbacks(dialog, |f, _| f.validate(), on_save);
    let attributes = move || {
        dialog.with(|d| {
            d.form
                .attributes
                .iter()
                .map(|(k, v)| format!("{k} = {v}"))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <DialogFrame
            title=dialog_title(dialog, "resource")
            submit_label=dialog_submit_label(dialog)
            busy=dialog_busy(dialog)
            server_error=dialog_server_error(dialog)
            on_cancel=cancel
            on_submit=submit
        >
            <TextField
                label="Name"
                value=form_value(dialog, |f| f.name.clone())
                on_input=form_setter(dialog, |f, v| f.name = v)
                error=field_error(dialog, "name")
            />
            <TextField
                label="Type"
                placeholder="document"
                value=form_value(dialog, |f| f.kind.clone())
                on_input=form_setter(dialog, |f, v| f.kind = v)
                error=field_error(dialog, "kind")
            />
            <TextField
                label="Owner"
                value=form_value(dialog, |f| f.owner.clone())
                on_input=form_setter(dialog, |f, v| f.owner = v)
                error=field_error(dialog, "owner")
            />
            <TextArea
                label="Description"
                value=form_value(dialog, |f| f.description.clone())
                on_input=form_setter(dialog, |f, v| f.description = v)
                error=field_error(dialog, "description")
            />
            <Show when=move || !attributes().is_empty()>
                <ul class="dialog__attributes">
                    {move || attributes().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            </Show>
        </DialogFrame>
    }
}
