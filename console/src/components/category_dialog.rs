//! Create/edit permission category dialog.

use iam::validate::CategoryForm;
use leptos::prelude::*;

use super::form::{
    DialogFrame, TextArea, TextField, dialog_busy, dialog_callbacks, dialog_server_error, dialog_submit_label,
    dialog_title, field_error, form_setter, form_value,
};
use crate::state::dialog::DialogState;

#[component]
pub fn CategoryDialog(dialog: RwSignal<DialogState<CategoryForm>>, on_save: Callback<CategoryForm>) -> impl IntoView {
    let (submit, cancel) = dialog_callbacks(dialog, |f, _| f.validate(), on_save);
    let swatch = move || {
        let color = dialog.with(|d| d.form.color.trim().to_owned());
        if iam::validate::is_hex_color(&color) { format!("background: {color}") } else { String::new() }
    };

    view! {
        <DialogFrame
            title=dialog_title(dialog, "category")
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
            <TextArea
                label="Description"
                value=form_value(dialog, |f| f.description.clone())
                on_input=form_setter(dialog, |f, v| f.description = v)
                error=field_error(dialog, "description")
            />
            <div class="dialog__color">
                <TextField
                    label="Color"
                    placeholder="#3b82f6"
                    value=form_value(dialog, |f| f.color.clone())
                    on_input=form_setter(dialog, |f, v| f.color = v)
                    error=field_error(dialog, "color")
                />
                <span class="dialog__swatch" style=swatch></span>
            </div>
        </DialogFrame>
    }
}
