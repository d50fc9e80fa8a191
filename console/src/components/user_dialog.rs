//! Create/edit user dialog.

use iam::validate::UserForm;
use iam::{Role, UserStatus};
use leptos::prelude::*;

use super::form::{
    CheckboxField, DialogFrame, SelectField, TextField, dialog_busy, dialog_callbacks, dialog_server_error,
    dialog_submit_label, dialog_title, enum_options, field_error, form_setter, form_value,
};
use crate::state::dialog::DialogState;

#[component]
pub fn UserDialog(
    dialog: RwSignal<DialogState<UserForm>>,
    #[prop(into)] roles: Signal<Vec<Role>>,
    on_save: Callback<UserForm>,
) -> impl IntoView {
    let (submit, cancel) = dialog_callbacks(dialog, UserForm::validate, on_save);
    let editing = move || dialog.with(|d| !d.mode.is_create());
    let status_options = enum_options(UserStatus::ALL, UserStatus::as_str, UserStatus::label);

    view! {
        <DialogFrame
            title=dialog_title(dialog, "user")
            submit_label=dialog_submit_label(dialog)
            busy=dialog_busy(dialog)
            server_error=dialog_server_error(dialog)
            on_cancel=cancel
            on_submit=submit
            wide=true
        >
            <div class="dialog__grid">
                <TextField
                    label="Username"
                    value=form_value(dialog, |f| f.username.clone())
                    on_input=form_setter(dialog, |f, v| f.username = v)
                    error=field_error(dialog, "username")
                />
                <TextField
                    label="Email"
                    input_type="email"
                    value=form_value(dialog, |f| f.email.clone())
                    on_input=form_setter(dialog, |f, v| f.email = v)
                    error=field_error(dialog, "email")
                />
                <TextField
                    label="First name"
                    value=form_value(dialog, |f| f.first_name.clone())
                    on_input=form_setter(dialog, |f, v| f.first_name = v)
                    error=field_error(dialog, "first_name")
                />
                <TextField
                    label="Last name"
                    value=form_value(dialog, |f| f.last_name.clone())
                    on_input=form_setter(dialog, |f, v| f.last_name = v)
                    error=field_error(dialog, "last_name")
                />
                <TextField
                    label="Password"
                    input_type="password"
                    placeholder="At least 8 characters"
                    value=form_value(dialog, |f| f.password.clone())
                    on_input=form_setter(dialog, |f, v| f.password = v)
                    error=field_error(dialog, "password")
                />
                <TextField
                    label="Confirm password"
                    input_type="password"
                    value=form_value(dialog, |f| f.confirm_password.clone())
                    on_input=form_setter(dialog, |f, v| f.confirm_password = v)
                    error=field_error(dialog, "confirm_password")
                />
                <TextField
                    label="Department"
                    value=form_value(dialog, |f| f.department.clone())
                    on_input=form_setter(dialog, |f, v| f.department = v)
                    error=field_error(dialog, "department")
                />
                <SelectField
                    label="Status"
                    options=status_options
                    value=form_value(dialog, |f| f.status.as_str().to_owned())
                    on_change=form_setter(dialog, |f, v: String| f.status = v.parse().unwrap_or_default())
                    error=field_error(dialog, "status")
                />
            </div>
            <Show when=editing>
                <p class="dialog__hint">"Leave the password blank to keep the current one."</p>
            </Show>
            <CheckboxField
                label="Require multi-factor authentication"
                checked=form_value(dialog, |f| f.mfa_enabled)
                on_toggle=form_setter(dialog, |f, v| f.mfa_enabled = v)
            />
            <fieldset class="dialog__fieldset">
                <legend>"Roles"</legend>
                {move || {
                    roles
                        .get()
                        .into_iter()
                        .map(|role| {
                            let id = role.id.clone();
                            let checked_id = id.clone();
                            view! {
                                <label class="dialog__check">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || dialog.with(|d| d.form.roles.contains(&checked_id))
                                        on:change=move |_| dialog.update(|d| d.edit(|f| f.toggle_role(&id)))
                                    />
                                    {role.name}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </fieldset>
        </DialogFrame>
    }
}
