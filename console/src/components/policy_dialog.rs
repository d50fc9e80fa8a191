//! Create/edit ABAC policy dialog with an editable condition list.

use iam::validate::{ConditionRow, PolicyForm};
use iam::{ConditionOperator, PolicyEffect, PolicyStatus};
use leptos::prelude::*;

use super::form::{
    DialogFrame, FieldError, SelectField, TextArea, TextField, dialog_busy, dialog_callbacks, dialog_server_error,
    dialog_submit_label, dialog_title, enum_options, field_error, form_setter, form_value,
};
use crate::state::dialog::DialogState;

#[component]
pub fn PolicyDialog(dialog: RwSignal<DialogState<PolicyForm>>, on_save: Callback<PolicyForm>) -> impl IntoView {
    let (submit, cancel) = dialog_callbacks(dialog, |f, _| f.validate(), on_save);
    // Rows re-render only when the row count changes.
    let row_count = Memo::new(move |_| dialog.with(|d| d.form.conditions.len()));

    view! {
        <DialogFrame
            title=dialog_title(dialog, "policy")
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
            <div class="dialog__grid">
                <SelectField
                    label="Effect"
                    options=enum_options(PolicyEffect::ALL, PolicyEffect::as_str, PolicyEffect::label)
                    value=form_value(dialog, |f| f.effect.as_str().to_owned())
                    on_change=form_setter(dialog, |f, v: String| f.effect = v.parse().unwrap_or_default())
                    error=field_error(dialog, "effect")
                />
                <SelectField
                    label="Status"
                    options=enum_options(PolicyStatus::ALL, PolicyStatus::as_str, PolicyStatus::label)
                    value=form_value(dialog, |f| f.status.as_str().to_owned())
                    on_change=form_setter(dialog, |f, v: String| f.status = v.parse().unwrap_or_default())
                    error=field_error(dialog, "status")
                />
                <TextField
                    label="Priority"
                    input_type="number"
                    value=form_value(dialog, |f| f.priority.clone())
                    on_input=form_setter(dialog, |f, v| f.priority = v)
                    error=field_error(dialog, "priority")
                />
            </div>
            <TextArea
                label="Resources (one pattern per line, * and ** allowed)"
                value=form_value(dialog, |f| f.resources.clone())
                on_input=form_setter(dialog, |f, v| f.resources = v)
                error=field_error(dialog, "resources")
            />
            <TextField
                label="Actions (comma separated)"
                placeholder="read, list"
                value=form_value(dialog, |f| f.actions.clone())
                on_input=form_setter(dialog, |f, v| f.actions = v)
                error=field_error(dialog, "actions")
            />
            <fieldset class="dialog__fieldset">
                <legend>"Conditions"</legend>
                <Show when=move || row_count.get() == 0>
                    <p class="dialog__hint">"No conditions: the policy applies to every matching request."</p>
                </Show>
                {move || (0..row_count.get()).map(|index| view! { <ConditionEditor dialog index/> }).collect_view()}
                <FieldError error=field_error(dialog, "conditions")/>
                <button type="button" class="btn btn--small" on:click=move |_| dialog.update(|d| d.edit(PolicyForm::add_condition))>
                    "+ Add condition"
                </button>
            </fieldset>
        </DialogFrame>
    }
}

/// One `attribute operator value` row.
#[component]
fn ConditionEditor(dialog: RwSignal<DialogState<PolicyForm>>, index: usize) -> impl IntoView {
    let row = move || dialog.with(|d| d.form.conditions.get(index).cloned().unwrap_or_default());
    let edit_row = move |apply: &dyn Fn(&mut ConditionRow)| {
        dialog.update(|d| {
            d.edit(|f| {
                if let Some(row) = f.conditions.get_mut(index) {
                    apply(row);
                }
            });
        });
    };

    view! {
        <div class="condition-row">
            <input
                class="dialog__input"
                placeholder="subject.department"
                prop:value=move || row().attribute
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    edit_row(&|r| r.attribute.clone_from(&value));
                }
            />
            <select
                class="dialog__input"
                on:change=move |ev| {
                    let operator = event_target_value(&ev).parse::<ConditionOperator>().unwrap_or_default();
                    edit_row(&|r| r.operator = operator);
                }
            >
                {move || {
                    let current = row().operator;
                    ConditionOperator::ALL
                        .iter()
                        .map(|op| {
                            view! { <option value=op.as_str() selected={*op == current}>{op.label()}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <input
                class="dialog__input"
                placeholder="finance"
                prop:value=move || row().value
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    edit_row(&|r| r.value.clone_from(&value));
                }
            />
            <button
                type="button"
                class="btn btn--small"
                title="Remove condition"
                on:click=move |_| dialog.update(|d| d.edit(|f| f.remove_condition(index)))
            >
                "Remove"
            </button>
        </div>
    }
}
