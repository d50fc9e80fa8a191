//! Dialog chrome and form inputs shared by every create/edit dialog.
//!
//! DESIGN
//! ======
//! Inputs are bound to a `RwSignal<DialogState<F>>` through small accessor
//! helpers, so each dialog lists its fields once and all error rendering
//! goes through `FieldError`.

use leptos::prelude::*;

use crate::state::dialog::DialogState;

/// Reactive view of one form field.
pub fn form_value<F, V>(dialog: RwSignal<DialogState<F>>, get: fn(&F) -> V) -> Signal<V>
where
    F: Clone + Default + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Signal::derive(move || dialog.with(|d| get(&d.form)))
}

/// Callback writing one form field.
pub fn form_setter<F, V>(dialog: RwSignal<DialogState<F>>, apply: fn(&mut F, V)) -> Callback<V>
where
    F: Clone + Default + Send + Sync + 'static,
    V: 'static,
{
    Callback::new(move |value: V| dialog.update(move |d| d.edit(move |f| apply(f, value))))
}

pub fn field_error<F>(dialog: RwSignal<DialogState<F>>, field: &'static str) -> Signal<Option<String>>
where
    F: Clone + Default + Send + Sync + 'static,
{
    Signal::derive(move || dialog.with(|d| d.error(field)))
}

#[component]
pub fn FieldError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <span class="dialog__error">{move || error.get().unwrap_or_default()}</span>
        </Show>
    }
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="dialog__label">
            {label}
            <input
                class="dialog__input"
                class:dialog__input--invalid=move || error.get().is_some()
                type=input_type.unwrap_or("text")
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <FieldError error/>
        </label>
    }
}

#[component]
pub fn TextArea(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] rows: Option<u32>,
) -> impl IntoView {
    view! {
        <label class="dialog__label">
            {label}
            <textarea
                class="dialog__input dialog__input--area"
                rows=rows.unwrap_or(3).to_string()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
            <FieldError error/>
        </label>
    }
}

/// Dropdown over `(value, label)` pairs.
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <label class="dialog__label">
            {label}
            <select
                class="dialog__input"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {move || {
                    let current = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(v, l)| {
                            let selected = v == current;
                            view! { <option value=v selected=selected>{l}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <FieldError error/>
        </label>
    }
}

#[component]
pub fn CheckboxField(#[prop(into)] label: String, #[prop(into)] checked: Signal<bool>, on_toggle: Callback<bool>) -> impl IntoView {
    view! {
        <label class="dialog__check">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_toggle.run(event_target_checked(&ev))
            />
            {label}
        </label>
    }
}

/// `(wire value, label)` pairs for a wire enum.
pub fn enum_options<T: Copy>(all: &[T], as_str: fn(T) -> &'static str, label: fn(T) -> &'static str) -> Vec<(String, String)> {
    all.iter().map(|v| (as_str(*v).to_owned(), label(*v).to_owned())).collect()
}

/// Backdrop, title, body and Cancel/submit row for a form dialog.
#[component]
pub fn DialogFrame(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] submit_label: Signal<String>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] server_error: Signal<Option<String>>,
    on_cancel: Callback<()>,
    on_submit: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div
                class="dialog"
                class:dialog--wide=wide
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        ev.prevent_default();
                        on_cancel.run(());
                    }
                }
            >
                <h2>{move || title.get()}</h2>
                <form
                    class="dialog__form"
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        on_submit.run(());
                    }
                >
                    {children()}
                    <FieldError error=server_error/>
                    <div class="dialog__actions">
                        <button type="button" class="btn" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn--primary" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving...".to_owned() } else { submit_label.get() }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

/// Wire a dialog to its frame: title, labels, busy state and the submit and
/// cancel callbacks. `on_save` only ever sees a validated form.
pub fn dialog_callbacks<F>(
    dialog: RwSignal<DialogState<F>>,
    validate: fn(&F, &iam::validate::FormMode) -> iam::validate::FieldErrors,
    on_save: Callback<F>,
) -> (Callback<()>, Callback<()>)
where
    F: Clone + Default + Send + Sync + 'static,
{
    let submit = Callback::new(move |()| {
        let mut ready = None;
        dialog.update(|d| ready = d.submit(validate));
        if let Some(form) = ready {
            on_save.run(form);
        }
    });
    let cancel = Callback::new(move |()| dialog.update(DialogState::close));
    (submit, cancel)
}

pub fn dialog_title<F>(dialog: RwSignal<DialogState<F>>, noun: &'static str) -> Signal<String>
where
    F: Clone + Default + Send + Sync + 'static,
{
    Signal::derive(move || dialog.with(|d| d.title(noun)))
}

pub fn dialog_submit_label<F>(dialog: RwSignal<DialogState<F>>) -> Signal<String>
where
    F: Clone + Default + Send + Sync + 'static,
{
    Signal::derive(move || dialog.with(|d| d.mode.submit_label().to_owned()))
}

pub fn dialog_busy<F>(dialog: RwSignal<DialogState<F>>) -> Signal<bool>
where
    F: Clone + Default + Send + Sync + 'static,
{
    Signal::derive(move || dialog.with(|d| d.submitting))
}

pub fn dialog_server_error<F>(dialog: RwSignal<DialogState<F>>) -> Signal<Option<String>>
where
    F: Clone + Default + Send + Sync + 'static,
{
    Signal::derive(move || dialog.with(|d| d.server_error.clone()))
}
