//! Search box and categorical filter dropdowns for list toolbars.
//!
//! An empty option value means "no filter"; pages map it to `None`.

#[cfg(test)]
#[path = "filters_test.rs"]
mod filters_test;

use std::str::FromStr;

use leptos::prelude::*;

/// Parse a filter dropdown value; blank or unknown means no filter.
pub fn parse_choice<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() { None } else { raw.parse().ok() }
}

/// Free-text filter choice; blank means no filter.
pub fn text_choice(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_owned())
}

#[component]
pub fn SearchBox(
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <input
            class="toolbar__search"
            type="search"
            placeholder=placeholder.unwrap_or("Search...")
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}

/// Dropdown whose first entry clears the filter.
#[component]
pub fn FilterSelect(
    #[prop(into)] all_label: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <select
            class="toolbar__select"
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value="">{all_label}</option>
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
    }
}

/// Shown when filters hide every row.
#[component]
pub fn ClearFilters(#[prop(into)] active: Signal<bool>, on_clear: Callback<()>) -> impl IntoView {
    view! {
        <Show when=move || active.get()>
            <button class="btn btn--small btn--ghost" on:click=move |_| on_clear.run(())>
                "Clear filters"
            </button>
        </Show>
    }
}
