//! Dashboard metric tile.

use leptos::prelude::*;

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] detail: Option<Signal<String>>,
    #[prop(optional)] warn: Option<Signal<bool>>,
    #[prop(optional)] href: Option<&'static str>,
) -> impl IntoView {
    let warn = move || warn.is_some_and(|w| w.get());
    view! {
        <a class="stat-card" class:stat-card--warn=warn href=href.unwrap_or("#")>
            <span class="stat-card__label">{label}</span>
            <span class="stat-card__value">{move || value.get()}</span>
            {detail.map(|d| view! { <span class="stat-card__detail">{move || d.get()}</span> })}
        </a>
    }
}
