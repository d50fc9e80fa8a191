//! Tab strip for the tabbed screens.

use leptos::prelude::*;

#[component]
pub fn TabBar<T>(tabs: Vec<(T, &'static str)>, #[prop(into)] active: Signal<T>, on_select: Callback<T>) -> impl IntoView
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    view! {
        <nav class="tabs" role="tablist">
            {tabs
                .into_iter()
                .map(|(tab, label)| {
                    let selected = move || active.get() == tab;
                    view! {
                        <button
                            class="tabs__tab"
                            class:tabs__tab--active=selected
                            role="tab"
                            aria-selected=move || selected().to_string()
                            on:click=move |_| on_select.run(tab)
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
