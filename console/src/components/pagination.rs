//! Page-size selector, page buttons and "Showing x-y of n" footer.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use iam::query::{PAGE_SIZE_OPTIONS, Page};
use leptos::prelude::*;

/// Page buttons shown around the current page.
const WINDOW: usize = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub summary: String,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl PageInfo {
    #[must_use]
    pub fn of<T>(page: &Page<T>) -> Self {
        Self {
            summary: page.summary(),
            page: page.page,
            total_pages: page.total_pages,
            page_size: page.page_size,
        }
    }
}

/// Up to `WINDOW` consecutive page numbers centred on `page`.
#[must_use]
pub fn page_numbers(page: usize, total_pages: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let page = page.clamp(1, total_pages);
    let len = WINDOW.min(total_pages);
    let start = page.saturating_sub(WINDOW / 2).max(1).min(total_pages + 1 - len);
    (start..start + len).collect()
}

#[component]
pub fn Pagination(
    #[prop(into)] info: Signal<PageInfo>,
    on_page: Callback<usize>,
    on_page_size: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <span class="pagination__summary">{move || info.get().summary}</span>
            <label class="pagination__size">
                "Rows"
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size.run(size);
                    }
                }>
                    {move || {
                        let current = info.get().page_size;
                        PAGE_SIZE_OPTIONS
                            .into_iter()
                            .map(|size| {
                                view! { <option value=size.to_string() selected={size == current}>{size}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            <div class="pagination__pages">
                <button
                    class="btn btn--small"
                    disabled={move || info.get().page <= 1}
                    on:click=move |_| on_page.run(info.get_untracked().page.saturating_sub(1))
                >
                    "Prev"
                </button>
                {move || {
                    let PageInfo { page, total_pages, .. } = info.get();
                    page_numbers(page, total_pages)
                        .into_iter()
                        .map(|n| {
                            view! {
                                <button
                                    class="btn btn--small"
                                    class:btn--active={n == page}
                                    on:click=move |_| on_page.run(n)
                                >
                                    {n}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="btn btn--small"
                    disabled={move || {
                        let i = info.get();
                        i.page >= i.total_pages
                    }}
                    on:click=move |_| on_page.run(info.get_untracked().page + 1)
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
