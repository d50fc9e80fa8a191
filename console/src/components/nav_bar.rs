//! Top navigation: section links, notification bell, theme toggle, sign out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by `App` above every route once a token is present. The bell
//! owns the only notification fetch, made when the bar mounts.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::state::notifications::NotificationsState;
use crate::state::ui::UiState;
use crate::util::{dark_mode, format, token};

pub const NAV_ITEMS: [(&str, &str); 7] = [
    ("/", "Dashboard"),
    ("/users", "Users"),
    ("/roles", "Roles"),
    ("/permissions", "Permissions"),
    ("/resources", "Resources"),
    ("/policies", "Policies"),
    ("/audit", "Audit"),
];

/// Whether `href` is the section containing `path`.
#[must_use]
pub fn is_active(path: &str, href: &str) -> bool {
    if href == "/" {
        return path == "/" || path.is_empty();
    }
    path == href || path.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();
    let pathname = use_location().pathname;

    let on_toggle_dark = move |_| {
        let next = dark_mode::toggle(ui.get_untracked().dark_mode);
        ui.update(|u| u.dark_mode = next);
    };
    let on_sign_out = move |_| {
        token::clear();
        auth.update(AuthState::sign_out);
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <header class="nav-bar">
            <span class="nav-bar__brand">"IAM Console"</span>
            <nav class="nav-bar__links">
                {NAV_ITEMS
                    .into_iter()
                    .map(|(href, label)| {
                        view! {
                            <a
                                class="nav-bar__link"
                                class:nav-bar__link--active=move || is_active(&pathname.get(), href)
                                href=href
                            >
                                {label}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="nav-bar__actions">
                <NotificationBell/>
                <button class="btn btn--ghost" title="Toggle dark mode" on:click=on_toggle_dark>
                    {move || if ui.get().dark_mode { "Light" } else { "Dark" }}
                </button>
                <span class="nav-bar__user">{move || auth.get().display_name()}</span>
                <button class="btn btn--ghost" on:click=on_sign_out>
                    "Sign out"
                </button>
            </div>
        </header>
    }
}

/// Bell icon with unread badge and a dropdown of recent notifications.
#[component]
fn NotificationBell() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notes = expect_context::<RwSignal<NotificationsState>>();

    // Fetch on mount with one retry; no polling afterwards.
    notes.update(|s| s.loading = true);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use crate::util::retry::{NOTIFICATION_RETRY_DELAY, retry_once, sleep};

        let result = retry_once(crate::net::api::fetch_notifications, NOTIFICATION_RETRY_DELAY, sleep).await;
        if let Err(e) = &result {
            crate::util::auth::note_failure(auth, e);
        }
        notes.update(|s| s.apply_fetch(result));
    });

    let mark_read = Callback::new(move |id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::mark_notification_read(&id).await {
                Ok(()) => notes.update(|s| s.mark_read(&id)),
                Err(e) => crate::util::auth::note_failure(auth, &e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, auth);
    });

    let mark_all = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::mark_all_notifications_read().await {
                Ok(()) => notes.update(NotificationsState::mark_all_read),
                Err(e) => crate::util::auth::note_failure(auth, &e),
            }
        });
    };

    view! {
        <div class="bell">
            <button class="btn btn--ghost bell__button" title="Notifications" on:click=move |_| notes.update(NotificationsState::toggle_open)>
                "Alerts"
                <Show when=move || notes.with(|s| s.unread() > 0)>
                    <span class="bell__badge">{move || notes.with(NotificationsState::badge)}</span>
                </Show>
            </button>
            <Show when=move || notes.with(|s| s.open)>
                <div class="bell__menu">
                    <div class="bell__header">
                        <span>"Notifications"</span>
                        <button class="btn btn--small" on:click=mark_all disabled=move || notes.with(|s| s.unread() == 0)>
                            "Mark all read"
                        </button>
                    </div>
                    <Show when=move || notes.with(|s| s.error.is_some())>
                        <p class="bell__error">{move || notes.with(|s| s.error.clone().unwrap_or_default())}</p>
                    </Show>
                    <Show
                        when=move || notes.with(|s| !s.items.is_empty())
                        fallback=move || view! { <p class="bell__empty">{move || if notes.with(|s| s.loading) { "Loading..." } else { "No notifications" }}</p> }
                    >
                        <ul class="bell__list">
                            {move || {
                                let now = format::now();
                                notes
                                    .with(|s| s.recent().to_vec())
                                    .into_iter()
                                    .map(|n| {
                                        let id = n.id.clone();
                                        let unread = !n.read;
                                        view! {
                                            <li
                                                class=format!("bell__item bell__item--{}", n.kind.as_str())
                                                class:bell__item--unread=unread
                                                on:click=move |_| {
                                                    if unread {
                                                        mark_read.run(id.clone());
                                                    }
                                                }
                                            >
                                                <strong>{n.title}</strong>
                                                <span>{n.message}</span>
                                                <time>{format::relative(n.created_at, now)}</time>
                                                {n.link.map(|href| view! { <a href=href>"Open"</a> })}
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
