//! Username/password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only unauthenticated route. A successful login stores the bearer token
//! and navigates to the dashboard; an already signed-in browser skips ahead.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::error::ApiError;
use crate::state::auth::AuthState;

/// Presence check run before the request is sent.
pub(crate) fn credentials_error(username: &str, password: &str) -> Option<&'static str> {
    match (username.trim().is_empty(), password.is_empty()) {
        (true, true) => Some("Enter your username and password."),
        (true, false) => Some("Enter your username."),
        (false, true) => Some("Enter your password."),
        (false, false) => None,
    }
}

/// Message shown when the login request fails. A 401 here means bad
/// credentials, not an expired session.
pub(crate) fn sign_in_error(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Sign-in failed: invalid username or password.".to_owned(),
        other => format!("Sign-in failed: {other}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.is_authenticated() {
            navigate("/", NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let username_value = username.get().trim().to_owned();
        let password_value = password.get();
        if let Some(message) = credentials_error(&username_value, &password_value) {
            info.set(message.to_owned());
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::login(&username_value, &password_value).await {
                Ok(response) => {
                    crate::util::token::save(&response.token);
                    log::info!("signed in as {}", response.user.username);
                    auth.update(|a| a.sign_in(response));
                    password.set(String::new());
                    info.set(String::new());
                }
                Err(e) => info.set(sign_in_error(&e)),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"IAM Console"</h1>
                <p class="login-card__subtitle">"Sign in to manage identities and access"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
