//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page applies the same unauthenticated redirect, and every
//! failed fetch funnels through `note_failure` so an expired token signs the
//! browser out instead of leaving stale screens up.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::error::ApiError;
use crate::state::auth::AuthState;

/// Redirect to `/login` whenever the token check has finished without a token.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.get().should_redirect_unauth() {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Clear the session after a 401 so the redirect effect fires.
pub fn note_failure(auth: RwSignal<AuthState>, error: &ApiError) {
    if error.is_unauthorized() {
        super::token::clear();
        auth.update(AuthState::sign_out);
    }
}
