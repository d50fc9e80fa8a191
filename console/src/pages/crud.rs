//! Fetch, save and delete plumbing shared by the list pages.
//!
//! ERROR HANDLING
//! ==============
//! Failures land in the list's or dialog's `error` field; a 401 also signs
//! the browser out through `util::auth::note_failure`.

use std::future::Future;

use iam::query::ListFilter;
use leptos::prelude::*;

use crate::net::error::ApiError;
use crate::state::analysis::{AnalysisState, Outcome};
use crate::state::auth::AuthState;
use crate::state::dialog::DialogState;
use crate::state::list::{Keyed, ListState};

/// Fetch a collection into `list`.
pub fn load_list<T, F, Fut>(list: RwSignal<ListState<T, F>>, auth: RwSignal<AuthState>, fetch: impl FnOnce() -> Fut + 'static)
where
    T: Clone + Keyed + Send + Sync + 'static,
    F: ListFilter<T> + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    list.update(ListState::start_loading);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = fetch().await;
        if let Err(e) = &result {
            crate::util::auth::note_failure(auth, e);
        }
        list.update(|s| s.apply_fetch(result));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (fetch, auth);
}

/// Await a create/update and patch the list with the saved record.
pub fn spawn_save<T, F, Form, Fut>(
    list: RwSignal<ListState<T, F>>,
    dialog: RwSignal<DialogState<Form>>,
    auth: RwSignal<AuthState>,
    request: Fut,
) where
    T: Clone + Keyed + Send + Sync + 'static,
    F: ListFilter<T> + Send + Sync + 'static,
    Form: Clone + Default + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match request.await {
            Ok(saved) => {
                list.update(|s| s.upsert(saved));
                dialog.update(|d| d.finish(Ok(())));
            }
            Err(e) => {
                crate::util::auth::note_failure(auth, &e);
                dialog.update(|d| d.finish(Err(e)));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (request, list, auth);
        dialog.update(|d| d.finish(Err(ApiError::Unavailable)));
    }
}

/// Await a delete and drop the record from the list on success.
pub fn spawn_delete<T, F, Fut>(list: RwSignal<ListState<T, F>>, auth: RwSignal<AuthState>, id: String, request: Fut)
where
    T: Clone + Keyed + Send + Sync + 'static,
    F: ListFilter<T> + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match request.await {
            Ok(()) => {
                list.update(|s| {
                    s.remove(&id);
                });
            }
            Err(e) => {
                crate::util::auth::note_failure(auth, &e);
                list.update(|s| s.error = Some(e.to_string()));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (request, list, auth, id);
    }
}

/// Display name of the record about to be deleted, for the confirm prompt.
pub fn pending_delete_message<T, F>(
    list: RwSignal<ListState<T, F>>,
    pending: RwSignal<Option<String>>,
    name: fn(&T) -> String,
) -> Signal<String>
where
    T: Clone + Keyed + Send + Sync + 'static,
    F: ListFilter<T> + Send + Sync + 'static,
{
    Signal::derive(move || {
        let id = pending.get().unwrap_or_default();
        let label = list.with(|s| s.get(&id).map_or_else(|| id.clone(), name));
        format!("Delete \"{label}\"? This cannot be undone.")
    })
}

/// Fetch the backend's stored findings and merge them with local ones.
pub fn load_findings<T, Fut>(analysis: RwSignal<AnalysisState<T>>, auth: RwSignal<AuthState>, fetch: impl FnOnce() -> Fut + 'static)
where
    T: Clone + Keyed + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = fetch().await;
        if let Err(e) = &result {
            crate::util::auth::note_failure(auth, e);
        }
        analysis.update(|a| a.merge_remote(result));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (fetch, auth, analysis);
}

/// Resolve, apply or dismiss one finding. A second click while the first
/// request is in flight is dropped.
pub fn spawn_finding_action<T, Fut>(
    analysis: RwSignal<AnalysisState<T>>,
    auth: RwSignal<AuthState>,
    id: String,
    outcome: Outcome,
    request: impl FnOnce(String) -> Fut + 'static,
) where
    T: Clone + Keyed + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    if !analysis.try_update(|a| a.begin(&id)).unwrap_or(false) {
        return;
    }
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = request(id.clone()).await;
        if let Err(e) = &result {
            crate::util::auth::note_failure(auth, e);
        }
        analysis.update(|a| a.finish(&id, outcome, result));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (request, auth);
        analysis.update(|a| a.finish(&id, outcome, Err(ApiError::Unavailable)));
    }
}
