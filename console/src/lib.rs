//! # console
//!
//! Leptos + WASM admin console for identity and access management: users,
//! roles, permissions, resources, ABAC policies and the audit trail.
//!
//! ARCHITECTURE
//! ============
//! `net` talks to the REST backend, `state` holds per-screen list and dialog
//! state provided as context signals, `pages` are route-level screens and
//! `components` the shared chrome and dialogs. Filtering, pagination,
//! validation and analysis come from the `iam` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs browser logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
