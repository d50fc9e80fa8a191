//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render tables, dialogs and panels while pages own the state
//! signals and network calls; components receive signals and callbacks.

pub mod badge;
pub mod category_dialog;
pub mod confirm_dialog;
pub mod filters;
pub mod findings;
pub mod form;
pub mod nav_bar;
pub mod pagination;
pub mod permission_dialog;
pub mod policy_dialog;
pub mod policy_test_panel;
pub mod resource_dialog;
pub mod role_dialog;
pub mod stat_card;
pub mod tabs;
pub mod user_dialog;
