//! Console state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain structs wrapped in `RwSignal`s. `auth` and `notifications` are
//! provided app-wide from `App`; the rest are created per page.

pub mod analysis;
pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod dialog;
pub mod list;
pub mod notifications;
pub mod policy_test;
pub mod ui;
