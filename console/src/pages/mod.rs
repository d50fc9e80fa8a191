//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its list, dialog and analysis signals, issues its fetches on
//! mount through `crud`, and delegates rendering details to `components`.

pub mod audit;
pub(crate) mod crud;
pub mod dashboard;
pub mod login;
pub mod permissions;
pub mod policies;
pub mod resources;
pub mod roles;
pub mod users;
