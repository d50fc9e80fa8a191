//! Utility helpers shared across console modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, timers, downloads) from
//! page and component logic so the logic stays testable off the browser.

pub mod auth;
pub mod dark_mode;
pub mod download;
pub mod format;
pub mod retry;
pub mod token;
