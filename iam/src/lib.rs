//! Domain models and derivation helpers for the IAM admin console.
//!
//! This crate is UI-framework agnostic so the console crate can consume it
//! directly for rendering list views, dialogs and analysis panels, and the
//! server can reuse the same types for its demo responses.
//!
//! ARCHITECTURE
//! ============
//! `model` holds the wire records. `query` and `validate` cover the list and
//! dialog mechanics every screen repeats. `evaluate`, `conflicts` and
//! `optimize` are the analysis engines behind the policy test panel and the
//! role/permission review screens. `stats` feeds the dashboard and `mock`
//! provides deterministic fixtures.

pub mod conflicts;
pub mod evaluate;
pub mod mock;
pub mod model;
pub mod optimize;
pub mod pattern;
pub mod query;
pub mod stats;
pub mod validate;

pub use model::*;
