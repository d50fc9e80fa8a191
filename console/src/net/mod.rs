//! Networking for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues every request the console makes; `error` is the failure type
//! stored by screens and shown inline.

pub mod api;
pub mod error;
