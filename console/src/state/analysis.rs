//! Findings lists for role conflicts, policy conflicts and optimizations.
//!
//! DESIGN
//! ======
//! Findings are computed locally from the fetched collections and merged
//! with whatever the backend has stored; a local finding wins when both
//! carry the same id. Resolve/apply/dismiss go to the backend, and on
//! success the id is hidden locally until the next full reload.

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;

use std::collections::BTreeSet;

use super::list::Keyed;
use crate::net::error::ApiError;

/// What happened to a finding the user acted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Resolved,
    Dismissed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisState<T> {
    pub detected: Vec<T>,
    pub remote: Vec<T>,
    pub resolved: BTreeSet<String>,
    pub dismissed: BTreeSet<String>,
    /// Ids with a request in flight.
    pub pending: BTreeSet<String>,
    pub error: Option<String>,
}

impl<T> Default for AnalysisState<T> {
    fn default() -> Self {
        Self {
            detected: Vec::new(),
            remote: Vec::new(),
            resolved: BTreeSet::new(),
            dismissed: BTreeSet::new(),
            pending: BTreeSet::new(),
            error: None,
        }
    }
}

impl<T: Clone + Keyed> AnalysisState<T> {
    pub fn set_detected(&mut self, items: Vec<T>) {
        self.detected = items;
    }

    /// Store the backend's findings. Failure is reported but not fatal: the
    /// locally detected findings still show.
    pub fn merge_remote(&mut self, result: Result<Vec<T>, ApiError>) {
        match result {
            Ok(items) => {
                self.remote = items;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn is_hidden(&self, id: &str) -> bool {
        self.resolved.contains(id) || self.dismissed.contains(id)
    }

    /// Local findings in their computed order, then remote-only ones.
    #[must_use]
    pub fn visible(&self) -> Vec<T> {
        let local: BTreeSet<&str> = self.detected.iter().map(Keyed::key).collect();
        self.detected
            .iter()
            .chain(self.remote.iter().filter(|item| !local.contains(item.key())))
            .filter(|item| !self.is_hidden(item.key()))
            .cloned()
            .collect()
    }

    /// Mark `id` as in flight; false when a request for it is already running.
    pub fn begin(&mut self, id: &str) -> bool {
        self.pending.insert(id.to_owned())
    }

    #[must_use]
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    pub fn finish(&mut self, id: &str, outcome: Outcome, result: Result<(), ApiError>) {
        self.pending.remove(id);
        match result {
            Ok(()) => {
                let set = match outcome {
                    Outcome::Resolved => &mut self.resolved,
                    Outcome::Dismissed => &mut self.dismissed,
                };
                set.insert(id.to_owned());
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
