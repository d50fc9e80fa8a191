//! Notification bell state.
//!
//! Fetched once on mount (with one retry); read flags are patched locally
//! after the backend acknowledges them so the badge updates without a refetch.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use iam::{Notification, unread_count};

use crate::net::error::ApiError;

/// Entries shown in the dropdown.
pub const RECENT_LIMIT: usize = 8;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationsState {
    pub items: Vec<Notification>,
    pub loading: bool,
    pub error: Option<String>,
    /// Dropdown visibility.
    pub open: bool,
}

impl NotificationsState {
    #[must_use]
    pub fn unread(&self) -> usize {
        unread_count(&self.items)
    }

    /// Badge text; empty when everything is read.
    #[must_use]
    pub fn badge(&self) -> String {
        match self.unread() {
            0 => String::new(),
            n if n > 99 => "99+".to_owned(),
            n => n.to_string(),
        }
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<Notification>, ApiError>) {
        self.loading = false;
        match result {
            Ok(mut items) => {
                items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.items = items;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn mark_read(&mut self, id: &str) {
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
            n.read = true;
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.items {
            n.read = true;
        }
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    #[must_use]
    pub fn recent(&self) -> &[Notification] {
        &self.items[..self.items.len().min(RECENT_LIMIT)]
    }
}
