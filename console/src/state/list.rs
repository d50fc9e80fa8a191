//! Generic list-screen state: fetched items plus filter and pager.
//!
//! DESIGN
//! ======
//! Every list screen repeats the same cycle (fetch, filter, paginate, patch
//! after a dialog save), so it lives here once. Filters come from
//! `iam::query`; any filter change sends the pager back to page 1.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use iam::conflicts::{PolicyConflict, RoleConflict};
use iam::optimize::Optimization;
use iam::query::{ListFilter, Page, Pager, filter_items, paginate};
use iam::{
    AbacPolicy, AuditLog, ComplianceReport, Notification, Permission, PermissionCategory, Resource, Role,
    SecurityAlert, User,
};

use crate::net::error::ApiError;

/// Records addressed by a stable string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed_by_id {
    ($($ty:ty),+ $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.id
            }
        })+
    };
}

keyed_by_id!(
    User,
    Role,
    Permission,
    PermissionCategory,
    Resource,
    AbacPolicy,
    AuditLog,
    SecurityAlert,
    ComplianceReport,
    Notification,
    RoleConflict,
    PolicyConflict,
    Optimization,
);

#[derive(Clone, Debug)]
pub struct ListState<T, F> {
    pub items: Vec<T>,
    pub loading: bool,
    /// At least one fetch has completed, successfully or not.
    pub loaded: bool,
    pub error: Option<String>,
    pub filter: F,
    pub pager: Pager,
}

impl<T, F: Default> Default for ListState<T, F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loaded: false,
            error: None,
            filter: F::default(),
            pager: Pager::default(),
        }
    }
}

impl<T: Clone + Keyed, F: ListFilter<T>> ListState<T, F> {
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Store a fetch outcome. A failure keeps the previous items on screen.
    pub fn apply_fetch(&mut self, result: Result<Vec<T>, ApiError>) {
        self.loading = false;
        self.loaded = true;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                let total = self.filtered_len();
                self.pager.clamp(total);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<T> {
        filter_items(&self.items, &self.filter)
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.items.iter().filter(|item| self.filter.matches(item)).count()
    }

    /// The page currently on screen.
    #[must_use]
    pub fn visible(&self) -> Page<T> {
        paginate(&self.filtered(), &self.pager)
    }

    /// Change the filter and return to the first page.
    pub fn update_filter(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.filter);
        self.pager.reset();
    }

    pub fn clear_filter(&mut self)
    where
        F: Default,
    {
        self.update_filter(|f| *f = F::default());
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager.set_page_size(page_size);
    }

    pub fn go_to(&mut self, page: usize) {
        let total = self.filtered_len();
        self.pager.go_to(page, total);
    }

    pub fn next_page(&mut self) {
        let total = self.filtered_len();
        self.pager.next(total);
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Replace the item with the same key, or put a new one at the top.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.key() == item.key()) {
            Some(slot) => *slot = item,
            None => self.items.insert(0, item),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.key() == key)?;
        let removed = self.items.remove(index);
        let total = self.filtered_len();
        self.pager.clamp(total);
        Some(removed)
    }
}
