use iam::mock;
use iam::query::{AuditFilter, UserFilter};
use iam::{RiskLevel, UserStatus};

use super::*;

fn users_state() -> ListState<User, UserFilter> {
    let mut state = ListState::default();
    state.start_loading();
    state.apply_fetch(Ok(mock::users()));
    state
}

fn numbered_users(n: usize) -> Vec<User> {
    let template = mock::users().remove(0);
    (0..n)
        .map(|i| User {
            id: format!("u-{i}"),
            username: format!("user{i}"),
            ..template.clone()
        })
        .collect()
}

// =============================================================
// Fetch outcomes
// =============================================================

#[test]
fn successful_fetch_replaces_items() {
    let state = users_state();
    assert!(!state.loading);
    assert!(state.loaded);
    assert_eq!(state.error, None);
    assert_eq!(state.items.len(), mock::users().len());
}

#[test]
fn failed_fetch_keeps_stale_items() {
    let mut state = users_state();
    state.start_loading();
    state.apply_fetch(Err(ApiError::Network("offline".to_owned())));
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("network error: offline"));
    assert_eq!(state.items.len(), mock::users().len());
}

#[test]
fn audit_risk_filter_through_list_state() {
    let mut state = ListState::<AuditLog, AuditFilter>::default();
    state.apply_fetch(Ok(mock::audit_logs()));
    state.update_filter(|f| f.risk = Some(RiskLevel::Medium));
    let page = state.visible();
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|l| l.risk == RiskLevel::Medium));
}

// =============================================================
// Filter and pager interplay
// =============================================================

#[test]
fn filter_change_resets_page() {
    let mut state = ListState::<User, UserFilter>::default();
    state.apply_fetch(Ok(numbered_users(35)));
    state.go_to(3);
    assert_eq!(state.pager.page(), 3);

    state.update_filter(|f| f.search = "user".to_owned());
    assert_eq!(state.pager.page(), 1);

    state.go_to(2);
    state.clear_filter();
    assert_eq!(state.pager.page(), 1);
}

#[test]
fn page_size_change_resets_page_and_slices() {
    let mut state = ListState::<User, UserFilter>::default();
    state.apply_fetch(Ok(numbered_users(35)));
    state.next_page();
    state.set_page_size(25);
    let page = state.visible();
    assert_eq!(page.page, 1);
    assert_eq!(page.items.len(), 25);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn navigation_is_clamped_to_filtered_pages() {
    let mut state = ListState::<User, UserFilter>::default();
    state.apply_fetch(Ok(numbered_users(15)));
    state.go_to(9);
    assert_eq!(state.pager.page(), 2);
    state.next_page();
    assert_eq!(state.pager.page(), 2);
    state.prev_page();
    state.prev_page();
    assert_eq!(state.pager.page(), 1);
}

#[test]
fn status_filter_narrows_visible_page() {
    let mut state = users_state();
    state.update_filter(|f| f.status = Some(UserStatus::Suspended));
    let page = state.visible();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].username, "dave");
}

// =============================================================
// Local patches after saves
// =============================================================

#[test]
fn upsert_replaces_or_prepends() {
    let mut state = users_state();
    let mut alice = state.get("u-alice").cloned().unwrap();
    alice.first_name = "Alicia".to_owned();
    state.upsert(alice);
    assert_eq!(state.get("u-alice").unwrap().first_name, "Alicia");
    assert_eq!(state.items.len(), mock::users().len());

    let mut fresh = mock::users().remove(1);
    fresh.id = "u-new".to_owned();
    state.upsert(fresh);
    assert_eq!(state.items[0].id, "u-new");
}

#[test]
fn remove_clamps_page() {
    let mut state = ListState::<User, UserFilter>::default();
    state.apply_fetch(Ok(numbered_users(11)));
    state.go_to(2);
    assert_eq!(state.visible().items.len(), 1);

    let removed = state.remove("u-10").unwrap();
    assert_eq!(removed.id, "u-10");
    assert_eq!(state.pager.page(), 1);
    assert!(state.remove("missing").is_none());
}

#[test]
fn stale_page_is_clamped_after_refetch_shrinks_list() {
    let mut state = ListState::<User, UserFilter>::default();
    state.apply_fetch(Ok(numbered_users(40)));
    state.go_to(4);
    state.apply_fetch(Ok(numbered_users(12)));
    assert_eq!(state.pager.page(), 2);
}
