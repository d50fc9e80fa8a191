use iam::mock;

use super::*;

fn loaded() -> NotificationsState {
    let mut state = NotificationsState {
        loading: true,
        ..NotificationsState::default()
    };
    state.apply_fetch(Ok(mock::notifications()));
    state
}

#[test]
fn fetch_sorts_newest_first_and_counts_unread() {
    let state = loaded();
    assert!(!state.loading);
    assert_eq!(state.unread(), 2);
    assert_eq!(state.badge(), "2");
    let ids: Vec<_> = state.items.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["n-2", "n-3", "n-1", "n-4"]);
}

#[test]
fn failed_fetch_keeps_items() {
    let mut state = loaded();
    state.apply_fetch(Err(ApiError::Unavailable));
    assert_eq!(state.items.len(), 4);
    assert_eq!(state.error.as_deref(), Some("not available on server"));
}

#[test]
fn mark_read_updates_badge() {
    let mut state = loaded();
    state.mark_read("n-1");
    assert_eq!(state.unread(), 1);
    state.mark_read("missing");
    assert_eq!(state.unread(), 1);
    state.mark_all_read();
    assert_eq!(state.unread(), 0);
    assert_eq!(state.badge(), "");
}

#[test]
fn recent_is_capped() {
    let mut state = NotificationsState::default();
    let template = mock::notifications().remove(0);
    let items = (0..12)
        .map(|i| Notification {
            id: format!("n-{i}"),
            ..template.clone()
        })
        .collect();
    state.apply_fetch(Ok(items));
    assert_eq!(state.recent().len(), RECENT_LIMIT);
    assert_eq!(state.badge(), "12");
}

#[test]
fn toggle_open_flips() {
    let mut state = NotificationsState::default();
    state.toggle_open();
    assert!(state.open);
    state.toggle_open();
    assert!(!state.open);
}
