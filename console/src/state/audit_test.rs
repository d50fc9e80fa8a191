use chrono::TimeDelta;
use iam::RiskLevel;
use iam::mock;

use super::*;

fn loaded() -> AuditState {
    let mut state = AuditState::default();
    state.apply_logs(Ok(mock::audit_logs()), mock::reference_time());
    state
}

#[test]
fn logs_are_sorted_newest_first() {
    let state = loaded();
    let stamps: Vec<_> = state.logs.items.iter().map(|l| l.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(state.last_refreshed, Some(mock::reference_time()));
}

#[test]
fn medium_risk_filter_yields_two() {
    let mut state = loaded();
    state.logs.update_filter(|f| f.risk = Some(RiskLevel::Medium));
    assert_eq!(state.logs.visible().total, 2);
}

#[test]
fn window_counts_recent_logs() {
    let mut state = loaded();
    state.set_window(TimeWindow::Last24Hours, mock::reference_time());
    assert_eq!(state.logs.visible().total, 2);
    state.set_window(TimeWindow::Last7Days, mock::reference_time());
    assert_eq!(state.logs.visible().total, 5);
    state.set_window(TimeWindow::All, mock::reference_time());
    assert_eq!(state.logs.filter.since, None);
}

#[test]
fn refresh_slides_the_window_forward() {
    let mut state = loaded();
    state.set_window(TimeWindow::LastHour, mock::reference_time());
    assert_eq!(state.logs.visible().total, 1);

    let later = mock::reference_time() + TimeDelta::hours(2);
    state.apply_logs(Ok(mock::audit_logs()), later);
    assert_eq!(state.logs.visible().total, 0);
    assert_eq!(state.last_refreshed, Some(later));
}

#[test]
fn failed_refresh_keeps_logs_and_timestamp() {
    let mut state = loaded();
    let later = mock::reference_time() + TimeDelta::minutes(1);
    state.apply_logs(Err(ApiError::Network("timeout".to_owned())), later);
    assert_eq!(state.logs.items.len(), 5);
    assert_eq!(state.last_refreshed, Some(mock::reference_time()));
    assert!(state.logs.error.is_some());
}

#[test]
fn action_options_are_distinct_and_sorted() {
    let state = loaded();
    assert_eq!(
        state.action_options(),
        ["audit.delete", "login", "policy.update", "role.assign"]
    );
}

#[test]
fn auto_refresh_defaults_on_and_toggles() {
    let mut state = AuditState::default();
    assert!(state.auto_refresh);
    state.toggle_auto_refresh();
    assert!(!state.auto_refresh);
}

#[test]
fn unresolved_alerts_count_open_and_investigating() {
    let mut state = AuditState::default();
    state.alerts.apply_fetch(Ok(mock::security_alerts()));
    assert_eq!(state.unresolved_alerts(), 2);
}
