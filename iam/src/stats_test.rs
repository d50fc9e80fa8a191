use super::*;
use crate::mock;

fn demo_stats() -> DashboardStats {
    DashboardStats::compute(
        &mock::users(),
        &mock::roles(),
        &mock::permissions(),
        &mock::policies(),
        &mock::security_alerts(),
        &mock::audit_logs(),
    )
}

#[test]
fn demo_dashboard_counts() {
    let stats = demo_stats();
    assert_eq!(stats.total_users, 7);
    assert_eq!(stats.active_users, 4);
    assert_eq!(stats.suspended_users, 1);
    // alice, carol, frank, grace of 7.
    assert_eq!(stats.mfa_percent, 57);
    assert_eq!(stats.total_roles, 8);
    assert_eq!(stats.total_permissions, 13);
    assert_eq!(stats.active_policies, 6);
    assert_eq!(stats.open_alerts, 2);
    assert_eq!(stats.high_risk_events, 2);
}

#[test]
fn empty_inputs_give_zeroes() {
    let stats = DashboardStats::compute(&[], &[], &[], &[], &[], &[]);
    assert_eq!(stats, DashboardStats::default());
}

#[test]
fn percent_rounds_half_up() {
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(2, 3), 67);
    assert_eq!(percent(1, 2), 50);
    assert_eq!(percent(5, 5), 100);
    assert_eq!(percent(3, 0), 0);
}

#[test]
fn risk_breakdown_lists_every_level() {
    let breakdown = risk_breakdown(&mock::audit_logs());
    assert_eq!(
        breakdown,
        vec![
            (RiskLevel::Low, 1),
            (RiskLevel::Medium, 2),
            (RiskLevel::High, 1),
            (RiskLevel::Critical, 1),
        ]
    );
    assert!(risk_breakdown(&[]).iter().all(|(_, n)| *n == 0));
}

#[test]
fn top_actions_ranks_by_count_then_name() {
    let top = top_actions(&mock::audit_logs(), 2);
    assert_eq!(top, vec![("login".to_owned(), 2), ("audit.delete".to_owned(), 1)]);
    assert!(top_actions(&mock::audit_logs(), 0).is_empty());
}

#[test]
fn stats_serialize_camel_case() {
    let value = serde_json::to_value(demo_stats()).unwrap();
    assert_eq!(value["mfaPercent"], serde_json::json!(57));
    assert!(value.get("highRiskEvents").is_some());
}
