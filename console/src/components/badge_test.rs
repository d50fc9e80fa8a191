use super::*;

#[test]
fn risk_levels_escalate_in_tone() {
    let classes: Vec<_> = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical]
        .into_iter()
        .map(|r| risk_tone(r).class())
        .collect();
    assert_eq!(
        classes,
        [
            "badge badge--good",
            "badge badge--warn",
            "badge badge--bad",
            "badge badge--severe"
        ]
    );
}

#[test]
fn suspended_users_and_open_alerts_are_bad() {
    assert_eq!(user_status_tone(UserStatus::Suspended), Tone::Bad);
    assert_eq!(alert_status_tone(AlertStatus::Open), Tone::Bad);
    assert_eq!(effect_tone(PolicyEffect::Deny), Tone::Bad);
    assert_eq!(compliance_tone(ComplianceStatus::Compliant), Tone::Good);
}

#[test]
fn separation_of_duties_is_severe() {
    assert_eq!(role_conflict_tone(RoleConflictKind::SeparationOfDuties), Tone::Severe);
    assert_eq!(policy_conflict_tone(PolicyConflictKind::Shadowed), Tone::Warn);
}
