use super::*;

#[test]
fn ui_state_default_dark_mode_off() {
    assert!(!UiState::default().dark_mode);
}

#[test]
fn tabs_default_to_first_entry() {
    assert_eq!(PermissionsTab::default(), PermissionsTab::ALL[0]);
    assert_eq!(PoliciesTab::default(), PoliciesTab::ALL[0]);
}

#[test]
fn tab_labels_are_distinct() {
    let labels: Vec<_> = PoliciesTab::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(labels, ["Policies", "Policy test", "Conflicts"]);
    assert_eq!(PermissionsTab::Optimizations.label(), "Optimizations");
}
