use super::*;

#[test]
fn exact_paths_match_ignoring_slashes() {
    assert!(resource_matches("documents/payroll", "/documents/payroll/"));
    assert!(!resource_matches("documents/payroll", "documents/invoices"));
}

#[test]
fn single_star_matches_one_segment() {
    assert!(resource_matches("documents/*", "documents/payroll"));
    assert!(!resource_matches("documents/*", "documents/payroll/2024"));
    assert!(!resource_matches("documents/*", "reports/payroll"));
}

#[test]
fn double_star_matches_any_depth() {
    assert!(resource_matches("documents/**", "documents"));
    assert!(resource_matches("documents/**", "documents/a/b/c"));
    assert!(resource_matches("**/secret", "vault/x/secret"));
    assert!(!resource_matches("documents/**", "reports/a"));
}

#[test]
fn bare_star_matches_everything() {
    assert!(resource_matches("*", "documents/payroll/2024"));
    assert!(resource_matches("*", "users"));
}

#[test]
fn action_matching_is_case_insensitive() {
    assert!(action_matches("*", "delete"));
    assert!(action_matches("READ", "read"));
    assert!(!action_matches("read", "write"));
}

#[test]
fn overlap_detects_shared_paths() {
    assert!(resources_overlap("documents/*", "documents/payroll"));
    assert!(resources_overlap("documents/**", "*/payroll"));
    assert!(resources_overlap("*", "anything/at/all"));
    assert!(!resources_overlap("documents/*", "reports/*"));
    assert!(!resources_overlap("documents/*", "documents/a/b"));
}

#[test]
fn covers_requires_superset() {
    assert!(resource_covers("documents/**", "documents/*"));
    assert!(resource_covers("documents/*", "documents/payroll"));
    assert!(resource_covers("*", "documents/**"));
    assert!(!resource_covers("documents/*", "documents/**"));
    assert!(!resource_covers("documents/payroll", "documents/*"));
}

#[test]
fn action_overlap_and_cover() {
    assert!(actions_overlap("*", "read"));
    assert!(actions_overlap("read", "READ"));
    assert!(!actions_overlap("read", "write"));
    assert!(action_covers("*", "read"));
    assert!(!action_covers("read", "*"));
}
