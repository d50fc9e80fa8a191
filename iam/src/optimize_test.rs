use super::*;
use crate::mock;

fn role(id: &str, permissions: &[&str]) -> Role {
    Role {
        id: id.to_owned(),
        name: id.to_owned(),
        description: String::new(),
        permissions: permissions.iter().map(|p| (*p).to_owned()).collect(),
        user_count: 0,
        is_system: false,
        created_at: mock::reference_time(),
        updated_at: mock::reference_time(),
    }
}

fn holder(id: &str, roles: &[&str]) -> User {
    let mut user = mock::users().remove(0);
    user.id = id.to_owned();
    user.username = id.to_owned();
    user.roles = roles.iter().map(|r| (*r).to_owned()).collect();
    user
}

#[test]
fn demo_data_suggestions_in_order() {
    let found = analyze(&mock::roles(), &mock::permissions(), &mock::users());
    let ids = found.iter().map(|o| o.id.as_str()).collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            "duplicate-permission:perm-users-read",
            "redundant-assignment:u-dave:role-viewer",
            "redundant-assignment:u-grace:role-viewer",
            "empty-role:role-legacy",
            "unassigned-role:role-readonly",
            "unused-permission:perm-reports-export",
            "unused-permission:perm-users-view",
        ]
    );
}

#[test]
fn duplicate_permissions_group_by_resource_action_scope() {
    let found = analyze(&mock::roles(), &mock::permissions(), &mock::users());
    let dup = found
        .iter()
        .find(|o| o.kind == OptimizationKind::DuplicatePermission)
        .unwrap();
    assert_eq!(dup.targets, vec!["perm-users-read", "perm-users-view"]);
    assert_eq!(dup.reduction, 1);
    assert_eq!(dup.impact, RiskLevel::Medium);
}

#[test]
fn system_roles_are_never_unassigned() {
    let mut admin = role("sys", &["p1"]);
    admin.is_system = true;
    let found = analyze(&[admin, role("custom", &["p1"])], &[], &[]);
    let ids = found.iter().map(|o| o.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["unassigned-role:custom"]);
}

#[test]
fn empty_role_is_not_also_unassigned() {
    let found = analyze(&[role("empty", &[])], &[], &[]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, OptimizationKind::EmptyRole);
}

#[test]
fn identical_roles_keep_the_smaller_id() {
    let roles = [role("a", &["p1"]), role("b", &["p1"])];
    let found = analyze(&roles, &[], &[holder("u1", &["b", "a"])]);
    let redundant = found
        .iter()
        .filter(|o| o.kind == OptimizationKind::RedundantAssignment)
        .collect::<Vec<_>>();
    assert_eq!(redundant.len(), 1);
    assert_eq!(redundant[0].targets, vec!["u1", "b"]);
}

#[test]
fn clean_setup_has_no_suggestions() {
    let roles = [role("reader", &["p1"]), role("writer", &["p2"])];
    let mut perms = mock::permissions();
    perms.truncate(2);
    perms[0].id = "p1".to_owned();
    perms[1].id = "p2".to_owned();
    let users = [holder("u1", &["reader"]), holder("u2", &["writer", "reader"])];
    assert!(analyze(&roles, &perms, &users).is_empty());
}

#[test]
fn kind_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(OptimizationKind::UnusedPermission).unwrap(),
        serde_json::json!("unused_permission")
    );
}
