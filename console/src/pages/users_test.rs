use iam::mock;

use super::*;

#[test]
fn role_names_resolve_ids_in_order() {
    let users = mock::users();
    let bob = users.iter().find(|u| u.username == "bob").unwrap();
    let names = role_names(bob, &mock::roles());
    assert_eq!(names.split(", ").count(), 2);
    assert!(!names.contains("role-"));
}

#[test]
fn unknown_role_ids_are_shown_raw() {
    let mut user = mock::users().remove(0);
    user.roles = vec!["role-ghost".to_owned()];
    assert_eq!(role_names(&user, &mock::roles()), "role-ghost");
}

#[test]
fn user_without_roles_is_blank() {
    let mut user = mock::users().remove(0);
    user.roles.clear();
    assert_eq!(role_names(&user, &mock::roles()), "");
}
