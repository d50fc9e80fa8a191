use iam::mock;

use super::*;

#[test]
fn groups_follow_category_order_and_skip_empty() {
    let groups = group_by_category(&mock::permissions(), &mock::categories());
    let names: Vec<_> = groups.iter().map(|(name, _)| name.as_str()).collect();
    let total: usize = groups.iter().map(|(_, members)| members.len()).sum();
    assert_eq!(total, mock::permissions().len());
    assert!(!names.contains(&"Other"));
    assert!(groups.iter().all(|(_, members)| !members.is_empty()));
}

#[test]
fn uncategorized_permissions_land_in_other() {
    let mut permissions = mock::permissions();
    permissions[0].category = "cat-missing".to_owned();
    let groups = group_by_category(&permissions, &mock::categories());
    let (name, members) = groups.last().unwrap();
    assert_eq!(name, "Other");
    assert_eq!(members.len(), 1);
}
