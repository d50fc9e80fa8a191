use super::*;

#[test]
fn export_filename_uses_date() {
    let now = "2024-06-01T23:59:00Z".parse().unwrap();
    assert_eq!(export_filename("users", now), "users-2024-06-01.csv");
}
