use chrono::TimeDelta;

use super::*;

fn at() -> Timestamp {
    "2024-06-01T12:00:00Z".parse().unwrap()
}

#[test]
fn absolute_formats() {
    assert_eq!(timestamp(at()), "2024-06-01 12:00");
    assert_eq!(date(at()), "2024-06-01");
    assert_eq!(optional_timestamp(None), "Never");
    assert_eq!(optional_timestamp(Some(at())), "2024-06-01 12:00");
}

#[test]
fn relative_buckets() {
    let now = at();
    assert_eq!(relative(now, now), "just now");
    assert_eq!(relative(now + TimeDelta::minutes(5), now), "just now");
    assert_eq!(relative(now - TimeDelta::seconds(59), now), "just now");
    assert_eq!(relative(now - TimeDelta::minutes(5), now), "5m ago");
    assert_eq!(relative(now - TimeDelta::hours(3), now), "3h ago");
    assert_eq!(relative(now - TimeDelta::days(2), now), "2d ago");
    assert_eq!(relative(now - TimeDelta::days(10), now), "2024-05-22");
}

#[test]
fn count_pluralizes() {
    assert_eq!(count(1, "user", "users"), "1 user");
    assert_eq!(count(0, "user", "users"), "0 users");
}
