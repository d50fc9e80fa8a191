use iam::{RiskLevel, UserStatus};

use super::*;

#[test]
fn blank_choice_means_no_filter() {
    assert_eq!(parse_choice::<RiskLevel>(""), None);
    assert_eq!(parse_choice::<RiskLevel>("  "), None);
    assert_eq!(text_choice(" "), None);
}

#[test]
fn wire_values_parse() {
    assert_eq!(parse_choice::<RiskLevel>("medium"), Some(RiskLevel::Medium));
    assert_eq!(parse_choice::<UserStatus>("suspended"), Some(UserStatus::Suspended));
    assert_eq!(text_choice(" Finance "), Some("Finance".to_owned()));
}

#[test]
fn unknown_value_is_ignored() {
    assert_eq!(parse_choice::<UserStatus>("archived"), None);
}
