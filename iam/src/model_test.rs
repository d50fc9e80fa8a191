use super::*;
use serde_json::json;

fn ts() -> Timestamp {
    "2024-03-01T12:00:00Z".parse().unwrap()
}

fn user(first: &str, last: &str) -> User {
    User {
        id: "u-1".to_owned(),
        username: "jdoe".to_owned(),
        email: "jdoe@example.com".to_owned(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        status: UserStatus::Active,
        roles: vec!["r-admin".to_owned()],
        department: None,
        mfa_enabled: false,
        last_login: None,
        created_at: ts(),
    }
}

// =============================================================
// Enums
// =============================================================

#[test]
fn enum_from_str_is_case_insensitive_and_trims() {
    assert_eq!(" HIGH ".parse::<RiskLevel>(), Ok(RiskLevel::High));
    assert_eq!("non_compliant".parse::<ComplianceStatus>(), Ok(ComplianceStatus::NonCompliant));
    assert_eq!("Starts_With".parse::<ConditionOperator>(), Ok(ConditionOperator::StartsWith));
}

#[test]
fn enum_from_str_rejects_unknown_values() {
    let err = "severe".parse::<RiskLevel>().unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownVariant {
            kind: "RiskLevel",
            value: "severe".to_owned()
        }
    );
    assert_eq!(err.to_string(), "unknown RiskLevel value: \"severe\"");
}

#[test]
fn enum_as_str_matches_serde_names() {
    for status in ComplianceStatus::ALL {
        let wire = serde_json::to_value(status).unwrap();
        assert_eq!(wire, json!(status.as_str()));
    }
    for op in ConditionOperator::ALL {
        let wire = serde_json::to_value(op).unwrap();
        assert_eq!(wire, json!(op.as_str()));
    }
}

#[test]
fn risk_levels_are_ordered() {
    assert!(RiskLevel::Low < RiskLevel::Medium);
    assert!(RiskLevel::High < RiskLevel::Critical);
    assert_eq!(RiskLevel::ALL.iter().max(), Some(&RiskLevel::Critical));
}

#[test]
fn display_uses_label() {
    assert_eq!(ComplianceStatus::NonCompliant.to_string(), "Non-compliant");
    assert_eq!(UserStatus::Suspended.to_string(), "Suspended");
}

// =============================================================
// Records
// =============================================================

#[test]
fn user_full_name_falls_back_to_username() {
    assert_eq!(user("Jane", "Doe").full_name(), "Jane Doe");
    assert_eq!(user("Jane", "").full_name(), "Jane");
    assert_eq!(user(" ", "").full_name(), "jdoe");
}

#[test]
fn user_role_membership() {
    let u = user("Jane", "Doe");
    assert!(u.has_role("r-admin"));
    assert!(!u.has_role("r-viewer"));
    assert!(u.is_active());
}

#[test]
fn user_deserializes_camel_case_with_defaults() {
    let raw = json!({
        "id": "u-9",
        "username": "ops",
        "email": "ops@example.com",
        "firstName": "Op",
        "lastName": "Erator",
        "status": "pending",
        "createdAt": "2024-03-01T12:00:00Z"
    });
    let u: User = serde_json::from_value(raw).unwrap();
    assert_eq!(u.first_name, "Op");
    assert_eq!(u.status, UserStatus::Pending);
    assert!(u.roles.is_empty());
    assert!(!u.mfa_enabled);
    assert_eq!(u.last_login, None);
}

#[test]
fn resource_kind_travels_as_type() {
    let raw = json!({ "id": "res-1", "name": "Payroll", "type": "document" });
    let r: Resource = serde_json::from_value(raw).unwrap();
    assert_eq!(r.kind, "document");
    let back = serde_json::to_value(&r).unwrap();
    assert_eq!(back["type"], json!("document"));
    assert!(back.get("kind").is_none());
}

#[test]
fn alert_status_unresolved() {
    assert!(AlertStatus::Open.is_unresolved());
    assert!(AlertStatus::Investigating.is_unresolved());
    assert!(!AlertStatus::Resolved.is_unresolved());
    assert!(!AlertStatus::Dismissed.is_unresolved());
}

#[test]
fn unread_count_skips_read_items() {
    let make = |id: &str, read: bool| Notification {
        id: id.to_owned(),
        title: "t".to_owned(),
        message: "m".to_owned(),
        kind: NotificationKind::Info,
        read,
        created_at: ts(),
        link: None,
    };
    let items = vec![make("n1", false), make("n2", true), make("n3", false)];
    assert_eq!(unread_count(&items), 2);
    assert_eq!(unread_count(&[]), 0);
}
