use super::*;
use crate::model::{PolicyStatus, Timestamp};
use serde_json::json;

fn ts() -> Timestamp {
    "2024-06-01T12:00:00Z".parse().unwrap()
}

fn policy(id: &str, effect: PolicyEffect, priority: i32, resources: &[&str], actions: &[&str]) -> AbacPolicy {
    AbacPolicy {
        id: id.to_owned(),
        name: format!("Policy {id}"),
        description: String::new(),
        effect,
        priority,
        status: PolicyStatus::Active,
        resources: resources.iter().map(|s| (*s).to_owned()).collect(),
        actions: actions.iter().map(|s| (*s).to_owned()).collect(),
        conditions: Vec::new(),
        created_at: ts(),
        updated_at: ts(),
    }
}

fn cond(attribute: &str, operator: ConditionOperator, value: Value) -> Condition {
    Condition {
        attribute: attribute.to_owned(),
        operator,
        value,
    }
}

fn request(path: &str, action: &str) -> PolicyTestRequest {
    PolicyTestRequest {
        subject: json!({ "id": "u-1", "department": "finance", "level": 3, "groups": ["staff", "auditors"] }),
        resource: json!({ "path": path, "type": "document", "classification": "internal" }),
        action: action.to_owned(),
        environment: json!({ "time": "10:30", "network": "corporate" }),
    }
}

#[test]
fn no_policies_is_not_applicable() {
    let result = evaluate(&[], &request("documents/finance/q1", "read"));
    assert_eq!(result.decision, Decision::NotApplicable);
    assert!(!result.allowed);
    assert_eq!(result.determining_policy, None);
    assert_eq!(result.evaluated, 0);
    assert_eq!(result.reason, "No applicable policy; access is denied by default");
}

#[test]
fn matching_allow_grants_access() {
    let policies = [policy("p1", PolicyEffect::Allow, 100, &["documents/finance/*"], &["read"])];
    let result = evaluate(&policies, &request("documents/finance/q1", "read"));
    assert_eq!(result.decision, Decision::Allow);
    assert!(result.allowed);
    assert_eq!(result.determining_policy.as_deref(), Some("p1"));
    assert_eq!(result.reason, "Allowed by policy 'Policy p1' (priority 100)");
}

#[test]
fn resource_can_match_by_type() {
    let policies = [policy("p1", PolicyEffect::Allow, 1, &["document"], &["*"])];
    let result = evaluate(&policies, &request("anything/else", "delete"));
    assert!(result.allowed);
}

#[test]
fn higher_priority_wins() {
    let policies = [
        policy("deny-low", PolicyEffect::Deny, 10, &["documents/**"], &["read"]),
        policy("allow-high", PolicyEffect::Allow, 500, &["documents/finance/*"], &["read"]),
    ];
    let result = evaluate(&policies, &request("documents/finance/q1", "read"));
    assert_eq!(result.decision, Decision::Allow);
    assert_eq!(result.matched.len(), 2);
    assert_eq!(result.matched[0].policy_id, "allow-high");
}

#[test]
fn deny_overrides_allow_at_equal_priority() {
    let policies = [
        policy("allow", PolicyEffect::Allow, 100, &["documents/**"], &["read"]),
        policy("deny", PolicyEffect::Deny, 100, &["documents/**"], &["read"]),
    ];
    let result = evaluate(&policies, &request("documents/finance/q1", "read"));
    assert_eq!(result.decision, Decision::Deny);
    assert_eq!(result.determining_policy.as_deref(), Some("deny"));
    assert!(!result.allowed);
}

#[test]
fn inactive_policies_are_skipped_and_traced() {
    let mut draft = policy("draft", PolicyEffect::Allow, 100, &["**"], &["*"]);
    draft.status = PolicyStatus::Draft;
    let result = evaluate(&[draft], &request("documents/x", "read"));
    assert_eq!(result.decision, Decision::NotApplicable);
    assert_eq!(result.evaluated, 0);
    assert_eq!(result.trace[0].outcome, TraceOutcome::Inactive);
}

#[test]
fn trace_explains_mismatches() {
    let mut conditional = policy("cond", PolicyEffect::Allow, 1, &["documents/**"], &["read"]);
    conditional.conditions = vec![
        cond("subject.department", ConditionOperator::Equals, json!("finance")),
        cond("environment.network", ConditionOperator::Equals, json!("vpn")),
    ];
    let policies = [
        policy("res", PolicyEffect::Allow, 1, &["reports/*"], &["read"]),
        policy("act", PolicyEffect::Allow, 1, &["documents/**"], &["write"]),
        conditional,
    ];
    let result = evaluate(&policies, &request("documents/finance/q1", "read"));
    let outcomes = result.trace.iter().map(|t| t.outcome.clone()).collect::<Vec<_>>();
    assert_eq!(
        outcomes,
        vec![
            TraceOutcome::ResourceMismatch,
            TraceOutcome::ActionMismatch,
            TraceOutcome::ConditionFailed { index: 1 },
        ]
    );
    assert_eq!(result.evaluated, 3);
}

#[test]
fn condition_operators() {
    let ctx = json!({
        "subject": { "department": "finance", "level": 3, "groups": ["staff", "auditors"], "email": "a@corp.example" },
        "environment": { "time": "10:30" },
    });
    let holds = |attribute: &str, op: ConditionOperator, value: Value| condition_holds(&cond(attribute, op, value), &ctx);

    assert!(holds("subject.department", ConditionOperator::Equals, json!("finance")));
    assert!(holds("subject.level", ConditionOperator::Equals, json!(3.0)));
    assert!(holds("subject.department", ConditionOperator::NotEquals, json!("hr")));
    assert!(holds("subject.groups", ConditionOperator::Contains, json!("auditors")));
    assert!(holds("subject.email", ConditionOperator::Contains, json!("@corp")));
    assert!(holds("subject.email", ConditionOperator::StartsWith, json!("a@")));
    assert!(holds("subject.department", ConditionOperator::In, json!(["hr", "finance"])));
    assert!(holds("subject.groups", ConditionOperator::In, json!(["auditors"])));
    assert!(holds("subject.department", ConditionOperator::NotIn, json!(["hr"])));
    assert!(!holds("subject.department", ConditionOperator::NotIn, json!("hr")));
    assert!(holds("subject.level", ConditionOperator::GreaterThan, json!(2)));
    assert!(holds("subject.level", ConditionOperator::LessThan, json!("4")));
    assert!(holds("environment.time", ConditionOperator::LessThan, json!("18:00")));
    assert!(!holds("environment.time", ConditionOperator::GreaterThan, json!("18:00")));
}

#[test]
fn missing_attributes_never_hold() {
    let ctx = json!({ "subject": { "department": null } });
    for op in ConditionOperator::ALL {
        assert!(
            !condition_holds(&cond("subject.department", *op, json!(["x"])), &ctx),
            "operator {op:?}"
        );
        assert!(!condition_holds(&cond("subject.missing", *op, json!("x")), &ctx));
    }
}

#[test]
fn resolve_rejects_empty_segments() {
    let ctx = json!({ "subject": { "a": { "b": 1 } } });
    assert_eq!(resolve(&ctx, "subject.a.b"), Some(&json!(1)));
    assert_eq!(resolve(&ctx, "subject..b"), None);
    assert_eq!(resolve(&ctx, "subject.a.c"), None);
}

#[test]
fn result_serializes_camel_case_trace() {
    let policies = [policy("p1", PolicyEffect::Allow, 1, &["documents/**"], &["read"])];
    let result = evaluate(&policies, &request("documents/a", "read"));
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["determiningPolicy"], json!("p1"));
    assert_eq!(value["trace"][0], json!({ "policyId": "p1", "outcome": "matched" }));
    let back: PolicyTestResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}
