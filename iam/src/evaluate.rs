//! ABAC policy evaluation for the policy test panel.
//!
//! A request names a subject, a resource, an action and an environment, each
//! an attribute bag. A policy applies when it is active, one of its resource
//! patterns matches the resource, one of its actions matches, and every
//! condition holds.
//!
//! DECISION RULES
//! ==============
//! - The highest priority among applicable policies decides.
//! - At that priority an applicable deny overrides any allow.
//! - With no applicable policy the result is `NotApplicable`, which callers
//!   treat as not allowed.
//! - A condition whose attribute is missing from the request never holds.

#[cfg(test)]
#[path = "evaluate_test.rs"]
mod evaluate_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{AbacPolicy, Condition, ConditionOperator, PolicyEffect};
use crate::pattern::{action_matches, resource_matches};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTestRequest {
    #[serde(default)]
    pub subject: Value,
    /// Object with any of `path`, `id` and `type` plus free attributes.
    #[serde(default)]
    pub resource: Value,
    pub action: String,
    #[serde(default)]
    pub environment: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
    NotApplicable,
}

impl Decision {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
            Self::NotApplicable => "Not applicable",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyMatch {
    pub policy_id: String,
    pub policy_name: String,
    pub effect: PolicyEffect,
    pub priority: i32,
}

/// Why a policy did or did not apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TraceOutcome {
    Inactive,
    ResourceMismatch,
    ActionMismatch,
    /// 0-based index of the first failing condition.
    ConditionFailed { index: usize },
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTrace {
    pub policy_id: String,
    #[serde(flatten)]
    pub outcome: TraceOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTestResult {
    pub decision: Decision,
    pub allowed: bool,
    pub determining_policy: Option<String>,
    /// Applicable policies, highest priority first.
    pub matched: Vec<PolicyMatch>,
    /// Number of active policies considered.
    pub evaluated: usize,
    pub reason: String,
    #[serde(default)]
    pub trace: Vec<PolicyTrace>,
}

/// Evaluate `request` against `policies`.
#[must_use]
pub fn evaluate(policies: &[AbacPolicy], request: &PolicyTestRequest) -> PolicyTestResult {
    let context = serde_json::json!({
        "subject": request.subject,
        "resource": request.resource,
        "environment": request.environment,
    });
    let keys = resource_keys(&request.resource);

    let mut trace = Vec::with_capacity(policies.len());
    let mut matched = Vec::new();
    let mut evaluated = 0usize;

    for policy in policies {
        let outcome = if policy.is_active() {
            evaluated += 1;
            applies(policy, &keys, &request.action, &context)
        } else {
            TraceOutcome::Inactive
        };
        if outcome == TraceOutcome::Matched {
            matched.push(PolicyMatch {
                policy_id: policy.id.clone(),
                policy_name: policy.name.clone(),
                effect: policy.effect,
                priority: policy.priority,
            });
        }
        trace.push(PolicyTrace {
            policy_id: policy.id.clone(),
            outcome,
        });
    }

    // Highest priority first; deny before allow at equal priority.
    matched.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| effect_rank(a.effect).cmp(&effect_rank(b.effect)))
            .then_with(|| a.policy_id.cmp(&b.policy_id))
    });

    let (decision, determining_policy, reason) = match matched.first() {
        Some(top) => {
            let decision = match top.effect {
                PolicyEffect::Allow => Decision::Allow,
                PolicyEffect::Deny => Decision::Deny,
            };
            let verb = if decision == Decision::Allow { "Allowed" } else { "Denied" };
            (
                decision,
                Some(top.policy_id.clone()),
                format!("{verb} by policy '{}' (priority {})", top.policy_name, top.priority),
            )
        }
        None => (
            Decision::NotApplicable,
            None,
            "No applicable policy; access is denied by default".to_owned(),
        ),
    };

    PolicyTestResult {
        decision,
        allowed: decision == Decision::Allow,
        determining_policy,
        matched,
        evaluated,
        reason,
        trace,
    }
}

fn effect_rank(effect: PolicyEffect) -> u8 {
    match effect {
        PolicyEffect::Deny => 0,
        PolicyEffect::Allow => 1,
    }
}

fn resource_keys(resource: &Value) -> Vec<&str> {
    ["path", "id", "type"]
        .into_iter()
        .filter_map(|k| resource.get(k).and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())
        .collect()
}

fn applies(policy: &AbacPolicy, keys: &[&str], action: &str, context: &Value) -> TraceOutcome {
    let resource_hit = policy
        .resources
        .iter()
        .any(|pattern| keys.iter().any(|key| resource_matches(pattern, key)));
    if !resource_hit {
        return TraceOutcome::ResourceMismatch;
    }
    if !policy.actions.iter().any(|pattern| action_matches(pattern, action)) {
        return TraceOutcome::ActionMismatch;
    }
    match policy
        .conditions
        .iter()
        .position(|c| !condition_holds(c, context))
    {
        Some(index) => TraceOutcome::ConditionFailed { index },
        None => TraceOutcome::Matched,
    }
}

/// Walk a dotted attribute path such as `subject.department`.
#[must_use]
pub fn resolve<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = context;
    for segment in path.trim().split('.') {
        if segment.is_empty() {
            return None;
        }
        current = current.get(segment)?;
    }
    match current {
        Value::Null => None,
        other => Some(other),
    }
}

#[must_use]
pub fn condition_holds(condition: &Condition, context: &Value) -> bool {
    let Some(actual) = resolve(context, &condition.attribute) else {
        return false;
    };
    let expected = &condition.value;
    match condition.operator {
        ConditionOperator::Equals => values_equal(actual, expected),
        ConditionOperator::NotEquals => !values_equal(actual, expected),
        ConditionOperator::Contains => match actual {
            Value::String(s) => expected.as_str().is_some_and(|e| s.contains(e)),
            Value::Array(items) => items.iter().any(|item| values_equal(item, expected)),
            _ => false,
        },
        ConditionOperator::StartsWith => match (actual.as_str(), expected.as_str()) {
            (Some(a), Some(e)) => a.starts_with(e),
            _ => false,
        },
        ConditionOperator::In => is_member(actual, expected),
        ConditionOperator::NotIn => expected.is_array() && !is_member(actual, expected),
        ConditionOperator::GreaterThan => compare(actual, expected) == Some(Ordering::Greater),
        ConditionOperator::LessThan => compare(actual, expected) == Some(Ordering::Less),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
        _ => a == b,
    }
}

/// `actual` (or any element of it, for arrays) appears in `expected`.
fn is_member(actual: &Value, expected: &Value) -> bool {
    let Some(options) = expected.as_array() else {
        return false;
    };
    let hit = |value: &Value| options.iter().any(|o| values_equal(value, o));
    match actual {
        Value::Array(items) => items.iter().any(hit),
        other => hit(other),
    }
}

/// Numeric comparison when both sides are numbers (or numeric strings),
/// otherwise lexical comparison of strings, which orders `HH:MM` times and
/// RFC 3339 dates correctly.
fn compare(actual: &Value, expected: &Value) -> Option<Ordering> {
    let as_number = |v: &Value| v.as_f64().or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()));
    match (as_number(actual), as_number(expected)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (actual.as_str(), expected.as_str()) {
            (Some(a), Some(b)) => Some(a.cmp(b)),
            _ => None,
        },
    }
}
