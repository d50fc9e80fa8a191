//! Policy test panel state.
//!
//! DESIGN
//! ======
//! Attribute bags are typed as JSON text. The resource box also accepts a
//! bare path such as `documents/finance/q3.pdf`, which becomes
//! `{ "path": .. }`. The request goes to the backend first; when the backend
//! cannot answer, the loaded policies are evaluated in the browser and the
//! result is flagged as local.

#[cfg(test)]
#[path = "policy_test_test.rs"]
mod policy_test_test;

use iam::AbacPolicy;
use iam::evaluate::{PolicyTestRequest, PolicyTestResult, evaluate};
use iam::validate::{FieldErrors, is_blank};
use serde_json::{Map, Value};

use crate::net::error::ApiError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyTestForm {
    pub subject: String,
    pub resource: String,
    pub action: String,
    pub environment: String,
}

impl Default for PolicyTestForm {
    fn default() -> Self {
        Self {
            subject: r#"{ "id": "u-alice", "department": "engineering", "roles": ["role-admin"] }"#.to_owned(),
            resource: "documents/finance/q3.pdf".to_owned(),
            action: "read".to_owned(),
            environment: r#"{ "time": "10:00" }"#.to_owned(),
        }
    }
}

fn parse_object(raw: &str, field: &'static str, label: &str, errors: &mut FieldErrors) -> Value {
    if is_blank(raw) {
        return Value::Object(Map::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ Value::Object(_)) => v,
        _ => {
            errors.add(field, format!("{label} must be a JSON object"));
            Value::Null
        }
    }
}

impl PolicyTestForm {
    /// Build the request, or the per-field problems that prevent it.
    ///
    /// # Errors
    ///
    /// Field errors for a missing action or malformed attribute JSON.
    pub fn to_request(&self) -> Result<PolicyTestRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let subject = parse_object(&self.subject, "subject", "Subject", &mut errors);
        let environment = parse_object(&self.environment, "environment", "Environment", &mut errors);

        let raw = self.resource.trim();
        let resource = if raw.starts_with('{') {
            parse_object(raw, "resource", "Resource", &mut errors)
        } else if raw.is_empty() {
            errors.add("resource", "Resource is required");
            Value::Null
        } else {
            serde_json::json!({ "path": raw })
        };

        if is_blank(&self.action) {
            errors.add("action", "Action is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PolicyTestRequest {
            subject,
            resource,
            action: self.action.trim().to_owned(),
            environment,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyTestState {
    pub form: PolicyTestForm,
    pub errors: FieldErrors,
    pub running: bool,
    pub result: Option<PolicyTestResult>,
    /// The result was computed in the browser.
    pub local: bool,
    pub error: Option<String>,
}

impl PolicyTestState {
    /// Validate and mark running; returns the request to send.
    pub fn start(&mut self) -> Option<PolicyTestRequest> {
        if self.running {
            return None;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.errors.clear();
                self.error = None;
                self.running = true;
                Some(request)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Store the backend answer, falling back to `policies` when the backend
    /// could not evaluate. An expired session is reported, not evaluated.
    pub fn finish(
        &mut self,
        request: &PolicyTestRequest,
        result: Result<PolicyTestResult, ApiError>,
        policies: &[AbacPolicy],
    ) {
        self.running = false;
        match result {
            Ok(result) => {
                self.result = Some(result);
                self.local = false;
            }
            Err(e) if e.is_unauthorized() => {
                self.result = None;
                self.local = false;
                self.error = Some(e.to_string());
            }
            Err(_) => {
                self.result = Some(evaluate(policies, request));
                self.local = true;
            }
        }
    }
}
