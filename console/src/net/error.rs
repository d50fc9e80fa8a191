//! Request failure type shared by all API helpers.
//!
//! The `Display` text is what screens store in their `error` field and render
//! inline, so messages are written for the person using the console.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("session expired, sign in again")]
    Unauthorized,
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Map a non-2xx response to an error, pulling a message out of a JSON
    /// `{ "error": .. }` or `{ "message": .. }` body when there is one.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthorized;
        }
        Self::Status {
            status,
            message: body_message(body).unwrap_or_else(|| default_reason(status).to_owned()),
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

fn body_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return ["error", "message"]
            .into_iter()
            .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
            .map(str::to_owned);
    }
    // Plain-text bodies are shown as-is when short enough to read.
    (body.len() <= 200 && !body.starts_with('<')).then(|| body.to_owned())
}

fn default_reason(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        403 => "forbidden",
        404 => "not found",
        409 => "conflict",
        422 => "invalid data",
        502 => "backend unreachable",
        503 => "service unavailable",
        500..=599 => "server error",
        _ => "unexpected status",
    }
}
