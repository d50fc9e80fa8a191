//! Display helpers for timestamps, counts and percentages.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use iam::Timestamp;

/// `2024-06-01 12:00` in UTC.
#[must_use]
pub fn timestamp(ts: Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// `2024-06-01`.
#[must_use]
pub fn date(ts: Timestamp) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Last-login style cell: the timestamp, or `Never`.
#[must_use]
pub fn optional_timestamp(ts: Option<Timestamp>) -> String {
    ts.map_or_else(|| "Never".to_owned(), timestamp)
}

/// Coarse relative time such as `5m ago`; older than a week shows the date.
#[must_use]
pub fn relative(ts: Timestamp, now: Timestamp) -> String {
    let secs = (now - ts).num_seconds();
    if secs < 60 {
        return "just now".to_owned();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }
    date(ts)
}

/// `1 user` / `3 users`.
#[must_use]
pub fn count(n: usize, singular: &str, plural: &str) -> String {
    format!("{n} {}", if n == 1 { singular } else { plural })
}

/// Current time; chrono reads the browser clock under WASM.
#[must_use]
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
