//! Resource path and action pattern matching for ABAC policies.
//!
//! Resource patterns are `/`-separated paths where `*` matches exactly one
//! segment and `**` matches any number of segments (including none). A bare
//! `*` pattern is shorthand for `**`. Action patterns are a literal action
//! name or `*`.

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;

fn segments(path: &str) -> Vec<&str> {
    let path = path.trim();
    if path == "*" {
        return vec!["**"];
    }
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// True if `path` matches the resource `pattern`.
#[must_use]
pub fn resource_matches(pattern: &str, path: &str) -> bool {
    match_segments(&segments(pattern), &segments(path))
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match (pattern.first(), path.first()) {
        (None, None) => true,
        (None, Some(_)) => false,
        (Some(&"**"), _) => (0..=path.len()).any(|skip| match_segments(&pattern[1..], &path[skip..])),
        (Some(_), None) => false,
        (Some(&"*"), Some(_)) => match_segments(&pattern[1..], &path[1..]),
        (Some(lit), Some(seg)) => lit == seg && match_segments(&pattern[1..], &path[1..]),
    }
}

/// True if `action` matches the action `pattern`. Comparison ignores case.
#[must_use]
pub fn action_matches(pattern: &str, action: &str) -> bool {
    let pattern = pattern.trim();
    pattern == "*" || pattern.eq_ignore_ascii_case(action.trim())
}

/// Conservative overlap test: true when some concrete path could match both
/// patterns.
#[must_use]
pub fn resources_overlap(a: &str, b: &str) -> bool {
    overlap_segments(&segments(a), &segments(b))
}

fn overlap_segments(a: &[&str], b: &[&str]) -> bool {
    match (a.first(), b.first()) {
        (None, None) => true,
        (Some(&"**"), _) => {
            overlap_segments(&a[1..], b) || (!b.is_empty() && overlap_segments(a, &b[1..]))
        }
        (_, Some(&"**")) => {
            overlap_segments(a, &b[1..]) || (!a.is_empty() && overlap_segments(&a[1..], b))
        }
        (None, Some(_)) | (Some(_), None) => false,
        (Some(x), Some(y)) => {
            (*x == "*" || *y == "*" || x == y) && overlap_segments(&a[1..], &b[1..])
        }
    }
}

/// True when every path matched by `inner` is also matched by `outer`.
#[must_use]
pub fn resource_covers(outer: &str, inner: &str) -> bool {
    covers_segments(&segments(outer), &segments(inner))
}

fn covers_segments(outer: &[&str], inner: &[&str]) -> bool {
    match (outer.first(), inner.first()) {
        (None, None) => true,
        (Some(&"**"), _) => {
            covers_segments(&outer[1..], inner) || (!inner.is_empty() && covers_segments(outer, &inner[1..]))
        }
        (None, Some(_)) | (Some(_), None) => false,
        (_, Some(&"**")) => false,
        (Some(&"*"), Some(_)) => covers_segments(&outer[1..], &inner[1..]),
        (Some(x), Some(y)) => x == y && covers_segments(&outer[1..], &inner[1..]),
    }
}

#[must_use]
pub fn actions_overlap(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a == "*" || b == "*" || a.eq_ignore_ascii_case(b)
}

#[must_use]
pub fn action_covers(outer: &str, inner: &str) -> bool {
    let (outer, inner) = (outer.trim(), inner.trim());
    outer == "*" || (inner != "*" && outer.eq_ignore_ascii_case(inner))
}
