//! Bearer token persistence in `localStorage`.
//!
//! The token is the only client state that survives a reload. SSR paths
//! no-op and report no token.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

pub const STORAGE_KEY: &str = "iam_console_token";

/// A stored value counts as a token only when it has non-whitespace content.
#[must_use]
pub fn normalize(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read the stored token.
pub fn load() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        normalize(storage()?.get_item(STORAGE_KEY).ok().flatten())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist `token`; a blank token clears the entry instead.
pub fn save(token: &str) {
    let Some(token) = normalize(Some(token.to_owned())) else {
        clear();
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.set_item(STORAGE_KEY, &token);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

pub fn clear() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
