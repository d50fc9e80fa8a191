//! Signed-in session for the current browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as context by `App`; route pages read it to decide whether to
//! redirect to `/login`, and the nav bar reads it for the signed-in name.
//!
//! Only the bearer token survives a reload, so after a restore the session is
//! authenticated but `user` stays empty until the next sign-in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use iam::User;

use crate::net::api::LoginResponse;

#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// True until the stored token has been checked on mount.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }
}

impl AuthState {
    /// Finish the mount-time check with whatever token storage held.
    pub fn restore(&mut self, token: Option<String>) {
        self.token = token;
        self.loading = false;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn sign_in(&mut self, response: LoginResponse) {
        self.token = Some(response.token);
        self.user = Some(response.user);
        self.loading = false;
    }

    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
        self.loading = false;
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.user.as_ref().map_or_else(|| "Administrator".to_owned(), User::full_name)
    }

    /// Protected pages leave once the check has finished without a token.
    #[must_use]
    pub fn should_redirect_unauth(&self) -> bool {
        !self.loading && !self.is_authenticated()
    }
}
