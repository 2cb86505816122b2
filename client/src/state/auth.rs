//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reactive mirror of the persisted token. The `Session` in context is the
//! source of truth; this signal exists so route guards and pages re-run when
//! the token appears or disappears.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::Session;

/// Authentication state tracking the current bearer token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
}

impl AuthState {
    /// Snapshot whatever `session` currently holds.
    pub fn from_session(session: &Session) -> Self {
        Self { token: session.token() }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}
