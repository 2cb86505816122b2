//! Auth errors surfaced to callers and logs.

/// Generic message shown when login fails for a reason the backend did not explain.
pub const LOGIN_FALLBACK: &str = "Invalid credentials";

/// Generic message shown when login could not reach the backend at all.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";

/// Generic message shown when registration fails without a backend detail.
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Errors produced by session operations.
///
/// `Authentication` and `Registration` carry the user-facing message verbatim
/// so pages can render `err.to_string()` directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Login was refused or could not complete.
    #[error("{0}")]
    Authentication(String),

    /// Registration was refused or could not complete.
    #[error("{0}")]
    Registration(String),

    /// The backend answered a verification request with a non-success status.
    #[error("token rejected: status {status}")]
    Rejected { status: u16 },

    /// The HTTP request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl AuthError {
    /// True when the failure came from the network rather than the backend's answer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
