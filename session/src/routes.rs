//! Route paths shared by the UI and the edge redirector.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CHAT_PATH: &str = "/protected/chat";

/// Every path under this prefix requires a token.
pub const PROTECTED_PREFIX: &str = "/protected/";

/// Known misspelling of [`PROTECTED_PREFIX`] that gets auto-corrected.
pub const MISSPELLED_PROTECTED_PREFIX: &str = "/protectd/";

/// Where `/` sends a visitor: the chat when a token exists, login otherwise.
#[must_use]
pub fn home_destination(has_token: bool) -> &'static str {
    if has_token { CHAT_PATH } else { LOGIN_PATH }
}
