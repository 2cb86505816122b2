//! Cookie string codecs for the auth token.
//!
//! The same cookie is written by `document.cookie` in the browser and read
//! from the `Cookie` request header by the server, so both directions live
//! here as plain string functions.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Cookie name carrying the bearer token.
pub const AUTH_COOKIE_NAME: &str = "authToken";

/// Durable-storage key carrying the bearer token.
pub const STORAGE_KEY: &str = "authToken";

/// Cookie lifetime: one day.
pub const COOKIE_MAX_AGE_SECS: u32 = 60 * 60 * 24;

const EPOCH_EXPIRY: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

fn auth_entry(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim_start)
        .find_map(|entry| entry.strip_prefix(AUTH_COOKIE_NAME)?.strip_prefix('='))
}

/// Find the auth token in a `document.cookie` value.
///
/// Entries are `; `-separated. The value ends at the next `=`, matching how
/// the browser side has always read it. An empty value counts as no token.
#[must_use]
pub fn find_token(header: &str) -> Option<String> {
    auth_entry(header)
        .map(|value| value.split('=').next().unwrap_or_default())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Find the auth token in a request `Cookie` header.
///
/// Unlike [`find_token`] the whole value after the name is kept, so padded
/// tokens such as `abc==` survive. An empty value counts as no token.
#[must_use]
pub fn find_request_token(header: &str) -> Option<String> {
    auth_entry(header)
        .map(str::trim_end)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// `document.cookie` assignment that stores `token` site-wide for one day.
#[must_use]
pub fn set_cookie_value(token: &str) -> String {
    format!("{AUTH_COOKIE_NAME}={token}; path=/; max-age={COOKIE_MAX_AGE_SECS}")
}

/// `document.cookie` assignment that expires the auth cookie immediately.
#[must_use]
pub fn expired_cookie_value() -> String {
    format!("{AUTH_COOKIE_NAME}=; path=/; expires={EPOCH_EXPIRY}")
}
