//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages go through these so the persisted token and the reactive
//! `AuthState` mirror never drift apart. Navigation after sign-in or
//! sign-out is left to the surrounding `AuthGateway`, which re-runs whenever
//! the mirror changes.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::api::DEFAULT_API_BASE_URL;
use session::{AuthClient, Session};

use crate::state::auth::AuthState;

/// Backend base URL, fixed at build time through `CHAT_API_BASE_URL`.
pub const API_BASE_URL: &str = resolve_base_url(option_env!("CHAT_API_BASE_URL"));

const fn resolve_base_url(configured: Option<&'static str>) -> &'static str {
    match configured {
        Some(url) => url,
        None => DEFAULT_API_BASE_URL,
    }
}

/// Client for the chat backend's auth endpoints.
pub fn auth_client() -> AuthClient {
    AuthClient::new(API_BASE_URL)
}

/// Re-read the session into the reactive mirror after a login.
pub fn refresh_auth(auth: RwSignal<AuthState>, session: &Session) {
    auth.set(AuthState::from_session(session));
}

/// Forget the token everywhere. The route guard then sends the visitor to login.
pub fn sign_out(auth: RwSignal<AuthState>, session: &Session) {
    session.remove();
    auth.set(AuthState::default());
}
