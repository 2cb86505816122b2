//! Injectable session handle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every consumer of the bearer token receives a [`Session`] instead of
//! touching storage directly. The UI provides one via Leptos context, the
//! server builds one per request from the `Cookie` header, and tests build
//! one over memory slots.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::fmt;
use std::sync::Arc;

use crate::store::{MemoryStore, TokenStore};

/// Single source of truth for the current session credential.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    /// Session over fresh memory slots.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::in_memory())
    }

    /// Current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.load().filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a freshly issued token.
    pub fn store(&self, token: &str) {
        tracing::debug!("session token stored");
        self.store.save(token);
    }

    /// Drop the token from every location.
    pub fn remove(&self) {
        tracing::debug!("session token removed");
        self.store.clear();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
