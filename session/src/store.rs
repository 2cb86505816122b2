//! Token persistence adapters.
//!
//! DESIGN
//! ======
//! A [`TokenSlot`] is one physical location (local storage, a cookie, memory).
//! A [`TokenStore`] is the policy callers talk to. The browser policy is
//! [`MirroredStore`]: it writes and clears two slots together and reads the
//! durable slot first, falling back to the cookie. The two copies are never
//! reconciled; if they disagree the durable value wins.
//!
//! Server rendering uses [`RequestCookieStore`], a read-only snapshot of the
//! incoming `Cookie` header. Writes there are no-ops because there is no
//! browser to persist into.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cookie;

/// One place a token can live.
pub trait TokenSlot: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn erase(&self);
}

/// Persistence adapter behind [`crate::Session`].
pub trait TokenStore: Send + Sync {
    /// Current token, if any.
    fn load(&self) -> Option<String>;
    /// Persist `token` everywhere this store writes.
    fn save(&self, token: &str);
    /// Forget the token everywhere this store writes.
    fn clear(&self);
}

/// Dual-location store: durable slot first, cookie slot second.
#[derive(Debug, Clone)]
pub struct MirroredStore<D, C> {
    durable: D,
    cookie: C,
}

impl<D, C> MirroredStore<D, C> {
    pub fn new(durable: D, cookie: C) -> Self {
        Self { durable, cookie }
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    pub fn cookie(&self) -> &C {
        &self.cookie
    }
}

impl<D: TokenSlot, C: TokenSlot> TokenStore for MirroredStore<D, C> {
    fn load(&self) -> Option<String> {
        let present = |token: &String| !token.is_empty();
        self.durable
            .read()
            .filter(present)
            .or_else(|| self.cookie.read().filter(present))
    }

    fn save(&self, token: &str) {
        self.durable.write(token);
        self.cookie.write(token);
    }

    fn clear(&self) {
        self.durable.erase();
        self.cookie.erase();
    }
}

/// Read-only view of the token carried by an incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookieStore {
    token: Option<String>,
}

impl RequestCookieStore {
    /// Build from a raw `Cookie` header value, if the request had one.
    #[must_use]
    pub fn from_header(header: Option<&str>) -> Self {
        Self { token: header.and_then(cookie::find_request_token) }
    }
}

impl TokenStore for RequestCookieStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn save(&self, _token: &str) {}

    fn clear(&self) {}
}

/// In-process slot. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let slot = Self::new();
        slot.write(token);
        slot
    }
}

impl TokenSlot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn write(&self, token: &str) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn erase(&self) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Memory-backed stand-in for both browser locations.
pub type MemoryStore = MirroredStore<MemorySlot, MemorySlot>;

impl MemoryStore {
    /// Empty store with two independent memory slots.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemorySlot::new(), MemorySlot::new())
    }
}
