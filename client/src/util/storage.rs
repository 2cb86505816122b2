//! Token stores for each rendering context.
//!
//! In the browser (`hydrate`) the token lives in `localStorage` and in the
//! `authToken` cookie; reads try `localStorage` first. During server rendering
//! (`ssr`) the token is read from the request's `Cookie` header and writes are
//! dropped. Without either feature (native tests) the store is empty.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::Session;
#[cfg(not(feature = "hydrate"))]
use session::store::RequestCookieStore;
#[cfg(feature = "hydrate")]
use session::{
    cookie,
    store::{MirroredStore, TokenSlot},
};
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;

/// Log message for a failed browser storage call, if it failed.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn failure_message<E: std::fmt::Debug>(action: &str, result: Result<(), E>) -> Option<String> {
    result.err().map(|e| format!("{action} failed: {e:?}"))
}

#[cfg(feature = "hydrate")]
fn warn_on_failure<E: std::fmt::Debug>(action: &str, result: Result<(), E>) {
    if let Some(message) = failure_message(action, result) {
        log::warn!("{message}");
    }
}

/// `window.localStorage` entry under [`cookie::STORAGE_KEY`].
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageSlot;

#[cfg(feature = "hydrate")]
impl LocalStorageSlot {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(feature = "hydrate")]
impl TokenSlot for LocalStorageSlot {
    fn read(&self) -> Option<String> {
        Self::storage()?
            .get_item(cookie::STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn write(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            warn_on_failure("localStorage write", storage.set_item(cookie::STORAGE_KEY, token));
        }
    }

    fn erase(&self) {
        if let Some(storage) = Self::storage() {
            warn_on_failure("localStorage erase", storage.remove_item(cookie::STORAGE_KEY));
        }
    }
}

/// The `authToken` entry of `document.cookie`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookieSlot;

#[cfg(feature = "hydrate")]
impl DocumentCookieSlot {
    fn document() -> Option<web_sys::HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
    }
}

#[cfg(feature = "hydrate")]
impl TokenSlot for DocumentCookieSlot {
    fn read(&self) -> Option<String> {
        let header = Self::document()?.cookie().ok()?;
        cookie::find_token(&header)
    }

    fn write(&self, token: &str) {
        if let Some(doc) = Self::document() {
            warn_on_failure("cookie write", doc.set_cookie(&cookie::set_cookie_value(token)));
        }
    }

    fn erase(&self) {
        if let Some(doc) = Self::document() {
            warn_on_failure("cookie erase", doc.set_cookie(&cookie::expired_cookie_value()));
        }
    }
}

/// Session for whichever context is rendering right now.
pub fn context_session() -> Session {
    #[cfg(feature = "hydrate")]
    {
        Session::new(MirroredStore::new(LocalStorageSlot, DocumentCookieSlot))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Session::new(RequestCookieStore::from_header(request_cookie_header().as_deref()))
    }
}

/// Raw `Cookie` header of the request being server-rendered.
#[cfg(all(feature = "ssr", not(feature = "hydrate")))]
fn request_cookie_header() -> Option<String> {
    let parts = leptos::prelude::use_context::<http::request::Parts>()?;
    parts
        .headers
        .get(http::header::COOKIE)?
        .to_str()
        .ok()
        .map(str::to_owned)
}

#[cfg(not(any(feature = "ssr", feature = "hydrate")))]
fn request_cookie_header() -> Option<String> {
    None
}
