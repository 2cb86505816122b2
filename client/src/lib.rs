//! # client
//!
//! Leptos + WASM frontend shell for the real-time chat application.
//!
//! This crate owns the browser side of authentication: the token store backed
//! by `localStorage` and `document.cookie`, the `AuthGateway` route guard, and
//! the login/register pages. The chat UI itself lives behind `/protected/`.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach the Leptos app to server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
