//! # session
//!
//! Bearer-token session core shared by the Leptos client and the Axum server.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps one opaque token issued by the chat backend. Three
//! consumers need it: the edge redirector (cookie presence only), the
//! `AuthGateway` component (live verification), and the login/register
//! forms (which create it). This crate holds everything about that token
//! that does not depend on a rendering runtime, so it compiles for both
//! native and `wasm32` targets.
//!
//! - [`store`] / [`cookie`]: persistence adapters and cookie string codecs.
//! - [`context`]: the injectable [`Session`] handle.
//! - [`gate`]: route-intent rules and the verification state machine.
//! - [`edge`]: request-level redirect rules.
//! - [`api`]: REST helpers for `/token`, `/register`, `/users/me`.

pub mod api;
pub mod context;
pub mod cookie;
pub mod edge;
pub mod error;
pub mod gate;
pub mod routes;
pub mod store;

pub use api::{AuthClient, AuthPayload, RegisterRequest};
pub use context::Session;
pub use error::AuthError;
pub use gate::{AuthGate, GateOutcome, IdentityVerifier, RouteIntent, Ticket};
