//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components wrap route content with auth checks and shared chrome while
//! reading session state from Leptos context providers.

pub mod auth_gateway;
pub mod spinner;
