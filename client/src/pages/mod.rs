//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Auth requirements are declared where routes are mounted,
//! not inside the pages.

pub mod chat;
pub mod home;
pub mod login;
pub mod register;
