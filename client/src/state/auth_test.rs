use super::*;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_token() {
    let state = AuthState::default();
    assert!(state.token.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn auth_state_empty_token_is_not_authenticated() {
    let state = AuthState { token: Some(String::new()) };
    assert!(!state.is_authenticated());
}

// =============================================================
// from_session
// =============================================================

#[test]
fn from_session_mirrors_stored_token() {
    let session = Session::in_memory();
    session.store("tok123");
    let state = AuthState::from_session(&session);
    assert_eq!(state.token.as_deref(), Some("tok123"));
    assert!(state.is_authenticated());
}

#[test]
fn from_session_after_remove_is_signed_out() {
    let session = Session::in_memory();
    session.store("tok123");
    session.remove();
    assert_eq!(AuthState::from_session(&session), AuthState::default());
}
