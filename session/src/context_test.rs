use super::*;
use crate::store::{MemorySlot, MirroredStore, TokenSlot};

#[test]
fn store_then_token_round_trips() {
    let session = Session::in_memory();
    session.store("abc");
    assert_eq!(session.token(), Some("abc".to_owned()));
    assert!(session.is_authenticated());
}

#[test]
fn empty_token_is_not_authenticated() {
    let session = Session::in_memory();
    session.store("");
    assert_eq!(session.token(), None);
    assert!(!session.is_authenticated());
}

#[test]
fn remove_clears_both_locations() {
    let durable = MemorySlot::new();
    let cookie = MemorySlot::new();
    let session = Session::new(MirroredStore::new(durable.clone(), cookie.clone()));

    session.store("abc");
    session.remove();

    assert_eq!(session.token(), None);
    assert_eq!(durable.read(), None);
    assert_eq!(cookie.read(), None);
}

#[test]
fn clones_share_the_same_store() {
    let session = Session::in_memory();
    let other = session.clone();
    session.store("shared");
    assert_eq!(other.token(), Some("shared".to_owned()));
}

#[test]
fn debug_output_hides_token_value() {
    let session = Session::in_memory();
    session.store("secret-value");
    let rendered = format!("{session:?}");
    assert!(!rendered.contains("secret-value"));
    assert!(rendered.contains("authenticated: true"));
}
