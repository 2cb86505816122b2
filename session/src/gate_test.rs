use std::cell::RefCell;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

use tokio::sync::oneshot;

use super::*;
use crate::store::{MemorySlot, MirroredStore, TokenSlot};

/// Verifier returning a fixed answer and counting calls.
struct FixedVerifier {
    result: Result<(), AuthError>,
    calls: AtomicUsize,
}

impl FixedVerifier {
    fn accepting() -> Self {
        Self { result: Ok(()), calls: AtomicUsize::new(0) }
    }

    fn rejecting(status: u16) -> Self {
        Self { result: Err(AuthError::Rejected { status }), calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentityVerifier for FixedVerifier {
    async fn verify(&self, _token: &str) -> Result<(), AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Verifier that blocks until released, then accepts or rejects.
struct HeldVerifier {
    release: Mutex<Option<oneshot::Receiver<()>>>,
    result: Result<(), AuthError>,
}

impl IdentityVerifier for HeldVerifier {
    async fn verify(&self, _token: &str) -> Result<(), AuthError> {
        let rx = self.release.lock().expect("lock").take();
        if let Some(rx) = rx {
            let _ = rx.await;
        }
        self.result.clone()
    }
}

/// Verifier simulating an unmount while the request is in flight.
struct UnmountingVerifier {
    gate: AuthGate,
}

impl IdentityVerifier for UnmountingVerifier {
    async fn verify(&self, _token: &str) -> Result<(), AuthError> {
        self.gate.invalidate();
        Err(AuthError::Rejected { status: 401 })
    }
}

fn session_with(token: Option<&str>) -> Session {
    let session = Session::in_memory();
    if let Some(token) = token {
        session.store(token);
    }
    session
}

// =============================================================
// decide
// =============================================================

#[test]
fn decide_without_token_on_protected_goes_to_login() {
    assert_eq!(
        decide(RouteIntent::Protected, None, "/protected/chat"),
        GateStep::Navigate("/auth/login".to_owned())
    );
}

#[test]
fn decide_with_token_on_auth_pages_goes_to_redirect_target() {
    for intent in [RouteIntent::Login, RouteIntent::Register] {
        assert_eq!(
            decide(intent, Some("tok"), "/protected/rooms"),
            GateStep::Navigate("/protected/rooms".to_owned())
        );
    }
}

#[test]
fn decide_with_token_on_protected_verifies() {
    assert_eq!(
        decide(RouteIntent::Protected, Some("tok"), "/protected/chat"),
        GateStep::Verify("tok".to_owned())
    );
}

#[test]
fn decide_without_token_on_auth_pages_admits() {
    assert_eq!(decide(RouteIntent::Login, None, "/x"), GateStep::Admit);
    assert_eq!(decide(RouteIntent::Register, None, "/x"), GateStep::Admit);
}

#[test]
fn decide_treats_empty_token_as_absent() {
    assert_eq!(
        decide(RouteIntent::Protected, Some(""), "/protected/chat"),
        GateStep::Navigate("/auth/login".to_owned())
    );
}

#[test]
fn route_intent_defaults_to_protected() {
    assert_eq!(RouteIntent::default(), RouteIntent::Protected);
    assert_eq!(RouteIntent::Register.to_string(), "register");
}

#[test]
fn route_intent_parses_its_display_form() {
    for intent in [RouteIntent::Login, RouteIntent::Register, RouteIntent::Protected] {
        assert_eq!(intent.to_string().parse::<RouteIntent>(), Ok(intent));
    }
    assert_eq!(" login ".parse::<RouteIntent>(), Ok(RouteIntent::Login));
}

#[test]
fn route_intent_rejects_unknown_names() {
    let err = "admin".parse::<RouteIntent>().unwrap_err();
    assert_eq!(err, UnknownIntent("admin".to_owned()));
    assert_eq!(err.to_string(), "unknown route intent: \"admin\"");
}

#[test]
fn outcome_status_mapping() {
    assert_eq!(GateOutcome::Verified.status(), Some(GateStatus::Verified));
    assert_eq!(GateOutcome::Revoked.status(), Some(GateStatus::Unverified));
    assert_eq!(GateOutcome::Stale.status(), None);
}

// =============================================================
// check
// =============================================================

#[tokio::test]
async fn no_token_on_protected_navigates_to_login_and_never_verifies() {
    let session = session_with(None);
    let verifier = FixedVerifier::accepting();
    let visited = RefCell::new(Vec::new());

    let outcome = AuthGate::new()
        .check(&session, &verifier, RouteIntent::Protected, "/protected/chat", |p| {
            visited.borrow_mut().push(p.to_owned());
        })
        .await;

    assert_eq!(outcome, GateOutcome::Redirected("/auth/login".to_owned()));
    assert_ne!(outcome.status(), Some(GateStatus::Verified));
    assert_eq!(visited.into_inner(), vec!["/auth/login".to_owned()]);
    assert_eq!(verifier.calls(), 0);
}

#[tokio::test]
async fn token_on_login_redirects_without_verification() {
    let session = session_with(Some("tok"));
    let verifier = FixedVerifier::rejecting(401);
    let visited = RefCell::new(Vec::new());

    let outcome = AuthGate::new()
        .check(&session, &verifier, RouteIntent::Login, "/protected/chat", |p| {
            visited.borrow_mut().push(p.to_owned());
        })
        .await;

    assert_eq!(outcome, GateOutcome::Redirected("/protected/chat".to_owned()));
    assert_eq!(visited.into_inner(), vec!["/protected/chat".to_owned()]);
    assert_eq!(verifier.calls(), 0);
    assert_eq!(session.token(), Some("tok".to_owned()));
}

#[tokio::test]
async fn no_token_on_register_admits_immediately() {
    let session = session_with(None);
    let verifier = FixedVerifier::accepting();
    let visited = RefCell::new(Vec::<String>::new());

    let outcome = AuthGate::new()
        .check(&session, &verifier, RouteIntent::Register, "/protected/chat", |p| {
            visited.borrow_mut().push(p.to_owned());
        })
        .await;

    assert_eq!(outcome, GateOutcome::Verified);
    assert!(visited.into_inner().is_empty());
}

#[tokio::test]
async fn valid_token_on_protected_is_verified() {
    let session = session_with(Some("tok"));
    let verifier = FixedVerifier::accepting();

    let outcome = AuthGate::new()
        .check(&session, &verifier, RouteIntent::Protected, "/protected/chat", |_| {
            panic!("should not navigate");
        })
        .await;

    assert_eq!(outcome, GateOutcome::Verified);
    assert_eq!(verifier.calls(), 1);
    assert_eq!(session.token(), Some("tok".to_owned()));
}

#[tokio::test]
async fn rejected_token_is_purged_from_both_locations_and_login_requested() {
    let durable = MemorySlot::new();
    let cookie = MemorySlot::new();
    let session = Session::new(MirroredStore::new(durable.clone(), cookie.clone()));
    session.store("expired");
    let verifier = FixedVerifier::rejecting(401);
    let visited = RefCell::new(Vec::new());

    let outcome = AuthGate::new()
        .check(&session, &verifier, RouteIntent::Protected, "/protected/chat", |p| {
            visited.borrow_mut().push(p.to_owned());
        })
        .await;

    assert_eq!(outcome, GateOutcome::Revoked);
    assert_eq!(durable.read(), None);
    assert_eq!(cookie.read(), None);
    assert_eq!(visited.into_inner(), vec!["/auth/login".to_owned()]);
}

#[tokio::test]
async fn transport_failure_is_treated_as_rejection() {
    let session = session_with(Some("tok"));
    let verifier = FixedVerifier {
        result: Err(AuthError::Transport("connection refused".to_owned())),
        calls: AtomicUsize::new(0),
    };

    let outcome = AuthGate::new()
        .check(&session, &verifier, RouteIntent::Protected, "/protected/chat", |_| {})
        .await;

    assert_eq!(outcome, GateOutcome::Revoked);
    assert_eq!(session.token(), None);
}

// =============================================================
// stale results
// =============================================================

#[tokio::test]
async fn invalidated_check_applies_nothing() {
    let session = session_with(Some("tok"));
    let gate = AuthGate::new();
    let verifier = UnmountingVerifier { gate: gate.clone() };
    let visited = RefCell::new(Vec::<String>::new());

    let outcome = gate
        .check(&session, &verifier, RouteIntent::Protected, "/protected/chat", |p| {
            visited.borrow_mut().push(p.to_owned());
        })
        .await;

    assert_eq!(outcome, GateOutcome::Stale);
    assert_eq!(session.token(), Some("tok".to_owned()));
    assert!(visited.into_inner().is_empty());
}

#[tokio::test]
async fn superseded_check_is_discarded_in_favor_of_latest() {
    let session = session_with(Some("tok"));
    let gate = AuthGate::new();
    let (tx, rx) = oneshot::channel();
    let slow = HeldVerifier {
        release: Mutex::new(Some(rx)),
        result: Err(AuthError::Rejected { status: 401 }),
    };
    let fast = FixedVerifier::accepting();
    let visited = RefCell::new(Vec::<String>::new());
    let record = |p: &str| visited.borrow_mut().push(p.to_owned());

    let first = gate.check(&session, &slow, RouteIntent::Protected, "/protected/chat", record);
    let second = async {
        let outcome = gate
            .check(&session, &fast, RouteIntent::Protected, "/protected/chat", record)
            .await;
        let _ = tx.send(());
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, GateOutcome::Stale);
    assert_eq!(second, GateOutcome::Verified);
    assert_eq!(session.token(), Some("tok".to_owned()));
    assert!(visited.into_inner().is_empty());
}

#[tokio::test]
async fn invalidate_before_first_poll_makes_check_stale() {
    let session = session_with(Some("tok"));
    let gate = AuthGate::new();
    let verifier = FixedVerifier::rejecting(401);
    let visited = RefCell::new(Vec::<String>::new());

    let pending = gate.check(&session, &verifier, RouteIntent::Protected, "/protected/chat", |p| {
        visited.borrow_mut().push(p.to_owned());
    });
    gate.invalidate();
    let outcome = pending.await;

    assert_eq!(outcome, GateOutcome::Stale);
    assert_eq!(verifier.calls(), 0);
    assert_eq!(session.token(), Some("tok".to_owned()));
    assert!(visited.into_inner().is_empty());
}

#[tokio::test]
async fn superseded_ticket_never_navigates() {
    let session = session_with(None);
    let gate = AuthGate::new();
    let verifier = FixedVerifier::accepting();
    let visited = RefCell::new(Vec::<String>::new());

    let old = gate.begin();
    let _newer = gate.begin();
    let outcome = gate
        .run(old, &session, &verifier, RouteIntent::Protected, "/protected/chat", |p| {
            visited.borrow_mut().push(p.to_owned());
        })
        .await;

    assert_eq!(outcome, GateOutcome::Stale);
    assert!(visited.into_inner().is_empty());
}

#[tokio::test]
async fn run_with_current_ticket_applies_rules() {
    let session = session_with(None);
    let gate = AuthGate::new();
    let verifier = FixedVerifier::accepting();
    let visited = RefCell::new(Vec::new());

    let ticket = gate.begin();
    let outcome = gate
        .run(ticket, &session, &verifier, RouteIntent::Protected, "/protected/chat", |p| {
            visited.borrow_mut().push(p.to_owned());
        })
        .await;

    assert_eq!(outcome, GateOutcome::Redirected("/auth/login".to_owned()));
    assert_eq!(visited.into_inner(), vec!["/auth/login".to_owned()]);
}
