//! Route-intent gate deciding whether wrapped content may render.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages declare what they need (`login`, `register`, `protected`). The gate
//! combines that intent with the stored token and, for protected pages, a live
//! `/users/me` check. The UI component owns rendering; this module owns the
//! rules and the side effects (token purge, navigation).
//!
//! STALE RESULTS
//! =============
//! Each [`AuthGate::check`] (or [`AuthGate::begin`]) takes a new generation
//! number at call time. When a check is first polled or its verification
//! resolves after a newer check started (path or token changed) or after
//! [`AuthGate::invalidate`] (unmount), it yields `Stale` without touching the
//! token or navigating.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::context::Session;
use crate::error::AuthError;
use crate::routes::LOGIN_PATH;

/// A page's declared authentication requirement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RouteIntent {
    Login,
    Register,
    #[default]
    Protected,
}

impl RouteIntent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Protected => "protected",
        }
    }
}

impl FromStr for RouteIntent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            "protected" => Ok(Self::Protected),
            other => Err(UnknownIntent(other.to_owned())),
        }
    }
}

impl fmt::Display for RouteIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route intent name that is not `login`, `register`, or `protected`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown route intent: {0:?}")]
pub struct UnknownIntent(pub String);

/// Rendering status of one gated mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateStatus {
    /// Show the loading placeholder.
    #[default]
    Unverified,
    /// Show the wrapped content.
    Verified,
}

/// What the gate must do next for a given intent and token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateStep {
    Navigate(String),
    Verify(String),
    Admit,
}

/// Result of one [`AuthGate::check`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// Render the wrapped content.
    Verified,
    /// Navigation was requested; stay on the placeholder.
    Redirected(String),
    /// Verification failed; the token was purged and login requested.
    Revoked,
    /// A newer check superseded this one; nothing was applied.
    Stale,
}

impl GateOutcome {
    #[must_use]
    pub fn status(&self) -> Option<GateStatus> {
        match self {
            Self::Verified => Some(GateStatus::Verified),
            Self::Redirected(_) | Self::Revoked => Some(GateStatus::Unverified),
            Self::Stale => None,
        }
    }
}

/// Backend check that a bearer token is still accepted.
pub trait IdentityVerifier {
    fn verify(&self, token: &str) -> impl Future<Output = Result<(), AuthError>>;
}

/// Rule table, evaluated in order. Empty tokens count as absent.
#[must_use]
pub fn decide(intent: RouteIntent, token: Option<&str>, redirect_path: &str) -> GateStep {
    let token = token.filter(|t| !t.is_empty());
    match (token, intent) {
        (None, RouteIntent::Protected) => GateStep::Navigate(LOGIN_PATH.to_owned()),
        (Some(_), RouteIntent::Login | RouteIntent::Register) => GateStep::Navigate(redirect_path.to_owned()),
        (Some(token), RouteIntent::Protected) => GateStep::Verify(token.to_owned()),
        (None, RouteIntent::Login | RouteIntent::Register) => GateStep::Admit,
    }
}

/// Generation number reserved by [`AuthGate::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Per-mount gate holding the verification generation counter.
#[derive(Clone, Debug, Default)]
pub struct AuthGate {
    generation: Arc<AtomicU64>,
}

impl AuthGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard whatever check is currently in flight.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Reserve a generation for a check about to be scheduled.
    ///
    /// Take the ticket synchronously, before handing the work to an executor,
    /// so an [`AuthGate::invalidate`] that lands before the first poll still
    /// marks the check as stale.
    #[must_use]
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Run one evaluation of the rule table against `session`.
    ///
    /// The ticket is taken when this is called, not when the returned future
    /// is first polled.
    pub fn check<V, N>(
        &self,
        session: &Session,
        verifier: &V,
        intent: RouteIntent,
        redirect_path: &str,
        navigate: N,
    ) -> impl Future<Output = GateOutcome>
    where
        V: IdentityVerifier,
        N: Fn(&str),
    {
        let ticket = self.begin();
        self.run(ticket, session, verifier, intent, redirect_path, navigate)
    }

    /// Evaluate the rules under a ticket from [`AuthGate::begin`].
    ///
    /// `navigate` is called at most once, and never for a stale ticket. On
    /// failed verification the token is removed from `session` before
    /// navigating to login.
    pub async fn run<V, N>(
        &self,
        ticket: Ticket,
        session: &Session,
        verifier: &V,
        intent: RouteIntent,
        redirect_path: &str,
        navigate: N,
    ) -> GateOutcome
    where
        V: IdentityVerifier,
        N: Fn(&str),
    {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "skipping superseded auth check");
            return GateOutcome::Stale;
        }
        let token = session.token();

        match decide(intent, token.as_deref(), redirect_path) {
            GateStep::Admit => GateOutcome::Verified,
            GateStep::Navigate(path) => {
                tracing::debug!(%intent, %path, "auth gate redirect");
                navigate(&path);
                GateOutcome::Redirected(path)
            }
            GateStep::Verify(token) => {
                let result = verifier.verify(&token).await;
                if !self.is_current(ticket) {
                    tracing::debug!(ticket = ticket.0, "discarding stale verification result");
                    return GateOutcome::Stale;
                }
                match result {
                    Ok(()) => GateOutcome::Verified,
                    Err(e) => {
                        tracing::warn!(error = %e, transport = e.is_transport(), "auth verification failed");
                        session.remove();
                        navigate(LOGIN_PATH);
                        GateOutcome::Revoked
                    }
                }
            }
        }
    }
}
