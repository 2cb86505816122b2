//! Route guard rendering its children only after the auth check passes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page route is wrapped in `AuthGateway` with the page's intent. The
//! edge redirector already bounced cookie-less requests for protected paths;
//! this component does the finer check in the browser, including a live
//! `/users/me` verification for protected pages.
//!
//! LIFECYCLE
//! =========
//! The check re-runs when the route path or the token mirror changes. Once a
//! mount reaches `Verified` it stays there; later checks can still navigate
//! away. Unmounting invalidates the in-flight check so a late response cannot
//! purge the token or navigate from a page that is gone.

#[cfg(test)]
#[path = "auth_gateway_test.rs"]
mod auth_gateway_test;

use leptos::prelude::*;
use session::gate::{GateOutcome, GateStatus, RouteIntent};
use session::routes::CHAT_PATH;

use crate::components::spinner::Spinner;
use crate::state::auth::AuthState;

/// Gate `children` behind the auth rules for `intent`.
///
/// `redirect_path` is where already-authenticated visitors are sent from the
/// login and register pages. `loading` replaces the default spinner shown
/// until the check passes.
#[component]
pub fn AuthGateway(
    children: ChildrenFn,
    #[prop(optional)] intent: RouteIntent,
    #[prop(into, default = CHAT_PATH.to_owned())] redirect_path: String,
    #[prop(optional, into)] loading: Option<ViewFn>,
) -> impl IntoView {
    let status = RwSignal::new(GateStatus::Unverified);

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::{use_location, use_navigate};
        use session::{AuthGate, Session};

        let auth = expect_context::<RwSignal<AuthState>>();
        let session = expect_context::<Session>();
        let location = use_location();
        let navigate = use_navigate();
        let gate = AuthGate::new();

        let unmount_gate = gate.clone();
        on_cleanup(move || unmount_gate.invalidate());

        Effect::new(move || {
            location.pathname.track();
            auth.track();

            // Reserve the generation now: cleanup or a newer run may land
            // before the spawned task is first polled.
            let ticket = gate.begin();
            let gate = gate.clone();
            let session = session.clone();
            let navigate = navigate.clone();
            let redirect_path = redirect_path.clone();
            leptos::task::spawn_local(async move {
                let client = crate::util::auth::auth_client();
                let outcome = gate
                    .run(ticket, &session, &client, intent, &redirect_path, |path| {
                        navigate(path, NavigateOptions::default());
                    })
                    .await;
                apply_outcome(&outcome, status, auth);
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (intent, redirect_path);

    let loading = loading.unwrap_or_else(|| ViewFn::from(default_loading));

    view! {
        <Show when=move || status.get() == GateStatus::Verified fallback=loading>
            {children()}
        </Show>
    }
}

/// Fold one check result into the mount's status and the token mirror.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn apply_outcome(outcome: &GateOutcome, status: RwSignal<GateStatus>, auth: RwSignal<AuthState>) {
    if *outcome == GateOutcome::Revoked {
        // Already on the way to login; no need to re-run the check.
        auth.update_untracked(|a| a.token = None);
    }
    // A mount never drops back to the placeholder once verified.
    if outcome.status() == Some(GateStatus::Verified) {
        status.set(GateStatus::Verified);
    }
}

fn default_loading() -> impl IntoView {
    view! { <Spinner label="Verifying authentication..."/> }
}
