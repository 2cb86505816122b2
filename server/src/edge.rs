//! Axum middleware applying the edge redirect rules to every request.
//!
//! Runs ahead of routing and SSR, so a visitor without an `authToken` cookie
//! never renders a protected page, and `/protectd/...` links land on the
//! corrected path. Token validity is left to the client-side gateway.

#[cfg(test)]
#[path = "edge_test.rs"]
mod edge_test;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use session::cookie::AUTH_COOKIE_NAME;
use session::edge::{EdgeAction, EdgeRules};

/// True when the request carries a non-empty `authToken` cookie.
fn has_auth_cookie(jar: &CookieJar) -> bool {
    jar.get(AUTH_COOKIE_NAME).is_some_and(|c| !c.value().is_empty())
}

/// Middleware body for [`axum::middleware::from_fn_with_state`].
pub async fn redirect(State(rules): State<EdgeRules>, jar: CookieJar, req: Request, next: Next) -> Response {
    let action = rules.route(req.uri().path(), req.uri().query(), has_auth_cookie(&jar));
    match action {
        EdgeAction::Redirect(location) => {
            tracing::debug!(path = %req.uri().path(), %location, "edge redirect");
            Redirect::temporary(&location).into_response()
        }
        EdgeAction::Continue => next.run(req).await,
    }
}

/// Wrap every route of `router`, including its fallback, in the edge rules.
pub fn layer(router: Router, rules: EdgeRules) -> Router {
    router.layer(middleware::from_fn_with_state(rules, redirect))
}
