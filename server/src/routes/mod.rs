//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos app with SSR, its static `/pkg` assets,
//! and `/healthz`. The edge redirector wraps all of it, so redirects happen
//! before any page renders.


use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use session::edge::EdgeRules;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::edge;

/// Routes that do not go through Leptos.
fn service_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Leptos SSR frontend plus service routes, behind the edge redirector.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app() -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    let site_pkg_dir = leptos_options.site_pkg_dir.to_string();

    let router = service_routes()
        .merge(leptos_router)
        .nest_service(&format!("/{site_pkg_dir}"), ServeDir::new(site_root_path.join(&site_pkg_dir)));

    Ok(with_layers(router, EdgeRules::default()))
}

/// Apply the edge rules and the shared HTTP layers.
fn with_layers(router: Router, rules: EdgeRules) -> Router {
    edge::layer(router, rules)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
