//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use session::RouteIntent;

use crate::components::auth_gateway::AuthGateway;
use crate::pages::{chat::ChatPage, home::HomePage, login::LoginPage, register::RegisterPage};
use crate::state::auth::AuthState;
use crate::util::storage::context_session;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session handle and its reactive mirror, then mounts every
/// page behind an `AuthGateway` carrying that page's intent.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = context_session();
    let auth = RwSignal::new(AuthState::from_session(&session));
    provide_context(session);
    provide_context(auth);

    view! {
        <Title text="Real-Time Chat"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("auth"), StaticSegment("login")) view=LoginRoute/>
                <Route path=(StaticSegment("auth"), StaticSegment("register")) view=RegisterRoute/>
                <Route path=(StaticSegment("protected"), StaticSegment("chat")) view=ChatRoute/>
            </Routes>
        </Router>
    }
}

#[component]
fn LoginRoute() -> impl IntoView {
    view! {
        <AuthGateway intent=RouteIntent::Login>
            <LoginPage/>
        </AuthGateway>
    }
}

#[component]
fn RegisterRoute() -> impl IntoView {
    view! {
        <AuthGateway intent=RouteIntent::Register>
            <RegisterPage/>
        </AuthGateway>
    }
}

#[component]
fn ChatRoute() -> impl IntoView {
    view! {
        <AuthGateway>
            <ChatPage/>
        </AuthGateway>
    }
}
