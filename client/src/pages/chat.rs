//! Protected chat route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only reachable through an `AuthGateway` with the `protected` intent. The
//! conversation UI is mounted into `.chat-page__body`; this page owns the
//! session chrome around it.

use leptos::prelude::*;
use session::Session;

use crate::state::auth::AuthState;
use crate::util::auth::sign_out;

/// `/protected/chat` — header with sign-out around the conversation area.
#[component]
pub fn ChatPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<Session>();

    let on_logout = move |_| sign_out(auth, &session);

    view! {
        <div class="chat-page">
            <header class="chat-page__header">
                <h1>"Real-Time Chat"</h1>
                <button class="btn chat-page__logout" on:click=on_logout>
                    "Log out"
                </button>
            </header>
            <main class="chat-page__body"></main>
        </div>
    }
}
