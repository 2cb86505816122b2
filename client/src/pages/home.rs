//! Landing route that forwards to chat or login.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::routes::home_destination;

use crate::components::spinner::Spinner;
use crate::state::auth::AuthState;

/// `/` — sends signed-in visitors to the chat and everyone else to login.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let destination = home_destination(auth.get().is_authenticated());
        navigate(destination, NavigateOptions::default());
    });

    view! { <Spinner label="Loading Application"/> }
}
