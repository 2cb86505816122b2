//! Full-screen loading indicator.

use leptos::prelude::*;

/// Centered spinner with a caption.
#[component]
pub fn Spinner(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="spinner-screen">
            <div class="spinner-screen__body">
                <div class="spinner-screen__wheel"></div>
                <p class="spinner-screen__label">{label}</p>
            </div>
        </div>
    }
}
