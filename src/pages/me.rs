//! Profile tab with a log out action for small screens.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::util::session::{logout, use_auth_provider, use_session};

#[component]
pub fn MePage() -> impl IntoView {
    let gate = use_session();
    let provider = use_auth_provider();

    view! {
        <Title text="Profile"/>
        <div class="page">
            <h1 class="page__title">"Profile"</h1>
            <p class="page__lead">"Your personal space for tracking progress."</p>
            <button class="btn btn--muted" on:click=move |_| logout(gate, provider.clone())>
                "Log Out"
            </button>
        </div>
    }
}
