//! Onboarding welcome. Always reachable, even for onboarded visitors.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::routes::HOME_PATH;
use crate::state::gate::SessionGate;
use crate::util::session::use_session;

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let gate = use_session();
    let navigate = use_navigate();

    let on_begin = move |_| {
        gate.update(SessionGate::complete_onboarding);
        navigate(HOME_PATH, NavigateOptions::default());
    };

    view! {
        <div class="centered-card">
            <div class="centered-card__body">
                <h1 class="centered-card__title">"Welcome to Nafas"</h1>
                <p class="centered-card__lead">"Your journey to recovery and reflection begins here."</p>
                <button class="btn btn--primary btn--wide" on:click=on_begin>
                    "Begin Your Journey"
                </button>
            </div>
        </div>
    }
}
