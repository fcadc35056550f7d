//! Public landing page with sign-in and get-started entry points.

use leptos::prelude::*;

use crate::routes::{LANDING_PATH, LEGAL_PATH, LOGIN_PATH, ONBOARDING_PATH};

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing">
            <header class="landing__header">
                <a href=LANDING_PATH class="landing__brand">
                    "Nafas"
                </a>
            </header>
            <main class="landing__main">
                <h1 class="landing__title">"Begin Your Recovery Journey"</h1>
                <p class="landing__lead">
                    "A safe, supportive space for reflection, growth, and community connection."
                </p>
                <div class="landing__actions">
                    <a href=LOGIN_PATH class="btn btn--primary">
                        "Sign In"
                    </a>
                    <a href=ONBOARDING_PATH class="btn btn--muted">
                        "Get Started"
                    </a>
                </div>
            </main>
            <footer class="landing__footer">
                <a href=LEGAL_PATH class="landing__legal">
                    "Privacy & Terms"
                </a>
            </footer>
        </div>
    }
}
