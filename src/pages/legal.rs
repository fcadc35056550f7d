//! Privacy policy and terms of service.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::routes::LANDING_PATH;

#[component]
pub fn LegalPage() -> impl IntoView {
    view! {
        <Title text="Privacy & Terms"/>
        <div class="legal">
            <div class="legal__body">
                <a href=LANDING_PATH class="legal__back">
                    "← Back to Home"
                </a>
                <h1 class="legal__title">"Privacy & Terms"</h1>

                <section class="legal__section">
                    <h2>"Privacy Policy"</h2>
                    <p>
                        "Your privacy matters to us. We collect only the information necessary to provide "
                        "our services and never share your personal data with third parties without your consent."
                    </p>
                </section>

                <section class="legal__section">
                    <h2>"Terms of Service"</h2>
                    <p>
                        "By using Nafas, you agree to use the platform respectfully and in accordance with "
                        "our community guidelines. We reserve the right to remove content that violates these terms."
                    </p>
                </section>
            </div>
        </div>
    }
}
