//! Home tab.

use leptos::prelude::*;
use leptos_meta::Title;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Home"/>
        <div class="page">
            <h1 class="page__title">"Home"</h1>
            <p class="page__lead">"Welcome back. Take a moment to breathe and reflect."</p>
        </div>
    }
}
