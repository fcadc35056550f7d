//! Community tab.

use leptos::prelude::*;
use leptos_meta::Title;

#[component]
pub fn CommunityPage() -> impl IntoView {
    view! {
        <Title text="Community"/>
        <div class="page">
            <h1 class="page__title">"Community"</h1>
            <p class="page__lead">"Connect with others on similar journeys."</p>
        </div>
    }
}
