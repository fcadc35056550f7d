use leptos::prelude::*;
use leptos_meta::Title;

#[component]
pub fn ReflectPage() -> impl IntoView {
    view! {
        <Title text="Reflect"/>
        <div class="page">
            <h1 class="page__title">"Reflect"</h1>
            <p class="page__lead">"Take time to reflect on your journey and growth."</p>
        </div>
    }
}
