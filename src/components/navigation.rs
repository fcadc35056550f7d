//! Desktop top bar with section links and log out.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::routes::{HOME_PATH, TOP_NAV, is_active};
use crate::util::session::{logout, use_auth_provider, use_session};

/// Sticky top navigation, hidden on small screens.
#[component]
pub fn Navigation() -> impl IntoView {
    let gate = use_session();
    let provider = use_auth_provider();
    let pathname = use_location().pathname;

    let on_logout = move |_| logout(gate, provider.clone());

    view! {
        <nav class="top-nav">
            <a href=HOME_PATH class="top-nav__brand">
                "Nafas"
            </a>
            <div class="top-nav__links">
                {TOP_NAV
                    .into_iter()
                    .map(|item| {
                        let class = move || {
                            if is_active(item, &pathname.get()) {
                                "top-nav__link top-nav__link--active"
                            } else {
                                "top-nav__link"
                            }
                        };
                        view! {
                            <a href=item.page.path() class=class>
                                {item.label}
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
            <button class="top-nav__logout" on:click=on_logout>
                "Log Out"
            </button>
        </nav>
    }
}
