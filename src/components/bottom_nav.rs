//! Mobile tab bar pinned to the bottom of the viewport.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::routes::{BOTTOM_NAV, Page, is_active};

fn icon(page: Page) -> &'static str {
    match page {
        Page::Home => "⌂",
        Page::Reflect => "✎",
        Page::Community => "◎",
        _ => "●",
    }
}

#[component]
pub fn BottomNav() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <nav class="bottom-nav">
            <div class="bottom-nav__items">
                {BOTTOM_NAV
                    .into_iter()
                    .map(|item| {
                        let class = move || {
                            if is_active(item, &pathname.get()) {
                                "bottom-nav__item bottom-nav__item--active"
                            } else {
                                "bottom-nav__item"
                            }
                        };
                        view! {
                            <a href=item.page.path() class=class>
                                <span class="bottom-nav__icon" aria-hidden="true">
                                    {icon(item.page)}
                                </span>
                                <span class="bottom-nav__label">{item.label}</span>
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </nav>
    }
}
