//! Login page requesting an emailed magic link.
//!
//! Without a configured auth provider, debug builds sign in locally so the
//! app stays usable in development. Release builds refuse the request and
//! leave the session flags alone.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::auth::{SIGN_IN_UNEXPECTED_MESSAGE, validate_email_input};
use crate::routes::HOME_PATH;
use crate::state::gate::SessionGate;
use crate::util::session::{use_auth_provider, use_session};

fn submit_label(busy: bool) -> &'static str {
    if busy { "Sending..." } else { "Send Magic Link" }
}

/// Outcome of a submit when no auth provider is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocalSubmit {
    SignedIn,
    Refused(&'static str),
}

/// Local sign-in is only allowed when `allow_local_login` is set (debug builds).
fn submit_without_provider(gate: &mut SessionGate, allow_local_login: bool) -> LocalSubmit {
    if allow_local_login {
        log::warn!("no auth provider configured; signing in locally");
        gate.login();
        LocalSubmit::SignedIn
    } else {
        log::warn!("no auth provider configured; sign-in unavailable");
        LocalSubmit::Refused(SIGN_IN_UNEXPECTED_MESSAGE)
    }
}

/// Where the emailed link should send the visitor back to.
#[cfg(feature = "csr")]
fn redirect_target() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let gate = use_session();
    let provider = use_auth_provider();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let message = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        message.set(String::new());

        let email_value = match validate_email_input(&email.get_untracked()) {
            Ok(v) => v,
            Err(msg) => {
                message.set(msg.to_owned());
                return;
            }
        };

        let Some(provider) = provider.clone() else {
            match gate.try_update(|g| submit_without_provider(g, cfg!(debug_assertions))) {
                Some(LocalSubmit::SignedIn) => navigate(HOME_PATH, NavigateOptions::default()),
                Some(LocalSubmit::Refused(msg)) => message.set(msg.to_owned()),
                None => {}
            }
            return;
        };

        busy.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let msg = crate::net::auth::request_sign_in(&provider, &email_value, &redirect_target()).await;
            message.set(msg);
            busy.set(false);
        });

        #[cfg(not(feature = "csr"))]
        {
            let _ = (provider, email_value);
            busy.set(false);
        }
    };

    view! {
        <div class="centered-card">
            <div class="centered-card__body">
                <div class="centered-card__heading">
                    <h1 class="centered-card__title">"Welcome Back"</h1>
                    <p class="centered-card__lead">"Sign in to continue your journey"</p>
                </div>
                <form class="login-form" on:submit=on_submit>
                    <label for="email" class="login-form__label">
                        "Email address"
                    </label>
                    <input
                        id="email"
                        class="login-form__input"
                        type="email"
                        required
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary btn--wide" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get())}
                    </button>
                    <Show when=move || !message.get().is_empty()>
                        <p class="login-form__message">{move || message.get()}</p>
                    </Show>
                </form>
            </div>
        </div>
    }
}
