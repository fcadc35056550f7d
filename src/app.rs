//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Outlet, ParentRoute, Redirect, Route, Router, Routes},
    hooks::use_location,
};

use crate::components::{bottom_nav::BottomNav, navigation::Navigation};
use crate::config::{AuthConfig, GatePolicy};
use crate::net::auth::AuthProvider;
use crate::net::supabase::SupabaseAuth;
use crate::pages::{
    community::CommunityPage, home::HomePage, landing::LandingPage, legal::LegalPage, login::LoginPage, me::MePage,
    onboarding::OnboardingPage, reflect::ReflectPage,
};
use crate::routes::{RouteDecision, resolve};
use crate::state::gate::SessionGate;
use crate::util::session::use_session;
use crate::util::storage::default_store;

/// Root application component.
///
/// Owns the session gate and the auth provider subscription. Nothing is
/// rendered until the gate has resolved persisted flags.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let policy = GatePolicy::from_build_env().unwrap_or_else(|e| {
        log::warn!("{e}; using default gate policy");
        GatePolicy::default()
    });
    let mut session = SessionGate::new(default_store(), policy);
    session.initialize();
    let gate = RwSignal::new(session);
    provide_context(gate);

    let provider = match AuthConfig::from_build_env() {
        Ok(config) => Some(SupabaseAuth::new(config)),
        Err(e) => {
            log::warn!("auth provider disabled: {e}");
            None
        }
    };
    if let Some(provider) = &provider {
        let subscription = provider
            .events()
            .subscribe(move |event| gate.update(|g| g.handle_auth_event(event)));
        on_cleanup(move || subscription.unsubscribe());
        provider.detect_session_in_url();
    }
    provide_context(provider);

    let resolved = move || gate.with(|g| g.state().is_resolved());

    view! {
        <Title formatter=|text: String| if text.is_empty() { "Nafas".to_owned() } else { format!("{text} · Nafas") }/>

        <Router>
            <Show when=resolved>
                <div class="app">
                    <Routes fallback=|| view! { <UnknownRoute/> }>
                        <Route path=StaticSegment("") view=LandingPage/>
                        <Route path=StaticSegment("legal") view=LegalPage/>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("onboarding") view=OnboardingPage/>
                        <ParentRoute path=StaticSegment("") view=ProtectedShell>
                            <Route path=StaticSegment("home") view=HomePage/>
                            <Route path=StaticSegment("reflect") view=ReflectPage/>
                            <Route path=StaticSegment("community") view=CommunityPage/>
                            <Route path=StaticSegment("me") view=MePage/>
                        </ParentRoute>
                    </Routes>
                </div>
            </Show>
        </Router>
    }
}

/// Navigation chrome around the protected pages, or a redirect to login.
#[component]
fn ProtectedShell() -> impl IntoView {
    let gate = use_session();
    let pathname = use_location().pathname;

    // Only flips when access flips, so tab changes do not rebuild the chrome.
    let redirect = Memo::new(move |_| match resolve(gate.with(SessionGate::state), &pathname.get()) {
        RouteDecision::Redirect(path) => Some(path),
        RouteDecision::Render(_) | RouteDecision::Blank => None,
    });

    move || match redirect.get() {
        Some(path) => view! { <Redirect path=path/> }.into_any(),
        None => view! {
            <Navigation/>
            <main class="app__main">
                <Outlet/>
            </main>
            <div class="app__bottom-nav">
                <BottomNav/>
            </div>
        }
        .into_any(),
    }
}

/// Paths outside the route table go to login or home.
#[component]
fn UnknownRoute() -> impl IntoView {
    let gate = use_session();
    let pathname = use_location().pathname;

    move || match resolve(gate.with(SessionGate::state), &pathname.get()) {
        RouteDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        RouteDecision::Render(_) | RouteDecision::Blank => ().into_any(),
    }
}
