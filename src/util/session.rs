//! Context accessors for the session gate and auth provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides both values once; pages and components pull them from
//! context instead of receiving callbacks through props.

use leptos::prelude::*;

use crate::net::supabase::SupabaseAuth;
use crate::state::gate::SessionGate;

pub fn use_session() -> RwSignal<SessionGate> {
    expect_context::<RwSignal<SessionGate>>()
}

/// `None` when no provider is configured for this build.
pub fn use_auth_provider() -> Option<SupabaseAuth> {
    use_context::<Option<SupabaseAuth>>().flatten()
}

/// Log out locally, then sign out at the provider in the background.
pub fn logout(gate: RwSignal<SessionGate>, provider: Option<SupabaseAuth>) {
    gate.update(SessionGate::logout);
    let Some(provider) = provider else {
        return;
    };
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        provider.sign_out().await;
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = provider;
    }
}
