//! Session gate owned by the root component.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` wraps a [`SessionGate`] in an `RwSignal` and provides it as context.
//! Pages call `login`/`logout`/`complete_onboarding`; the auth provider
//! subscription forwards events to [`SessionGate::handle_auth_event`].
//!
//! Every mutation commits its storage writes before the in-memory state
//! changes, so readers never observe state that is not yet persisted.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::config::GatePolicy;
use crate::net::types::AuthEvent;
use crate::util::storage::SharedStore;

use super::session::{
    LOGGED_IN_KEY, ONBOARDED_KEY, SessionOp, SessionState, StoreWrite, flag_from_stored, transition,
};

pub struct SessionGate {
    state: SessionState,
    store: SharedStore,
    policy: GatePolicy,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("state", &self.state)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SessionGate {
    /// Create an unresolved gate over `store`.
    pub fn new(store: SharedStore, policy: GatePolicy) -> Self {
        Self { state: SessionState::Unresolved, store, policy }
    }

    /// Read persisted flags and resolve the state. No-op once resolved.
    pub fn initialize(&mut self) {
        let onboarded = flag_from_stored(self.store.get(ONBOARDED_KEY).as_deref());
        let logged_in = flag_from_stored(self.store.get(LOGGED_IN_KEY).as_deref());
        self.apply(&SessionOp::Resolve { onboarded, logged_in });
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn policy(&self) -> GatePolicy {
        self.policy
    }

    pub fn is_logged_in(&self) -> Option<bool> {
        self.state.is_logged_in()
    }

    pub fn is_onboarded(&self) -> Option<bool> {
        self.state.is_onboarded()
    }

    pub fn login(&mut self) {
        self.apply(&SessionOp::Login);
    }

    pub fn logout(&mut self) {
        self.apply(&SessionOp::Logout);
    }

    pub fn complete_onboarding(&mut self) {
        self.apply(&SessionOp::CompleteOnboarding);
    }

    pub fn handle_auth_event(&mut self, event: &AuthEvent) {
        self.apply(&SessionOp::External(event.clone()));
    }

    fn apply(&mut self, op: &SessionOp) {
        if !matches!(op, SessionOp::Resolve { .. }) && !self.state.is_resolved() {
            self.initialize();
        }
        let t = transition(self.state, op, self.policy);
        for write in &t.writes {
            match write {
                StoreWrite::Set { key, value } => self.store.set(key, value),
                StoreWrite::Remove { key } => self.store.remove(key),
            }
        }
        if t.next != self.state {
            log::debug!("session {:?} -> {:?}", self.state, t.next);
        }
        self.state = t.next;
    }
}
