//! Session state machine for login and onboarding gating.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and pages read two facts from this state: whether the visitor
//! is logged in and whether onboarding is complete. Both are unknown until
//! persisted flags are read once at startup.
//!
//! DESIGN
//! ======
//! [`transition`] is pure: it maps a state and an operation to the next state
//! plus the storage writes that must be committed before the new state is
//! published. [`super::gate::SessionGate`] performs the writes.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::config::GatePolicy;
use crate::net::types::{AuthEvent, AuthEventKind};

pub const ONBOARDED_KEY: &str = "nafas_onboarded";
pub const LOGGED_IN_KEY: &str = "nafas_logged_in";
pub const USER_ID_KEY: &str = "nafas_user_id";

const TRUE: &str = "true";

/// Persisted flag coercion: only the exact string `"true"` counts.
pub fn flag_from_stored(raw: Option<&str>) -> bool {
    raw == Some(TRUE)
}

/// Where the visitor stands with respect to login and onboarding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Persisted flags have not been read yet.
    #[default]
    Unresolved,
    LoggedOutOnboarded,
    LoggedOutNotOnboarded,
    LoggedIn { onboarded: bool },
}

impl SessionState {
    pub fn from_flags(onboarded: bool, logged_in: bool) -> Self {
        match (logged_in, onboarded) {
            (true, onboarded) => Self::LoggedIn { onboarded },
            (false, true) => Self::LoggedOutOnboarded,
            (false, false) => Self::LoggedOutNotOnboarded,
        }
    }

    pub fn is_resolved(self) -> bool {
        self != Self::Unresolved
    }

    /// `None` while unresolved.
    pub fn is_logged_in(self) -> Option<bool> {
        match self {
            Self::Unresolved => None,
            Self::LoggedIn { .. } => Some(true),
            Self::LoggedOutOnboarded | Self::LoggedOutNotOnboarded => Some(false),
        }
    }

    /// `None` while unresolved.
    pub fn is_onboarded(self) -> Option<bool> {
        match self {
            Self::Unresolved => None,
            Self::LoggedIn { onboarded } => Some(onboarded),
            Self::LoggedOutOnboarded => Some(true),
            Self::LoggedOutNotOnboarded => Some(false),
        }
    }
}

/// Inputs that can move the session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOp {
    /// Initial read of persisted flags.
    Resolve { onboarded: bool, logged_in: bool },
    Login,
    Logout,
    CompleteOnboarding,
    External(AuthEvent),
}

/// A single mutation of the durable store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreWrite {
    Set { key: &'static str, value: String },
    Remove { key: &'static str },
}

impl StoreWrite {
    fn flag(key: &'static str) -> Self {
        Self::Set { key, value: TRUE.to_owned() }
    }
}

/// Outcome of applying one [`SessionOp`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: SessionState,
    pub writes: Vec<StoreWrite>,
}

impl Transition {
    fn unchanged(state: SessionState) -> Self {
        Self { next: state, writes: Vec::new() }
    }
}

/// Compute the next state and the writes that commit it.
///
/// Mutating operations on an `Unresolved` state treat onboarding as not yet
/// complete; the gate resolves from storage before applying them.
pub fn transition(state: SessionState, op: &SessionOp, policy: GatePolicy) -> Transition {
    let onboarded = state.is_onboarded().unwrap_or(false);
    match op {
        SessionOp::Resolve { onboarded, logged_in } => {
            if state.is_resolved() {
                Transition::unchanged(state)
            } else {
                Transition::unchanged(SessionState::from_flags(*onboarded, *logged_in))
            }
        }
        SessionOp::Login => Transition {
            next: SessionState::LoggedIn { onboarded },
            writes: vec![StoreWrite::flag(LOGGED_IN_KEY)],
        },
        SessionOp::Logout => Transition {
            next: SessionState::from_flags(onboarded, false),
            writes: vec![StoreWrite::Remove { key: LOGGED_IN_KEY }],
        },
        SessionOp::CompleteOnboarding => Transition {
            next: SessionState::LoggedIn { onboarded: true },
            writes: vec![StoreWrite::flag(ONBOARDED_KEY), StoreWrite::flag(LOGGED_IN_KEY)],
        },
        SessionOp::External(event) => external_transition(state, onboarded, event, policy),
    }
}

fn external_transition(state: SessionState, onboarded: bool, event: &AuthEvent, policy: GatePolicy) -> Transition {
    match event.kind {
        AuthEventKind::SignedIn | AuthEventKind::TokenRefreshed => {
            let mut writes = vec![StoreWrite::flag(LOGGED_IN_KEY)];
            if let Some(user_id) = event.user_id() {
                writes.push(StoreWrite::Set { key: USER_ID_KEY, value: user_id.to_owned() });
            }
            let mut next_onboarded = onboarded;
            if !onboarded && policy.sign_in_completes_onboarding {
                writes.push(StoreWrite::flag(ONBOARDED_KEY));
                next_onboarded = true;
            }
            Transition { next: SessionState::LoggedIn { onboarded: next_onboarded }, writes }
        }
        AuthEventKind::SignedOut => Transition {
            next: SessionState::from_flags(onboarded, false),
            writes: vec![StoreWrite::Remove { key: LOGGED_IN_KEY }],
        },
        AuthEventKind::Other(_) => Transition::unchanged(state),
    }
}
