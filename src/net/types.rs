//! Wire shapes exchanged with the external auth provider.
//!
//! Event kinds arrive as upper-snake strings (`SIGNED_IN`, `SIGNED_OUT`, ...).
//! Unknown kinds are preserved as [`AuthEventKind::Other`] so callers can
//! ignore them without failing deserialization.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Kind of an auth state change notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthEventKind {
    SignedIn,
    TokenRefreshed,
    SignedOut,
    Other(String),
}

impl AuthEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SignedIn => "SIGNED_IN",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::SignedOut => "SIGNED_OUT",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for AuthEventKind {
    fn from(raw: &str) -> Self {
        match raw {
            "SIGNED_IN" => Self::SignedIn,
            "TOKEN_REFRESHED" => Self::TokenRefreshed,
            "SIGNED_OUT" => Self::SignedOut,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for AuthEventKind {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<AuthEventKind> for String {
    fn from(kind: AuthEventKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// Identity attached to a provider session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
}

/// Session payload carried by sign-in and refresh events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// A single auth state change notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    #[serde(default)]
    pub session: Option<AuthSession>,
}

impl AuthEvent {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self::with_user(AuthEventKind::SignedIn, user_id)
    }

    pub fn token_refreshed(user_id: impl Into<String>) -> Self {
        Self::with_user(AuthEventKind::TokenRefreshed, user_id)
    }

    pub fn signed_out() -> Self {
        Self { kind: AuthEventKind::SignedOut, session: None }
    }

    fn with_user(kind: AuthEventKind, user_id: impl Into<String>) -> Self {
        Self {
            kind,
            session: Some(AuthSession { user: Some(AuthUser { id: user_id.into() }) }),
        }
    }

    /// User identifier carried by the session payload, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .map(|u| u.id.as_str())
    }
}
