use super::*;
use std::sync::{Arc, Mutex};

use futures::executor::block_on;

use crate::config::GatePolicy;
use crate::state::gate::SessionGate;
use crate::state::session::SessionState;
use crate::util::storage::MemoryStore;

/// Provider double that records requests and answers with a canned result.
struct FakeProvider {
    events: AuthEventBus,
    answer: Result<(), SignInError>,
    requests: Mutex<Vec<(String, String)>>,
}

impl FakeProvider {
    fn answering(answer: Result<(), SignInError>) -> Self {
        Self { events: AuthEventBus::new(), answer, requests: Mutex::new(Vec::new()) }
    }
}

impl AuthProvider for FakeProvider {
    fn events(&self) -> &AuthEventBus {
        &self.events
    }

    async fn request_otp(&self, email: &str, redirect_to: &str) -> Result<(), SignInError> {
        self.requests
            .lock()
            .unwrap()
            .push((email.to_owned(), redirect_to.to_owned()));
        self.answer.clone()
    }
}

// =============================================================
// Input validation
// =============================================================

#[test]
fn validate_email_input_trims() {
    assert_eq!(validate_email_input("  me@example.com "), Ok("me@example.com".to_owned()));
}

#[test]
fn validate_email_input_rejects_blank() {
    assert_eq!(validate_email_input("   "), Err(EMAIL_REQUIRED_MESSAGE));
}

// =============================================================
// Error taxonomy
// =============================================================

#[test]
fn rejected_error_is_shown_verbatim() {
    let err = SignInError::Rejected("Email address \"x\" is invalid".to_owned());
    assert_eq!(err.user_message(), "Email address \"x\" is invalid");
    assert_eq!(err.to_string(), "Email address \"x\" is invalid");
}

#[test]
fn unexpected_error_is_generic() {
    let err = SignInError::Unexpected("NetworkError when attempting to fetch resource".to_owned());
    assert_eq!(err.user_message(), SIGN_IN_UNEXPECTED_MESSAGE);
    assert!(err.to_string().contains("NetworkError"));
}

// =============================================================
// request_sign_in
// =============================================================

#[test]
fn successful_request_reports_check_email() {
    let provider = FakeProvider::answering(Ok(()));
    let msg = block_on(request_sign_in(&provider, " me@example.com ", "https://nafas.app"));
    assert_eq!(msg, SIGN_IN_SENT_MESSAGE);
    assert_eq!(
        *provider.requests.lock().unwrap(),
        vec![("me@example.com".to_owned(), "https://nafas.app".to_owned())]
    );
}

#[test]
fn blank_email_never_reaches_provider() {
    let provider = FakeProvider::answering(Ok(()));
    let msg = block_on(request_sign_in(&provider, "  ", "https://nafas.app"));
    assert_eq!(msg, EMAIL_REQUIRED_MESSAGE);
    assert!(provider.requests.lock().unwrap().is_empty());
}

#[test]
fn rejected_email_shows_provider_message_and_leaves_flags_alone() {
    let store = Arc::new(MemoryStore::new());
    let mut gate = SessionGate::new(store.clone(), GatePolicy::default());
    gate.initialize();
    let provider = FakeProvider::answering(Err(SignInError::Rejected(
        "Unable to validate email address: invalid format".to_owned(),
    )));

    let msg = block_on(request_sign_in(&provider, "not-an-email", "https://nafas.app"));

    assert_eq!(msg, "Unable to validate email address: invalid format");
    assert_eq!(gate.state(), SessionState::LoggedOutNotOnboarded);
    assert!(store.is_empty());
}

#[test]
fn unexpected_failure_shows_generic_message() {
    let provider = FakeProvider::answering(Err(SignInError::Unexpected("timeout".to_owned())));
    let msg = block_on(request_sign_in(&provider, "me@example.com", "https://nafas.app"));
    assert_eq!(msg, SIGN_IN_UNEXPECTED_MESSAGE);
}

#[test]
fn events_drive_gate_through_subscription() {
    let store = Arc::new(MemoryStore::new());
    let gate = Arc::new(Mutex::new(SessionGate::new(store.clone(), GatePolicy::default())));
    gate.lock().unwrap().initialize();
    let provider = FakeProvider::answering(Ok(()));

    let target = Arc::clone(&gate);
    let sub = provider
        .events()
        .subscribe(move |event| target.lock().unwrap().handle_auth_event(event));
    provider.events().emit(&crate::net::types::AuthEvent::signed_in("u-5"));
    assert_eq!(gate.lock().unwrap().state(), SessionState::LoggedIn { onboarded: true });

    sub.unsubscribe();
    provider.events().emit(&crate::net::types::AuthEvent::signed_out());
    assert_eq!(gate.lock().unwrap().is_logged_in(), Some(true));
}
