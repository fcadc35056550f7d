//! Auth provider seam used by the login page and root component.
//!
//! ERROR HANDLING
//! ==============
//! A sign-in request either succeeds, is rejected by the provider (message
//! shown verbatim), or fails unexpectedly (generic message). Nothing is
//! retried and no session flag is touched by the request itself.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::events::AuthEventBus;

pub const SIGN_IN_SENT_MESSAGE: &str = "Check your email for the login link.";
pub const SIGN_IN_UNEXPECTED_MESSAGE: &str = "An error occurred. Please try again.";
pub const EMAIL_REQUIRED_MESSAGE: &str = "Enter your email address.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    /// Provider answered and refused the request.
    #[error("{0}")]
    Rejected(String),
    /// Transport failure, unreadable response, or missing browser APIs.
    #[error("sign-in request failed: {0}")]
    Unexpected(String),
}

impl SignInError {
    /// Text shown to the visitor.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(msg) => msg.clone(),
            Self::Unexpected(_) => SIGN_IN_UNEXPECTED_MESSAGE.to_owned(),
        }
    }
}

/// External identity service.
pub trait AuthProvider {
    /// Event source for sign-in, refresh, and sign-out notifications.
    fn events(&self) -> &AuthEventBus;

    /// Ask the provider to email a one-time sign-in link.
    ///
    /// # Errors
    ///
    /// [`SignInError::Rejected`] when the provider refuses the address,
    /// [`SignInError::Unexpected`] for anything else.
    fn request_otp(&self, email: &str, redirect_to: &str) -> impl Future<Output = Result<(), SignInError>>;
}

/// Trim the email field; empty input never reaches the provider.
///
/// # Errors
///
/// Returns the message to display when the field is blank.
pub fn validate_email_input(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EMAIL_REQUIRED_MESSAGE);
    }
    Ok(trimmed.to_owned())
}

/// Request a magic link and return the message the login page should show.
pub async fn request_sign_in<P: AuthProvider>(provider: &P, email: &str, redirect_to: &str) -> String {
    let email = match validate_email_input(email) {
        Ok(email) => email,
        Err(msg) => return msg.to_owned(),
    };
    match provider.request_otp(&email, redirect_to).await {
        Ok(()) => SIGN_IN_SENT_MESSAGE.to_owned(),
        Err(e) => {
            log::warn!("magic link request failed: {e}");
            e.user_message()
        }
    }
}
