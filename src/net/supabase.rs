//! Supabase GoTrue client for magic-link sign-in.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, timers via
//! `gloo-timers`. Native builds: requests fail with
//! [`SignInError::Unexpected`] and URL detection is a no-op, so the parsing
//! and state handling stay testable without a browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! After the visitor follows the emailed link, GoTrue redirects back to the
//! app origin with the session in the URL fragment. [`SupabaseAuth::detect_session_in_url`]
//! picks it up, resolves the user id, and publishes `SIGNED_IN`. A timer then
//! refreshes the access token shortly before expiry and publishes
//! `TOKEN_REFRESHED`, or `SIGNED_OUT` if the provider rejects the refresh.
//! Tokens are held in memory only.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Deserialize;

use super::auth::{AuthProvider, SignInError};
use super::events::AuthEventBus;
use super::types::{AuthEvent, AuthUser};
use crate::config::AuthConfig;

/// Refresh this many seconds before the access token expires.
pub const REFRESH_MARGIN_SECS: u64 = 60;
/// Lower bound on any refresh or retry wait.
pub const MIN_REFRESH_DELAY_SECS: u64 = 5;
/// Wait before retrying a refresh that failed in transport.
pub const REFRESH_RETRY_SECS: u64 = 30;
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Session material parsed from the magic-link redirect fragment.
#[derive(Clone, PartialEq, Eq)]
pub struct FragmentSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

impl std::fmt::Debug for FragmentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentSession")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// What the provider put in the URL fragment after a redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectFragment {
    Session(FragmentSession),
    Error { code: Option<String>, description: String },
}

/// Parse `#access_token=...` or `#error=...` fragments. Anything else is `None`.
pub fn parse_redirect_fragment(fragment: &str) -> Option<RedirectFragment> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    if raw.is_empty() {
        return None;
    }

    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut error = None;
    let mut error_code = None;
    let mut error_description = None;
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "refresh_token" => refresh_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse::<u64>().ok(),
            "error" => error = Some(value.into_owned()),
            "error_code" => error_code = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }

    if error.is_some() || error_description.is_some() {
        let description = error_description
            .or_else(|| error.clone())
            .unwrap_or_default();
        return Some(RedirectFragment::Error { code: error_code.or(error), description });
    }

    match (access_token, refresh_token) {
        (Some(access_token), Some(refresh_token)) if !access_token.is_empty() => {
            Some(RedirectFragment::Session(FragmentSession {
                access_token,
                refresh_token,
                expires_in: expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
            }))
        }
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Human-readable message from a GoTrue error response.
pub fn provider_error_message(status: u16, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    [parsed.msg, parsed.message, parsed.error_description, parsed.error]
        .into_iter()
        .flatten()
        .map(|m| m.trim().to_owned())
        .find(|m| !m.is_empty())
        .unwrap_or_else(|| format!("sign-in request failed: {status}"))
}

/// Seconds to wait before refreshing a token that expires in `expires_in`.
pub fn refresh_delay_secs(expires_in: u64) -> u64 {
    expires_in
        .saturating_sub(REFRESH_MARGIN_SECS)
        .max(MIN_REFRESH_DELAY_SECS)
}

/// Successful `/token` response body.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    pub user: AuthUser,
}

fn default_expires_in() -> u64 {
    DEFAULT_EXPIRES_IN_SECS
}

#[derive(Clone)]
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
struct ProviderSession {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
}

impl From<FragmentSession> for ProviderSession {
    fn from(s: FragmentSession) -> Self {
        Self { access_token: s.access_token, refresh_token: s.refresh_token, expires_in: s.expires_in }
    }
}

impl From<&TokenResponse> for ProviderSession {
    fn from(t: &TokenResponse) -> Self {
        Self {
            access_token: t.access_token.clone(),
            refresh_token: t.refresh_token.clone(),
            expires_in: t.expires_in,
        }
    }
}

/// Magic-link auth against a Supabase project.
#[derive(Clone)]
pub struct SupabaseAuth {
    config: AuthConfig,
    events: AuthEventBus,
    session: Arc<Mutex<Option<ProviderSession>>>,
    generation: Arc<AtomicU64>,
}

impl std::fmt::Debug for SupabaseAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuth")
            .field("url", &self.config.supabase_url)
            .field("signed_in", &self.has_session())
            .finish_non_exhaustive()
    }
}

impl SupabaseAuth {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            events: AuthEventBus::new(),
            session: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn has_session(&self) -> bool {
        self.lock_session().is_some()
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<ProviderSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install a session and publish `SIGNED_IN` for `user_id`.
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    fn begin_session(&self, session: ProviderSession, user_id: String) {
        *self.lock_session() = Some(session);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("provider session started");
        self.events.emit(&AuthEvent::signed_in(user_id));
        self.schedule_refresh(generation);
    }

    /// Drop the session and publish `SIGNED_OUT`. Returns the dropped access token.
    fn end_session(&self) -> Option<String> {
        let previous = self.lock_session().take();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.events.emit(&AuthEvent::signed_out());
        previous.map(|s| s.access_token)
    }

    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Pick up a session delivered in the URL fragment, if any.
    pub fn detect_session_in_url(&self) {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let hash = window.location().hash().unwrap_or_default();
            let Some(fragment) = parse_redirect_fragment(&hash) else {
                return;
            };
            clear_url_fragment(&window);
            match fragment {
                RedirectFragment::Error { code, description } => {
                    log::warn!("magic link rejected ({}): {description}", code.unwrap_or_default());
                }
                RedirectFragment::Session(session) => {
                    let this = self.clone();
                    leptos::task::spawn_local(async move {
                        match this.fetch_user(&session.access_token).await {
                            Ok(user) => this.begin_session(session.into(), user.id),
                            Err(e) => log::warn!("could not resolve magic link user: {e}"),
                        }
                    });
                }
            }
        }
    }

    /// Sign out at the provider (best effort) and publish `SIGNED_OUT`.
    pub async fn sign_out(&self) {
        let token = self.end_session();
        #[cfg(feature = "csr")]
        {
            if let Some(token) = token {
                let resp = gloo_net::http::Request::post(&self.config.auth_endpoint("logout"))
                    .header("apikey", &self.config.anon_key)
                    .header("Authorization", &format!("Bearer {token}"))
                    .send()
                    .await;
                if let Err(e) = resp {
                    log::warn!("provider logout failed: {e}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    /// Resolve the user behind an access token via `GET /auth/v1/user`.
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    async fn fetch_user(&self, access_token: &str) -> Result<AuthUser, SignInError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(&self.config.auth_endpoint("user"))
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {access_token}"))
                .send()
                .await
                .map_err(|e| SignInError::Unexpected(e.to_string()))?;
            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(SignInError::Rejected(provider_error_message(resp.status(), &body)));
            }
            resp.json::<AuthUser>()
                .await
                .map_err(|e| SignInError::Unexpected(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = access_token;
            Err(unavailable())
        }
    }

    /// Exchange a refresh token via `POST /auth/v1/token?grant_type=refresh_token`.
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, SignInError> {
        #[cfg(feature = "csr")]
        {
            let payload = serde_json::json!({ "refresh_token": refresh_token });
            let resp = gloo_net::http::Request::post(&self.config.auth_endpoint("token"))
                .query([("grant_type", "refresh_token")])
                .header("apikey", &self.config.anon_key)
                .json(&payload)
                .map_err(|e| SignInError::Unexpected(e.to_string()))?
                .send()
                .await
                .map_err(|e| SignInError::Unexpected(e.to_string()))?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                let msg = provider_error_message(status, &body);
                return Err(if (400..500).contains(&status) {
                    SignInError::Rejected(msg)
                } else {
                    SignInError::Unexpected(msg)
                });
            }
            resp.json::<TokenResponse>()
                .await
                .map_err(|e| SignInError::Unexpected(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = refresh_token;
            Err(unavailable())
        }
    }

    /// Keep the session alive until it is replaced or ended.
    fn schedule_refresh(&self, generation: u64) {
        #[cfg(feature = "csr")]
        {
            let this = self.clone();
            leptos::task::spawn_local(async move {
                let mut delay = match this.lock_session().as_ref() {
                    Some(s) => refresh_delay_secs(s.expires_in),
                    None => return,
                };
                loop {
                    gloo_timers::future::sleep(std::time::Duration::from_secs(delay)).await;
                    if !this.is_current(generation) {
                        return;
                    }
                    let Some(refresh_token) = this.lock_session().as_ref().map(|s| s.refresh_token.clone()) else {
                        return;
                    };
                    match this.refresh(&refresh_token).await {
                        Ok(tokens) if this.is_current(generation) => {
                            delay = refresh_delay_secs(tokens.expires_in);
                            *this.lock_session() = Some(ProviderSession::from(&tokens));
                            this.events.emit(&AuthEvent::token_refreshed(tokens.user.id));
                        }
                        Ok(_) => return,
                        Err(SignInError::Rejected(msg)) => {
                            log::warn!("token refresh rejected: {msg}");
                            if this.is_current(generation) {
                                this.end_session();
                            }
                            return;
                        }
                        Err(e) => {
                            log::warn!("token refresh failed, retrying: {e}");
                            delay = REFRESH_RETRY_SECS.max(MIN_REFRESH_DELAY_SECS);
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = generation;
        }
    }
}

impl AuthProvider for SupabaseAuth {
    fn events(&self) -> &AuthEventBus {
        &self.events
    }

    /// `POST /auth/v1/otp?redirect_to=...` with `{ email, create_user: true }`.
    async fn request_otp(&self, email: &str, redirect_to: &str) -> Result<(), SignInError> {
        #[cfg(feature = "csr")]
        {
            let payload = serde_json::json!({ "email": email, "create_user": true });
            let resp = gloo_net::http::Request::post(&self.config.auth_endpoint("otp"))
                .query([("redirect_to", redirect_to)])
                .header("apikey", &self.config.anon_key)
                .json(&payload)
                .map_err(|e| SignInError::Unexpected(e.to_string()))?
                .send()
                .await
                .map_err(|e| SignInError::Unexpected(e.to_string()))?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(SignInError::Rejected(provider_error_message(status, &body)));
            }
            log::info!("magic link requested");
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, redirect_to);
            Err(unavailable())
        }
    }
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> SignInError {
    SignInError::Unexpected("not available outside the browser".to_owned())
}

/// Remove the token fragment from the address bar without a navigation.
#[cfg(feature = "csr")]
fn clear_url_fragment(window: &web_sys::Window) {
    let location = window.location();
    let path = location.pathname().unwrap_or_else(|_| "/".to_owned());
    let search = location.search().unwrap_or_default();
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&format!("{path}{search}")));
    }
}
