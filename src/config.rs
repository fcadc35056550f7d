//! Client configuration baked in at build time.
//!
//! The WASM bundle has no process environment at runtime, so values are read
//! with `option_env!` when the crate is compiled. Parsing goes through a
//! lookup closure so the same rules are testable natively.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;

pub const SUPABASE_URL_VAR: &str = "NAFAS_SUPABASE_URL";
pub const SUPABASE_ANON_KEY_VAR: &str = "NAFAS_SUPABASE_ANON_KEY";
pub const SIGN_IN_COMPLETES_ONBOARDING_VAR: &str = "NAFAS_SIGN_IN_COMPLETES_ONBOARDING";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid URL in {var}: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("invalid boolean in {var}: {value}")]
    InvalidBool { var: &'static str, value: String },
}

/// Connection settings for the hosted auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Project base URL without a trailing slash.
    pub supabase_url: String,
    pub anon_key: String,
}

impl AuthConfig {
    /// Build from a key lookup.
    ///
    /// Required:
    /// - `NAFAS_SUPABASE_URL`: absolute `http`/`https` URL
    /// - `NAFAS_SUPABASE_ANON_KEY`: public anon key sent as `apikey`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = required(&lookup, SUPABASE_URL_VAR)?;
        let anon_key = required(&lookup, SUPABASE_ANON_KEY_VAR)?;
        let supabase_url = parse_base_url(&raw_url)?;
        Ok(Self { supabase_url, anon_key })
    }

    /// Build from values captured at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(build_env)
    }

    /// Endpoint under `/auth/v1`.
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.supabase_url, path.trim_start_matches('/'))
    }
}

/// Product policy knobs for the session gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    /// Treat any successful external sign-in as completed onboarding.
    pub sign_in_completes_onboarding: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self { sign_in_completes_onboarding: true }
    }
}

impl GatePolicy {
    /// Optional:
    /// - `NAFAS_SIGN_IN_COMPLETES_ONBOARDING`: `true` (default) or `false`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sign_in_completes_onboarding = match lookup(SIGN_IN_COMPLETES_ONBOARDING_VAR) {
            None => true,
            Some(raw) => parse_bool(SIGN_IN_COMPLETES_ONBOARDING_VAR, &raw)?,
        };
        Ok(Self { sign_in_completes_onboarding })
    }

    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(build_env)
    }
}

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        SUPABASE_URL_VAR => option_env!("NAFAS_SUPABASE_URL"),
        SUPABASE_ANON_KEY_VAR => option_env!("NAFAS_SUPABASE_ANON_KEY"),
        SIGN_IN_COMPLETES_ONBOARDING_VAR => option_env!("NAFAS_SIGN_IN_COMPLETES_ONBOARDING"),
        _ => None,
    };
    value.map(str::to_owned)
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl { var: SUPABASE_URL_VAR, reason: e.to_string() })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            var: SUPABASE_URL_VAR,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url.as_str().trim_end_matches('/').to_owned())
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value: raw.to_owned() }),
    }
}
