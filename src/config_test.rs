use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key: &str| map.get(key).cloned()
}

// =============================================================
// AuthConfig
// =============================================================

#[test]
fn auth_config_reads_url_and_key() {
    let cfg = AuthConfig::from_lookup(lookup(&[
        (SUPABASE_URL_VAR, "https://abc.supabase.co"),
        (SUPABASE_ANON_KEY_VAR, "anon"),
    ]))
    .unwrap();
    assert_eq!(cfg.supabase_url, "https://abc.supabase.co");
    assert_eq!(cfg.anon_key, "anon");
}

#[test]
fn auth_config_strips_trailing_slash() {
    let cfg = AuthConfig::from_lookup(lookup(&[
        (SUPABASE_URL_VAR, "https://abc.supabase.co/"),
        (SUPABASE_ANON_KEY_VAR, "anon"),
    ]))
    .unwrap();
    assert_eq!(cfg.supabase_url, "https://abc.supabase.co");
    assert_eq!(cfg.auth_endpoint("otp"), "https://abc.supabase.co/auth/v1/otp");
    assert_eq!(cfg.auth_endpoint("/user"), "https://abc.supabase.co/auth/v1/user");
}

#[test]
fn auth_config_missing_url() {
    let err = AuthConfig::from_lookup(lookup(&[(SUPABASE_ANON_KEY_VAR, "anon")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing(SUPABASE_URL_VAR));
}

#[test]
fn auth_config_blank_key_counts_as_missing() {
    let err = AuthConfig::from_lookup(lookup(&[
        (SUPABASE_URL_VAR, "https://abc.supabase.co"),
        (SUPABASE_ANON_KEY_VAR, "   "),
    ]))
    .unwrap_err();
    assert_eq!(err, ConfigError::Missing(SUPABASE_ANON_KEY_VAR));
}

#[test]
fn auth_config_rejects_relative_url() {
    let err = AuthConfig::from_lookup(lookup(&[
        (SUPABASE_URL_VAR, "abc.supabase.co"),
        (SUPABASE_ANON_KEY_VAR, "anon"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { var: SUPABASE_URL_VAR, .. }));
}

#[test]
fn auth_config_rejects_non_http_scheme() {
    let err = AuthConfig::from_lookup(lookup(&[
        (SUPABASE_URL_VAR, "ftp://abc.supabase.co"),
        (SUPABASE_ANON_KEY_VAR, "anon"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("unsupported scheme 'ftp'"));
}

// =============================================================
// GatePolicy
// =============================================================

#[test]
fn gate_policy_defaults_to_sign_in_completing_onboarding() {
    assert!(GatePolicy::default().sign_in_completes_onboarding);
    assert_eq!(GatePolicy::from_lookup(lookup(&[])).unwrap(), GatePolicy::default());
}

#[test]
fn gate_policy_can_be_disabled() {
    let policy = GatePolicy::from_lookup(lookup(&[(SIGN_IN_COMPLETES_ONBOARDING_VAR, "false")])).unwrap();
    assert!(!policy.sign_in_completes_onboarding);
}

#[test]
fn gate_policy_accepts_mixed_case() {
    let policy = GatePolicy::from_lookup(lookup(&[(SIGN_IN_COMPLETES_ONBOARDING_VAR, " TRUE ")])).unwrap();
    assert!(policy.sign_in_completes_onboarding);
}

#[test]
fn gate_policy_rejects_garbage() {
    let err = GatePolicy::from_lookup(lookup(&[(SIGN_IN_COMPLETES_ONBOARDING_VAR, "maybe")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidBool { var: SIGN_IN_COMPLETES_ONBOARDING_VAR, value: "maybe".to_owned() }
    );
}
