use super::*;

const ALL_RESOLVED: [SessionState; 4] = [
    SessionState::LoggedOutOnboarded,
    SessionState::LoggedOutNotOnboarded,
    SessionState::LoggedIn { onboarded: true },
    SessionState::LoggedIn { onboarded: false },
];

fn policy() -> GatePolicy {
    GatePolicy::default()
}

fn set(key: &'static str, value: &str) -> StoreWrite {
    StoreWrite::Set { key, value: value.to_owned() }
}

// =============================================================
// Flag coercion and accessors
// =============================================================

#[test]
fn flag_from_stored_requires_exact_true() {
    assert!(flag_from_stored(Some("true")));
    assert!(!flag_from_stored(Some("TRUE")));
    assert!(!flag_from_stored(Some("1")));
    assert!(!flag_from_stored(Some("")));
    assert!(!flag_from_stored(None));
}

#[test]
fn unresolved_exposes_unknown_flags() {
    let state = SessionState::default();
    assert_eq!(state, SessionState::Unresolved);
    assert!(!state.is_resolved());
    assert_eq!(state.is_logged_in(), None);
    assert_eq!(state.is_onboarded(), None);
}

#[test]
fn from_flags_covers_all_combinations() {
    assert_eq!(SessionState::from_flags(false, false), SessionState::LoggedOutNotOnboarded);
    assert_eq!(SessionState::from_flags(true, false), SessionState::LoggedOutOnboarded);
    assert_eq!(SessionState::from_flags(false, true), SessionState::LoggedIn { onboarded: false });
    assert_eq!(SessionState::from_flags(true, true), SessionState::LoggedIn { onboarded: true });
}

#[test]
fn from_flags_round_trips_through_accessors() {
    for onboarded in [false, true] {
        for logged_in in [false, true] {
            let state = SessionState::from_flags(onboarded, logged_in);
            assert_eq!(state.is_onboarded(), Some(onboarded));
            assert_eq!(state.is_logged_in(), Some(logged_in));
        }
    }
}

// =============================================================
// Resolve
// =============================================================

#[test]
fn resolve_from_unresolved_uses_flags() {
    let t = transition(
        SessionState::Unresolved,
        &SessionOp::Resolve { onboarded: true, logged_in: false },
        policy(),
    );
    assert_eq!(t.next, SessionState::LoggedOutOnboarded);
    assert!(t.writes.is_empty());
}

#[test]
fn resolve_is_ignored_once_resolved() {
    for state in ALL_RESOLVED {
        let t = transition(state, &SessionOp::Resolve { onboarded: false, logged_in: false }, policy());
        assert_eq!(t.next, state);
        assert!(t.writes.is_empty());
    }
}

// =============================================================
// Manual operations
// =============================================================

#[test]
fn login_keeps_onboarding_and_persists_flag() {
    for state in ALL_RESOLVED {
        let t = transition(state, &SessionOp::Login, policy());
        assert_eq!(t.next.is_logged_in(), Some(true));
        assert_eq!(t.next.is_onboarded(), state.is_onboarded());
        assert_eq!(t.writes, vec![set(LOGGED_IN_KEY, "true")]);
    }
}

#[test]
fn login_is_idempotent() {
    let once = transition(SessionState::LoggedOutNotOnboarded, &SessionOp::Login, policy());
    let twice = transition(once.next, &SessionOp::Login, policy());
    assert_eq!(once.next, twice.next);
}

#[test]
fn logout_clears_login_and_keeps_onboarding() {
    for state in ALL_RESOLVED {
        let t = transition(state, &SessionOp::Logout, policy());
        assert_eq!(t.next.is_logged_in(), Some(false));
        assert_eq!(t.next.is_onboarded(), state.is_onboarded());
        assert_eq!(t.writes, vec![StoreWrite::Remove { key: LOGGED_IN_KEY }]);
    }
}

#[test]
fn complete_onboarding_always_logs_in() {
    for state in ALL_RESOLVED.into_iter().chain([SessionState::Unresolved]) {
        let t = transition(state, &SessionOp::CompleteOnboarding, policy());
        assert_eq!(t.next, SessionState::LoggedIn { onboarded: true });
        assert_eq!(t.writes, vec![set(ONBOARDED_KEY, "true"), set(LOGGED_IN_KEY, "true")]);
    }
}

#[test]
fn login_from_unresolved_assumes_not_onboarded() {
    let t = transition(SessionState::Unresolved, &SessionOp::Login, policy());
    assert_eq!(t.next, SessionState::LoggedIn { onboarded: false });
}

// =============================================================
// External events
// =============================================================

#[test]
fn signed_in_marks_onboarded_and_persists_user() {
    let t = transition(
        SessionState::LoggedOutNotOnboarded,
        &SessionOp::External(AuthEvent::signed_in("u-1")),
        policy(),
    );
    assert_eq!(t.next, SessionState::LoggedIn { onboarded: true });
    assert_eq!(
        t.writes,
        vec![set(LOGGED_IN_KEY, "true"), set(USER_ID_KEY, "u-1"), set(ONBOARDED_KEY, "true")]
    );
}

#[test]
fn signed_in_skips_onboarding_write_when_already_onboarded() {
    let t = transition(
        SessionState::LoggedOutOnboarded,
        &SessionOp::External(AuthEvent::signed_in("u-1")),
        policy(),
    );
    assert_eq!(t.next, SessionState::LoggedIn { onboarded: true });
    assert_eq!(t.writes, vec![set(LOGGED_IN_KEY, "true"), set(USER_ID_KEY, "u-1")]);
}

#[test]
fn signed_in_respects_disabled_onboarding_policy() {
    let policy = GatePolicy { sign_in_completes_onboarding: false };
    let t = transition(
        SessionState::LoggedOutNotOnboarded,
        &SessionOp::External(AuthEvent::signed_in("u-1")),
        policy,
    );
    assert_eq!(t.next, SessionState::LoggedIn { onboarded: false });
    assert!(!t.writes.contains(&set(ONBOARDED_KEY, "true")));
}

#[test]
fn token_refreshed_behaves_like_signed_in() {
    let refreshed = transition(
        SessionState::LoggedOutNotOnboarded,
        &SessionOp::External(AuthEvent::token_refreshed("u-2")),
        policy(),
    );
    let signed_in = transition(
        SessionState::LoggedOutNotOnboarded,
        &SessionOp::External(AuthEvent::signed_in("u-2")),
        policy(),
    );
    assert_eq!(refreshed, signed_in);
}

#[test]
fn signed_in_without_user_skips_user_id() {
    let event = AuthEvent { kind: AuthEventKind::SignedIn, session: None };
    let t = transition(SessionState::LoggedOutOnboarded, &SessionOp::External(event), policy());
    assert_eq!(t.writes, vec![set(LOGGED_IN_KEY, "true")]);
}

#[test]
fn signed_out_overrides_manual_login() {
    let logged_in = transition(SessionState::LoggedOutOnboarded, &SessionOp::Login, policy()).next;
    let t = transition(logged_in, &SessionOp::External(AuthEvent::signed_out()), policy());
    assert_eq!(t.next, SessionState::LoggedOutOnboarded);
    assert_eq!(t.writes, vec![StoreWrite::Remove { key: LOGGED_IN_KEY }]);
}

#[test]
fn unknown_event_kinds_are_ignored() {
    let event = AuthEvent { kind: AuthEventKind::Other("USER_UPDATED".to_owned()), session: None };
    for state in ALL_RESOLVED.into_iter().chain([SessionState::Unresolved]) {
        let t = transition(state, &SessionOp::External(event.clone()), policy());
        assert_eq!(t.next, state);
        assert!(t.writes.is_empty());
    }
}
