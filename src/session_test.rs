use super::*;

fn principal(id: &str) -> Principal {
    Principal { id: id.to_owned(), display_name: None, email: None }
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn default_session_has_no_user() {
    let session = Session::default();
    assert!(session.current_user.is_none());
}

#[test]
fn default_session_not_loading_no_error() {
    let session = Session::default();
    assert!(!session.is_loading);
    assert!(session.last_error.is_none());
}

#[test]
fn default_session_phase_signed_out() {
    assert_eq!(Session::default().phase(), SessionPhase::SignedOut);
}

// =============================================================================
// Phase derivation
// =============================================================================

#[test]
fn phase_signed_in_with_user() {
    let session = Session { current_user: Some(principal("u-1")), ..Session::default() };
    assert_eq!(session.phase(), SessionPhase::SignedIn);
}

#[test]
fn phase_authenticating_while_loading() {
    let session = Session { is_loading: true, ..Session::default() };
    assert_eq!(session.phase(), SessionPhase::Authenticating);
}

#[test]
fn phase_loading_takes_precedence_over_user() {
    let session = Session {
        current_user: Some(principal("u-1")),
        is_loading: true,
        ..Session::default()
    };
    assert_eq!(session.phase(), SessionPhase::Authenticating);
}

#[test]
fn phase_signed_out_with_error_only() {
    let session = Session { last_error: Some("invalid credentials".to_owned()), ..Session::default() };
    assert_eq!(session.phase(), SessionPhase::SignedOut);
}
