use super::*;

// =============================================================================
// ProviderError display — surfaced verbatim as the session's last_error, so
// the rendered text is part of the contract.
// =============================================================================

#[test]
fn rejected_displays_message_verbatim() {
    let error = ProviderError::Rejected("invalid credentials".to_owned());
    assert_eq!(error.to_string(), "invalid credentials");
}

#[test]
fn rejected_preserves_provider_casing() {
    let error = ProviderError::Rejected("EMAIL_NOT_FOUND".to_owned());
    assert_eq!(error.to_string(), "EMAIL_NOT_FOUND");
}

#[test]
fn unreachable_display_names_transport() {
    let error = ProviderError::Unreachable("connection refused".to_owned());
    let msg = error.to_string();
    assert!(msg.contains("provider unreachable"));
    assert!(msg.contains("connection refused"));
}
