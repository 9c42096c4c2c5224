//! Identity-provider boundary: the trait the controller drives and the error
//! type providers report through.
//!
//! ERROR HANDLING
//! ==============
//! The controller surfaces `Display` output of a [`ProviderError`] verbatim as
//! the session's `last_error` and makes no distinction between variants; the
//! split exists so provider implementations can map transport faults and
//! provider rejections separately.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use async_trait::async_trait;

use crate::principal::Principal;

/// Failure reported by an identity provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider refused the request (invalid credentials, duplicate
    /// email, disabled account). The message is the provider's own text.
    #[error("{0}")]
    Rejected(String),
    /// The provider could not be reached or answered unintelligibly.
    #[error("provider unreachable: {0}")]
    Unreachable(String),
}

/// External identity provider: credential verification, registration,
/// anonymous sessions, session termination, and a locally cached principal.
///
/// All methods are driven by [`crate::SessionController`]; implementations
/// must be safe to share across tasks.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// [`ProviderError::Rejected`] for refused credentials,
    /// [`ProviderError::Unreachable`] for transport failures.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, ProviderError>;

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// [`ProviderError::Rejected`] when the provider refuses the
    /// registration, [`ProviderError::Unreachable`] for transport failures.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal, ProviderError>;

    /// Create an ephemeral guest session without credentials.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`IdentityProvider::sign_in`].
    async fn sign_in_anonymously(&self) -> Result<Principal, ProviderError>;

    /// Terminate the provider-side session, if any.
    ///
    /// The controller treats this as best-effort: local state is cleared
    /// before the call and errors are swallowed.
    ///
    /// # Errors
    ///
    /// Implementation-defined; callers other than the controller may care.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Read the provider's locally cached session, if one exists.
    ///
    /// Synchronous so the controller can seed its initial state at
    /// construction without a network round trip.
    fn cached_principal(&self) -> Option<Principal>;
}
