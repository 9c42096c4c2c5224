//! Session controller — single point of truth for "who is signed in".
//!
//! SYSTEM CONTEXT
//! ==============
//! UI screens invoke the four operations and subscribe to the published
//! [`Session`] snapshot; the identity provider sits behind the
//! [`IdentityProvider`] trait. Input validation (non-empty fields, email
//! shape) is the caller's job — the controller enforces none.
//!
//! CONCURRENCY
//! ===========
//! One logical session per controller. Operations are not serialized here:
//! invoking a second operation while one is loading is a caller error whose
//! completions race (last writer wins), but every mutation goes through the
//! watch sender so state never corrupts. Callers should disable triggering
//! controls while `is_loading` is true.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::principal::Principal;
use crate::provider::{IdentityProvider, ProviderError};
use crate::session::{Session, SessionPhase};

/// Bridges UI intents to an identity provider and publishes observable state.
///
/// Constructed once at application start with an injected provider;
/// construction synchronously reads the provider's cached principal so a
/// previously signed-in user starts in [`SessionPhase::SignedIn`].
pub struct SessionController {
    provider: Arc<dyn IdentityProvider>,
    state: watch::Sender<Session>,
}

impl SessionController {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let initial = Session {
            current_user: provider.cached_principal(),
            is_loading: false,
            last_error: None,
        };
        let (state, _initial_rx) = watch::channel(initial);
        Self { provider, state }
    }

    /// Subscribe to session changes. `borrow()` sees each mutation
    /// synchronously; `changed()` wakes reactive observers.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Current session snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<Principal> {
        self.state.borrow().current_user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    /// Authenticate with email and password. Returns true on success.
    pub async fn sign_in(&self, email: &str, password: &str) -> bool {
        self.run_operation("sign_in", self.provider.sign_in(email, password))
            .await
    }

    /// Register a new account and sign it in. Returns true on success.
    pub async fn sign_up(&self, email: &str, password: &str) -> bool {
        self.run_operation("sign_up", self.provider.sign_up(email, password))
            .await
    }

    /// Start an ephemeral guest session. Returns true on success.
    pub async fn sign_in_anonymously(&self) -> bool {
        self.run_operation("sign_in_anonymously", self.provider.sign_in_anonymously())
            .await
    }

    /// Clear the local session immediately and terminate the provider-side
    /// session on a detached task.
    ///
    /// Never fails: the user is signed out locally regardless of what the
    /// provider says, and provider errors are swallowed. Without an ambient
    /// tokio runtime the provider call is skipped entirely.
    pub fn sign_out(&self) {
        self.state.send_modify(|session| session.current_user = None);

        let provider = Arc::clone(&self.provider);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(error) = provider.sign_out().await {
                        tracing::debug!(%error, "provider sign-out failed; local session already cleared");
                    }
                });
            }
            Err(_) => {
                tracing::debug!("no async runtime; skipping provider sign-out");
            }
        }
    }

    /// Shared shape of the three authenticating operations: raise the loading
    /// flag, await the provider, then record the principal or the error.
    async fn run_operation<F>(&self, operation: &'static str, call: F) -> bool
    where
        F: Future<Output = Result<Principal, ProviderError>>,
    {
        // Drop guard, not branch logic: the flag must clear on every exit
        // path, including a panic inside the provider call.
        let _loading = LoadingGuard::begin(&self.state);

        match call.await {
            Ok(principal) => {
                tracing::debug!(operation, user_id = %principal.id, "authentication succeeded");
                self.state
                    .send_modify(|session| session.current_user = Some(principal));
                true
            }
            Err(error) => {
                tracing::warn!(operation, %error, "authentication failed");
                self.state
                    .send_modify(|session| session.last_error = Some(error.to_string()));
                false
            }
        }
    }
}

/// Raises `is_loading` on construction and lowers it on drop, so the flag
/// spans exactly one outstanding operation no matter how it ends.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<Session>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a watch::Sender<Session>) -> Self {
        state.send_modify(|session| session.is_loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|session| session.is_loading = false);
    }
}
