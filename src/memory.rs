//! In-process identity provider for development and tests.
//!
//! Keeps an account table and the cached principal behind a mutex; no IO.
//! Rejection messages are fixed strings so UI and tests can rely on them.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::principal::Principal;
use crate::provider::{IdentityProvider, ProviderError};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const EMAIL_IN_USE: &str = "email already in use";

#[derive(Clone)]
struct Account {
    password: String,
    principal: Principal,
}

#[derive(Default)]
struct MemoryState {
    /// Accounts keyed by normalized email.
    accounts: HashMap<String, Account>,
    /// The provider's locally cached session, mirroring what a real SDK
    /// persists on device.
    cached: Option<Principal>,
}

/// Identity provider backed entirely by process memory.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    inner: Mutex<MemoryState>,
}

impl MemoryIdentityProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registered account (builder-style, for tests and demos).
    #[must_use]
    pub fn with_account(self, email: &str, password: &str) -> Self {
        let key = normalize_email(email);
        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            display_name: Some(name_from_email(&key)),
            email: Some(key.clone()),
        };
        self.state().accounts.insert(key, Account {
            password: password.to_owned(),
            principal,
        });
        self
    }

    /// Seed the cached session so a controller starts signed in.
    #[must_use]
    pub fn with_cached_principal(self, principal: Principal) -> Self {
        self.state().cached = Some(principal);
        self
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, ProviderError> {
        let mut state = self.state();
        let key = normalize_email(email);
        let Some(account) = state.accounts.get(&key) else {
            return Err(ProviderError::Rejected(INVALID_CREDENTIALS.to_owned()));
        };
        if account.password != password {
            return Err(ProviderError::Rejected(INVALID_CREDENTIALS.to_owned()));
        }
        let principal = account.principal.clone();
        state.cached = Some(principal.clone());
        Ok(principal)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal, ProviderError> {
        let mut state = self.state();
        let key = normalize_email(email);
        if state.accounts.contains_key(&key) {
            return Err(ProviderError::Rejected(EMAIL_IN_USE.to_owned()));
        }
        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            display_name: Some(name_from_email(&key)),
            email: Some(key.clone()),
        };
        state.accounts.insert(key, Account {
            password: password.to_owned(),
            principal: principal.clone(),
        });
        state.cached = Some(principal.clone());
        Ok(principal)
    }

    async fn sign_in_anonymously(&self) -> Result<Principal, ProviderError> {
        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            display_name: None,
            email: None,
        };
        self.state().cached = Some(principal.clone());
        Ok(principal)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.state().cached = None;
        Ok(())
    }

    fn cached_principal(&self) -> Option<Principal> {
        self.state().cached.clone()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Default display name: the local part of the email.
fn name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|local| !local.trim().is_empty())
        .unwrap_or("user")
        .to_owned()
}
