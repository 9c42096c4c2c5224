//! HTTP identity provider speaking a Firebase-style accounts REST surface.
//!
//! ARCHITECTURE
//! ============
//! Credential sign-in posts to `accounts:signInWithPassword`; registration and
//! anonymous sign-in both post to `accounts:signUp` (anonymous sends no
//! credentials). Error bodies carry `{"error": {"message": ...}}` and that
//! message is surfaced verbatim.
//!
//! TRADE-OFFS
//! ==========
//! The session cache file is best-effort: IO failures are logged and ignored,
//! and the in-memory session stays canonical. A corrupt cache is treated the
//! same as no cache rather than failing construction.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::principal::Principal;
use crate::provider::{IdentityProvider, ProviderError};

const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";

const API_KEY_ENV: &str = "SESSION_API_KEY";
const AUTH_URL_ENV: &str = "SESSION_AUTH_URL";
const CACHE_PATH_ENV: &str = "SESSION_CACHE_PATH";

/// REST provider configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub api_key: String,
    pub base_url: String,
    /// Where to persist the session across restarts; `None` disables caching.
    pub cache_path: Option<PathBuf>,
}

impl RestConfig {
    /// Load from `SESSION_API_KEY`, `SESSION_AUTH_URL`, `SESSION_CACHE_PATH`.
    /// Returns `None` if the API key is missing (the provider is disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let Ok(api_key) = std::env::var(API_KEY_ENV) else {
            return None;
        };
        let base_url = match std::env::var(AUTH_URL_ENV) {
            Ok(url) => url,
            Err(_) => DEFAULT_AUTH_URL.to_owned(),
        };
        let cache_path = match std::env::var(CACHE_PATH_ENV) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => None,
        };
        Some(Self { api_key, base_url, cache_path })
    }
}

/// Session descriptor persisted by the provider, not by the controller.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CachedSession {
    principal: Principal,
    id_token: String,
    refresh_token: Option<String>,
}

/// Successful response shape shared by the sign-in and sign-up endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Identity provider backed by an accounts REST API.
pub struct RestIdentityProvider {
    config: RestConfig,
    client: reqwest::Client,
    cached: Mutex<Option<CachedSession>>,
}

impl RestIdentityProvider {
    /// Build a provider, reloading any session persisted at the configured
    /// cache path so `cached_principal()` restores it.
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        let cached = config.cache_path.as_deref().and_then(load_cached_session);
        Self {
            config,
            client: reqwest::Client::new(),
            cached: Mutex::new(cached),
        }
    }

    fn cached(&self) -> MutexGuard<'_, Option<CachedSession>> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn authenticate(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<Principal, ProviderError> {
        let url = endpoint_url(&self.config.base_url, action, &self.config.api_key);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|error| ProviderError::Unreachable(error.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| ProviderError::Unreachable(error.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Rejected(error_message(&text, status.as_u16())));
        }

        let payload: AccountResponse = serde_json::from_str(&text)
            .map_err(|error| ProviderError::Unreachable(format!("unexpected response: {error}")))?;

        let session = CachedSession {
            principal: Principal {
                id: payload.local_id,
                display_name: payload.display_name.filter(|name| !name.is_empty()),
                email: payload.email.filter(|email| !email.is_empty()),
            },
            id_token: payload.id_token,
            refresh_token: payload.refresh_token,
        };
        self.remember(&session);
        Ok(session.principal)
    }

    fn remember(&self, session: &CachedSession) {
        *self.cached() = Some(session.clone());
        if let Some(path) = self.config.cache_path.as_deref() {
            if let Err(error) = store_cached_session(path, session) {
                tracing::warn!(%error, path = %path.display(), "failed to persist session cache");
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, ProviderError> {
        self.authenticate(
            "signInWithPassword",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
        .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal, ProviderError> {
        self.authenticate(
            "signUp",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
        .await
    }

    async fn sign_in_anonymously(&self) -> Result<Principal, ProviderError> {
        // signUp with no credentials creates an anonymous account.
        self.authenticate("signUp", serde_json::json!({ "returnSecureToken": true }))
            .await
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        *self.cached() = None;
        if let Some(path) = self.config.cache_path.as_deref() {
            if let Err(error) = std::fs::remove_file(path) {
                if error.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(%error, path = %path.display(), "failed to remove session cache");
                }
            }
        }
        Ok(())
    }

    fn cached_principal(&self) -> Option<Principal> {
        self.cached().as_ref().map(|session| session.principal.clone())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn endpoint_url(base_url: &str, action: &str, api_key: &str) -> String {
    format!("{}/accounts:{action}?key={api_key}", base_url.trim_end_matches('/'))
}

/// Extract the provider's error message, falling back to the HTTP status.
fn error_message(body: &str, status: u16) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => format!("HTTP {status}"),
    }
}

fn load_cached_session(path: &Path) -> Option<CachedSession> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(%error, path = %path.display(), "failed to read session cache");
            }
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "ignoring malformed session cache");
            None
        }
    }
}

fn store_cached_session(path: &Path, session: &CachedSession) -> Result<(), std::io::Error> {
    let rendered = serde_json::to_string_pretty(session).map_err(std::io::Error::other)?;
    std::fs::write(path, rendered)
}
