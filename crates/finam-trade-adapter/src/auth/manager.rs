/*
[INPUT]:  Long-lived API secret
[OUTPUT]: Session token state and refresh decisions
[POS]:    Auth layer - owns the credential and serializes refreshes
[UPDATE]: When changing session lifetime or refresh policy
*/

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::http::{FinamError, Result};

use super::jwt::{JwtManager, decode_expiry};

/// Environment variable holding the API secret
pub const TOKEN_ENV: &str = "TOKEN";

/// Session lifetime assumed when the JWT carries no `exp` claim
const DEFAULT_SESSION_TTL_MINUTES: i64 = 15;
const DEFAULT_REFRESH_LEEWAY_SECONDS: i64 = 60;

/// Owns the API secret and the session JWT exchanged for it
///
/// Cloning is cheap; clones share the same token store and refresh guard.
#[derive(Debug, Clone)]
pub struct TokenManager {
    secret: Arc<SecretString>,
    jwt_manager: JwtManager,
    refresh_guard: Arc<Mutex<()>>,
    refresh_leeway: Duration,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::new(SecretString::from(secret.into())),
            jwt_manager: JwtManager::new(),
            refresh_guard: Arc::new(Mutex::new(())),
            refresh_leeway: Duration::seconds(DEFAULT_REFRESH_LEEWAY_SECONDS),
        }
    }

    /// Build from the `TOKEN` environment variable
    ///
    /// An empty value counts as unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(TOKEN_ENV) {
            Some(secret) if !secret.trim().is_empty() => Ok(Self::new(secret.trim())),
            _ => Err(FinamError::Config(format!(
                "{TOKEN_ENV} environment variable is not set"
            ))),
        }
    }

    /// Refresh this long before the session expires
    pub fn with_refresh_leeway(mut self, leeway: std::time::Duration) -> Self {
        self.refresh_leeway =
            Duration::from_std(leeway).unwrap_or(Duration::seconds(DEFAULT_REFRESH_LEEWAY_SECONDS));
        self
    }

    pub(crate) fn secret(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Get the JWT manager
    pub fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    /// Current session token, fresh or not
    pub fn jwt_token(&self) -> Option<String> {
        self.jwt_manager.get_token()
    }

    /// Store a session token obtained from the API
    ///
    /// The expiry is read from the `exp` claim; without one the default
    /// session lifetime applies from now.
    pub fn set_jwt_token(&self, token: impl Into<String>) -> DateTime<Utc> {
        let token = token.into();
        let expires_at = decode_expiry(&token)
            .unwrap_or_else(|| Utc::now() + Duration::minutes(DEFAULT_SESSION_TTL_MINUTES));
        debug!(%expires_at, "storing session token");
        self.jwt_manager.set_token(token, expires_at);
        expires_at
    }

    /// True when there is no token or it expires within the refresh leeway
    pub fn needs_refresh(&self) -> bool {
        self.jwt_manager.expires_within(self.refresh_leeway)
    }

    /// Token usable for a request right now, if any
    pub fn fresh_token(&self) -> Option<String> {
        if self.needs_refresh() {
            None
        } else {
            self.jwt_manager.get_token()
        }
    }

    /// Drop the session token so the next request exchanges the secret again
    pub fn invalidate(&self) {
        self.jwt_manager.clear();
    }

    /// Drop `token` unless it was already replaced by a newer one
    pub fn invalidate_token(&self, token: &str) -> bool {
        self.jwt_manager.clear_if(token)
    }

    /// Accounts reported by the last token details call
    pub fn account_ids(&self) -> Vec<String> {
        self.jwt_manager
            .token_data()
            .map(|data| data.account_ids)
            .unwrap_or_default()
    }

    /// Held while exchanging the secret so concurrent callers wait for one refresh
    pub(crate) async fn refresh_guard(&self) -> MutexGuard<'_, ()> {
        self.refresh_guard.lock().await
    }
}
