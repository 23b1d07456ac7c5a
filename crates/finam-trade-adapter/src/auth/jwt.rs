/*
[INPUT]:  JWT session tokens and expiration timestamps
[OUTPUT]: Token retrieval and expiration status
[POS]:    Auth layer - session token lifecycle
[UPDATE]: When changing token storage or expiry detection
*/

use std::sync::{Arc, PoisonError, RwLock};

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Duration, Utc};

use crate::types::TokenDetails;

/// Stored token data with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Accounts the token may act on, known once details were fetched
    pub account_ids: Vec<String>,
}

/// Thread-safe JWT token store
#[derive(Debug, Clone)]
pub struct JwtManager {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl JwtManager {
    /// Create a new empty JWT manager
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Store a new token with expiration
    pub fn set_token(&self, token: String, expires_at: DateTime<Utc>) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(TokenData {
            token,
            expires_at,
            account_ids: Vec::new(),
        });
    }

    /// Apply server-side details fetched for `token`
    ///
    /// Ignored unless `token` is still the stored one. Returns whether the
    /// details were applied.
    pub fn set_details_if(&self, token: &str, details: &TokenDetails) -> bool {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(data) if data.token == token => {
                data.expires_at = details.expires_at;
                data.account_ids = details.account_ids.clone();
                true
            }
            _ => false,
        }
    }

    /// Get the current token if available
    pub fn get_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| data.token.clone())
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        self.expires_within(Duration::zero())
    }

    /// True when no token is stored or it expires within `leeway`
    pub fn expires_within(&self, leeway: Duration) -> bool {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(data) => Utc::now() + leeway >= data.expires_at,
            None => true,
        }
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Clear the stored token only if it is still `token`
    ///
    /// Returns whether anything was cleared.
    pub fn clear_if(&self, token: &str) -> bool {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(data) if data.token == token => {
                *guard = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for JwtManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the `exp` claim from a JWT payload without verifying the signature
pub fn decode_expiry(jwt: &str) -> Option<DateTime<Utc>> {
    let payload_b64 = jwt.trim().split('.').nth(1)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| URL_SAFE.decode(payload_b64))
        .ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    let exp = payload.get("exp")?.as_i64()?;
    DateTime::from_timestamp(exp, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_jwt(claims: serde_json::Value) -> String {
        let header = serde_json::json!({"alg": "none", "typ": "JWT"});
        let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
        let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("{header_b64}.{payload_b64}.signature")
    }

    #[test]
    fn test_new_manager_is_empty() {
        let manager = JwtManager::new();
        assert!(manager.get_token().is_none());
        assert!(manager.is_expired());
    }

    #[test]
    fn test_set_and_get_token() {
        let manager = JwtManager::new();
        manager.set_token("test_token".to_string(), Utc::now() + Duration::hours(1));

        assert_eq!(manager.get_token(), Some("test_token".to_string()));
        assert!(!manager.is_expired());
        assert!(!manager.expires_within(Duration::minutes(5)));
        assert!(manager.expires_within(Duration::hours(2)));
    }

    #[test]
    fn test_clear_token() {
        let manager = JwtManager::new();
        manager.set_token("test_token".to_string(), Utc::now() + Duration::hours(1));

        manager.clear();
        assert!(manager.get_token().is_none());
        assert!(manager.is_expired());
    }

    #[test]
    fn test_clear_if_only_matches_current_token() {
        let manager = JwtManager::new();
        manager.set_token("new".to_string(), Utc::now() + Duration::hours(1));

        assert!(!manager.clear_if("old"));
        assert_eq!(manager.get_token(), Some("new".to_string()));
        assert!(manager.clear_if("new"));
        assert!(manager.get_token().is_none());
    }

    #[test]
    fn test_set_details_updates_expiry_and_accounts() {
        let manager = JwtManager::new();
        manager.set_token("t".to_string(), Utc::now() + Duration::hours(1));
        let expires_at = DateTime::from_timestamp(4_102_444_800, 0).unwrap();
        let details = TokenDetails {
            created_at: Utc::now(),
            expires_at,
            md_permissions: Vec::new(),
            account_ids: vec!["A1".to_string()],
            readonly: false,
        };

        assert!(manager.set_details_if("t", &details));
        let data = manager.token_data().unwrap();
        assert_eq!(data.expires_at, expires_at);
        assert_eq!(data.account_ids, vec!["A1".to_string()]);
    }

    #[test]
    fn test_set_details_ignores_replaced_token() {
        let manager = JwtManager::new();
        let original_expiry = Utc::now() + Duration::hours(1);
        manager.set_token("newer".to_string(), original_expiry);
        let details = TokenDetails {
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::minutes(1),
            md_permissions: Vec::new(),
            account_ids: vec!["OLD".to_string()],
            readonly: true,
        };

        assert!(!manager.set_details_if("older", &details));
        let data = manager.token_data().unwrap();
        assert_eq!(data.token, "newer");
        assert_eq!(data.expires_at, original_expiry);
        assert!(data.account_ids.is_empty());
    }

    #[test]
    fn test_decode_expiry() {
        let jwt = make_test_jwt(serde_json::json!({"exp": 1_700_000_000, "sub": "x"}));
        assert_eq!(
            decode_expiry(&jwt),
            DateTime::from_timestamp(1_700_000_000, 0)
        );
    }

    #[test]
    fn test_decode_expiry_without_claim_or_garbage() {
        let jwt = make_test_jwt(serde_json::json!({"sub": "x"}));
        assert_eq!(decode_expiry(&jwt), None);
        assert_eq!(decode_expiry("not-a-jwt"), None);
        assert_eq!(decode_expiry("a.!!!.c"), None);
    }
}
