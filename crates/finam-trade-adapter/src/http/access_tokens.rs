/*
[INPUT]:  API secret held by the TokenManager
[OUTPUT]: Session JWT and its server-side details
[POS]:    HTTP layer - session endpoints (secret in body, no JWT header)
[UPDATE]: When session endpoints or token metadata change
*/

use chrono::Utc;
use tracing::debug;

use crate::http::{FinamClient, FinamError, Result};
use crate::types::{TokenDetails, TokenDetailsRequest};

/// Session token endpoints
#[derive(Debug, Clone, Copy)]
pub struct AccessTokens<'a> {
    client: &'a FinamClient,
}

impl<'a> AccessTokens<'a> {
    pub(crate) fn new(client: &'a FinamClient) -> Self {
        Self { client }
    }

    /// Exchange the API secret for a fresh session token and store it
    ///
    /// POST /v1/sessions
    pub async fn set_jwt_token(&self) -> Result<String> {
        let _guard = self.client.token_manager().refresh_guard().await;
        self.client.exchange_secret().await
    }

    /// Fetch expiry, permissions and accounts of the current session token
    ///
    /// POST /v1/sessions/details
    ///
    /// A token the server reports as already expired is dropped and
    /// surfaces as [`FinamError::TokenExpired`].
    pub async fn get_jwt_token_details(&self) -> Result<TokenDetails> {
        let token = self.client.ensure_jwt().await?;
        let details: TokenDetails = self
            .client
            .post_public(
                &["sessions", "details"],
                &TokenDetailsRequest {
                    token: token.clone(),
                },
            )
            .await?;

        let tokens = self.client.token_manager();
        if details.expires_at <= Utc::now() {
            tokens.invalidate_token(&token);
            return Err(FinamError::TokenExpired);
        }
        if !tokens.jwt_manager().set_details_if(&token, &details) {
            debug!("session token replaced while fetching details; not applied");
        }
        Ok(details)
    }
}
