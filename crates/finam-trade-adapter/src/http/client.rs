/*
[INPUT]:  HTTP configuration (base URL, timeouts, retry policy) and a TokenManager
[OUTPUT]: Authenticated, retried API calls decoded into typed responses
[POS]:    HTTP layer - core client and shared transport
[UPDATE]: When adding connection options or changing transport behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::auth::TokenManager;
use crate::types::{AuthRequest, AuthResponse};

use super::error::is_retryable_status;
use super::retry::{ExponentialBackoff, RetryConfig};
use super::{AccessTokens, Account, Assets, FinamError, Instruments, Orders, Result};

/// Base URL for the Finam Trade REST API
const DEFAULT_BASE_URL: &str = "https://api.finam.ru/v1/";
/// Wait reported for a 429 that carried no usable Retry-After header
const DEFAULT_RATE_LIMIT_WAIT_SECS: u64 = 60;

pub const BASE_URL_ENV: &str = "FINAM_BASE_URL";
pub const TIMEOUT_ENV: &str = "FINAM_TIMEOUT_SECS";
pub const MAX_RETRIES_ENV: &str = "FINAM_MAX_RETRIES";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryConfig,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            user_agent: concat!("finam-trade-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `FINAM_BASE_URL`, `FINAM_TIMEOUT_SECS` and `FINAM_MAX_RETRIES`
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.timeout = Duration::from_secs(parse_setting(TIMEOUT_ENV, &raw)?);
        }
        if let Some(raw) = lookup(MAX_RETRIES_ENV) {
            self.retry.max_retries = parse_setting(MAX_RETRIES_ENV, &raw)?;
        }
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| FinamError::Config(format!("invalid {key}={raw:?}: {e}")))
}

/// Main HTTP client for the Finam Trade API
///
/// Cheap to clone; clones share the connection pool and the session token.
#[derive(Debug, Clone)]
pub struct FinamClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http_client: Client,
    base_url: Url,
    config: ClientConfig,
    tokens: TokenManager,
}

impl FinamClient {
    /// Create a new client with default configuration
    pub fn new(tokens: TokenManager) -> Result<Self> {
        Self::with_config(tokens, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(tokens: TokenManager, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(FinamError::Config(format!(
                "base URL {} cannot carry a path",
                config.base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                config,
                tokens,
            }),
        })
    }

    /// Build a client from `TOKEN` and the `FINAM_*` overrides
    pub fn from_env() -> Result<Self> {
        Self::with_config(TokenManager::from_env()?, ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.inner.tokens
    }

    /// Session token management
    pub fn access_tokens(&self) -> AccessTokens<'_> {
        AccessTokens::new(self)
    }

    /// Account information, transactions and trades
    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    /// Exchanges, instruments reference data and trading parameters
    pub fn assets(&self) -> Assets<'_> {
        Assets::new(self)
    }

    /// Market data: bars, quotes, trades and order book
    pub fn instruments(&self) -> Instruments<'_> {
        Instruments::new(self)
    }

    /// Order placement and lifecycle
    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    /// Build full URL from path segments, percent-encoding each one
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FinamError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build request builder for an endpoint
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments)?;
        Ok(self.inner.http_client.request(method, url))
    }

    /// Authenticated GET decoded into `T`
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        self.execute(Method::GET, segments, query, None, true, true)
            .await
    }

    /// Authenticated, non-idempotent POST with a JSON body decoded into `T`
    ///
    /// Only resent when the request provably never reached the server.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, segments, &[], Some(&body), true, false)
            .await
    }

    /// Authenticated DELETE decoded into `T`
    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.execute(Method::DELETE, segments, &[], None, true, true)
            .await
    }

    /// POST without a session token (session endpoints)
    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, segments, &[], Some(&body), false, true)
            .await
    }

    /// Send a request, refreshing the session and replaying once on 401
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
        auth: bool,
        idempotent: bool,
    ) -> Result<T> {
        let resource = segments.join("/");
        let mut replayed = false;

        loop {
            let token = if auth {
                Some(self.ensure_jwt().await?)
            } else {
                None
            };

            let (status, text) = self
                .send_raw(
                    method.clone(),
                    segments,
                    query,
                    body,
                    token.as_deref(),
                    idempotent,
                )
                .await?;

            if status.is_success() {
                return decode_json(&text, &resource);
            }

            if status == StatusCode::UNAUTHORIZED && !replayed {
                if let Some(rejected) = token.as_deref() {
                    replayed = true;
                    warn!(resource = %resource, "session token rejected, refreshing");
                    self.inner.tokens.invalidate_token(rejected);
                    continue;
                }
            }

            return Err(FinamError::from_status(status, &text, &resource));
        }
    }

    /// Return a session token that is not about to expire
    ///
    /// Concurrent callers share one exchange: whoever takes the refresh guard
    /// first refreshes, the rest re-check after it is released.
    pub(crate) async fn ensure_jwt(&self) -> Result<String> {
        let tokens = &self.inner.tokens;
        if let Some(token) = tokens.fresh_token() {
            return Ok(token);
        }

        let _guard = tokens.refresh_guard().await;
        if let Some(token) = tokens.fresh_token() {
            return Ok(token);
        }
        self.exchange_secret().await
    }

    /// POST sessions: trade the API secret for a session token
    ///
    /// Callers must hold the refresh guard.
    pub(crate) async fn exchange_secret(&self) -> Result<String> {
        let body = serde_json::to_value(AuthRequest {
            secret: self.inner.tokens.secret().to_string(),
        })?;

        debug!("exchanging API secret for session token");
        let (status, text) = self
            .send_raw(Method::POST, &["sessions"], &[], Some(&body), None, true)
            .await?;
        if !status.is_success() {
            return Err(FinamError::from_status(status, &text, "sessions"));
        }

        let response: AuthResponse = decode_json(&text, "sessions")?;
        if response.token.trim().is_empty() {
            return Err(FinamError::InvalidResponse(
                "sessions returned an empty token".to_string(),
            ));
        }

        let expires_at = self.inner.tokens.set_jwt_token(response.token.clone());
        info!(%expires_at, "session token refreshed");
        Ok(response.token)
    }

    /// Perform one logical request with retries for transient failures
    ///
    /// Returns the final status and body. Statuses outside the retryable set
    /// come back as-is for the caller to map. Non-idempotent requests are
    /// only resent after failures the server cannot have acted on.
    async fn send_raw(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
        token: Option<&str>,
        idempotent: bool,
    ) -> Result<(StatusCode, String)> {
        let mut backoff = ExponentialBackoff::new(&self.inner.config.retry);

        loop {
            let mut builder = self.request(method.clone(), segments)?;
            if !query.is_empty() {
                builder = builder.query(query);
            }
            if let Some(body) = body {
                builder = builder.json(body);
            }
            if let Some(token) = token {
                builder = builder.header(AUTHORIZATION, token);
            }

            debug!(
                method = %method,
                path = %segments.join("/"),
                attempt = backoff.attempt(),
                "sending request"
            );

            let response = match builder.send().await {
                Ok(response) => response,
                Err(err) if can_resend_error(&err, idempotent) => {
                    if let Some(delay) = backoff.next_backoff() {
                        warn!(
                            error = %err,
                            delay_ms = delay.as_millis() as u64,
                            attempt = backoff.attempt(),
                            "network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(self.exhausted(err, backoff.attempt()));
                }
                Err(err) => return Err(self.exhausted(err, 0)),
            };

            let status = response.status();
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            let text = response.text().await?;

            if status.is_success() || !can_resend_status(status, idempotent) {
                return Ok((status, text));
            }

            if let Some(backoff_delay) = backoff.next_backoff() {
                let max_wait = self.inner.config.retry.max_backoff;
                let delay = retry_after
                    .map(Duration::from_secs)
                    .map_or(backoff_delay, |wait| wait.min(max_wait));
                warn!(
                    status = status.as_u16(),
                    delay_ms = delay.as_millis() as u64,
                    attempt = backoff.attempt(),
                    "retryable status, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(FinamError::RateLimit {
                    retry_after: retry_after.unwrap_or(DEFAULT_RATE_LIMIT_WAIT_SECS),
                });
            }
            if backoff.attempt() > 0 {
                return Err(FinamError::MaxRetriesExceeded {
                    attempts: backoff.attempt() + 1,
                });
            }
            return Ok((status, text));
        }
    }

    fn exhausted(&self, err: reqwest::Error, retries: u32) -> FinamError {
        if retries > 0 {
            FinamError::MaxRetriesExceeded {
                attempts: retries + 1,
            }
        } else if err.is_timeout() {
            FinamError::Timeout {
                duration: self.inner.config.timeout.as_secs(),
            }
        } else {
            FinamError::Http(err)
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// A timed-out or half-sent request may still have been processed; only a
/// failed connect is known to have reached nobody.
fn can_resend_error(err: &reqwest::Error, idempotent: bool) -> bool {
    if idempotent {
        is_transient(err)
    } else {
        err.is_connect()
    }
}

/// 429 and 503 are refusals before processing, so any request may be resent
fn can_resend_status(status: StatusCode, idempotent: bool) -> bool {
    if idempotent {
        is_retryable_status(status.as_u16())
    } else {
        matches!(
            status,
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
        )
    }
}

/// Decode a success body, reporting the JSON path of the first mismatch
fn decode_json<T: DeserializeOwned>(text: &str, resource: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    let mut deserializer = serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        FinamError::InvalidResponse(format!("{resource}: {} (at {})", err.inner(), err.path()))
    })
}
