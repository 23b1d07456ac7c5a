/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for finam-trade-adapter tests

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use finam_trade_adapter::{ClientConfig, FinamClient, RetryConfig, TokenManager};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_SECRET: &str = "test-api-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Unsigned JWT expiring `expires_in_secs` from now; `sub` keeps tokens distinct
pub fn test_jwt(sub: &str, expires_in_secs: i64) -> String {
    let header = serde_json::json!({"alg": "none", "typ": "JWT"});
    let claims = serde_json::json!({
        "sub": sub,
        "exp": Utc::now().timestamp() + expires_in_secs,
    });
    let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
    let claims_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{header_b64}.{claims_b64}.signature")
}

/// Retry policy with millisecond delays so retry tests stay fast
#[allow(dead_code)]
pub fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        multiplier: 2.0,
        jitter_factor: 0.0,
    }
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer, retry: RetryConfig) -> FinamClient {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_retry(retry);
    FinamClient::with_config(TokenManager::new(TEST_SECRET), config).expect("client init")
}

/// Session token every `authed_client` starts with
#[allow(dead_code)]
pub fn preset_token() -> String {
    test_jwt("preset", 3600)
}

/// Client that already holds a valid session token, so no exchange happens
#[allow(dead_code)]
pub fn authed_client(server: &MockServer) -> FinamClient {
    authed_client_with(server, fast_retry(0))
}

#[allow(dead_code)]
pub fn authed_client_with(server: &MockServer, retry: RetryConfig) -> FinamClient {
    let client = client_for(server, retry);
    client.token_manager().set_jwt_token(preset_token());
    client
}

/// Mount `POST /sessions` answering with `token`, expecting `calls` hits
#[allow(dead_code)]
pub async fn mount_sessions(server: &MockServer, token: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/sessions"))
        .and(body_json(serde_json::json!({"secret": TEST_SECRET})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": token,
        })))
        .expect(calls)
        .mount(server)
        .await;
}
