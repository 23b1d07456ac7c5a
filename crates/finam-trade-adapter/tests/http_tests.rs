/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for transport retry and error mapping
[POS]:    Integration tests - HTTP transport
[UPDATE]: When retry policy or error mapping changes
*/

mod common;

use std::time::Duration;

use common::{authed_client, authed_client_with, fast_retry, setup_mock_server};
use finam_trade_adapter::{ClientConfig, FinamClient, FinamError, RetryConfig, TokenManager};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn clock_body() -> serde_json::Value {
    serde_json::json!({"timestamp": "2025-03-10T07:00:00Z"})
}

#[test]
fn test_client_creation() {
    let _client = assert_ok!(FinamClient::new(TokenManager::new("secret")));
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default().with_retry(RetryConfig::disabled());
    let client = assert_ok!(FinamClient::with_config(TokenManager::new("secret"), config));
    assert_eq!(client.config().retry.max_retries, 0);
    assert_eq!(client.config().base_url, "https://api.finam.ru/v1/");
}

#[test]
fn test_client_rejects_invalid_base_url() {
    let config = ClientConfig::default().with_base_url("not a url");
    let err = FinamClient::with_config(TokenManager::new("secret"), config).unwrap_err();
    assert!(matches!(err, FinamError::UrlParse(_)));
}

#[tokio::test]
async fn test_transient_status_is_retried() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clock_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client_with(&server, fast_retry(2));

    let clock = assert_ok!(client.assets().get_clock().await);
    assert_eq!(clock.timestamp.to_rfc3339(), "2025-03-10T07:00:00+00:00");
}

#[tokio::test]
async fn test_persistent_failure_exhausts_retries() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let client = authed_client_with(&server, fast_retry(2));

    let err = client.assets().get_clock().await.unwrap_err();
    assert!(
        matches!(err, FinamError::MaxRetriesExceeded { attempts: 3 }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_retry_disabled_maps_status_directly() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.assets().get_clock().await.unwrap_err();

    match err {
        FinamError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_after_header_is_honoured() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clock_body()))
        .expect(1)
        .mount(&server)
        .await;

    // Backoff alone would wait 30s
    let slow_backoff = RetryConfig {
        max_retries: 1,
        initial_backoff: Duration::from_secs(30),
        max_backoff: Duration::from_secs(30),
        multiplier: 1.0,
        jitter_factor: 0.0,
    };
    let client = authed_client_with(&server, slow_backoff);

    let started = tokio::time::Instant::now();
    assert_ok!(client.assets().get_clock().await);
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(900), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(10), "{elapsed:?}");
}

#[tokio::test]
async fn test_retry_after_is_capped_by_max_backoff() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "86400"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clock_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client_with(&server, fast_retry(1));
    let result =
        tokio::time::timeout(Duration::from_secs(5), client.assets().get_clock()).await;

    let clock = assert_ok!(result.expect("a day-long Retry-After must not be slept"));
    assert_eq!(clock.timestamp.to_rfc3339(), "2025-03-10T07:00:00+00:00");
}

#[tokio::test]
async fn test_rate_limit_exhausted() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.assets().get_clock().await.unwrap_err();

    assert!(matches!(err, FinamError::RateLimit { retry_after: 7 }), "{err:?}");
    assert!(err.is_retryable());
    assert_eq!(err.retry_delay(), Some(7));
}

#[tokio::test]
async fn test_not_found_names_resource() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/accounts/A1/orders/42"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.orders().get_order("A1", "42").await.unwrap_err();

    match err {
        FinamError::NotFound { resource } => assert_eq!(resource, "accounts/A1/orders/42"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_gateway_error_body_is_parsed() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assets/UNKNOWN/schedule"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": 3,
            "message": "symbol not found",
            "details": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.assets().get_schedule("UNKNOWN").await.unwrap_err();

    match err {
        FinamError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, 3);
            assert_eq!(message, "symbol not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/assets/clock"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"timestamp": 17})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.assets().get_clock().await.unwrap_err();

    match err {
        FinamError::InvalidResponse(msg) => assert!(msg.contains("timestamp"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_reported() {
    // Bind then drop to get a port nothing listens on
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config = ClientConfig::default()
        .with_base_url(format!("http://{addr}"))
        .with_retry(fast_retry(1));
    let client = FinamClient::with_config(TokenManager::new("secret"), config).unwrap();

    let err = client.access_tokens().set_jwt_token().await.unwrap_err();
    assert!(
        matches!(err, FinamError::MaxRetriesExceeded { attempts: 2 }),
        "unexpected error: {err:?}"
    );
}
