//! Integration tests for JwksClient.
//!
//! Uses wiremock for HTTP mocking. Tests cover JWKS download, content-type
//! and payload validation, cache-backed key resolution, and token-header
//! extraction end to end.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jwks_client::{
    JwksClient, JwksClientError, KeyCacheError, MaxAge, MaxSize, MemoryKeyCache,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JWKS_PATH: &str = "/.well-known/jwks.json";

fn jwks_body() -> serde_json::Value {
    json!({
        "keys": [
            {
                "kty": "RSA",
                "kid": "key-rs256",
                "alg": "RS256",
                "use": "sig",
                "n": "qvO8RY5BjLGk2vPavtSPkkrG4UwmBn4MQxislc6GoWBxNqUAgE0wbWDoClbNsf0k",
                "e": "AQAB"
            },
            {
                "kty": "EC",
                "kid": "key-es384",
                "alg": "ES384",
                "use": "sig",
                "crv": "P-384",
                "x": "fA1iTdCsWhHjh8NRcEz1QJLiW0t43Nx3",
                "y": "qX2mCVhZ1cwSAKuuGaLMnrYvyjge6HIQ"
            }
        ]
    })
}

async fn mount_jwks(server: &MockServer, expected_requests: u64) {
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
        .expect(expected_requests)
        .mount(server)
        .await;
}

fn jwks_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), JWKS_PATH)
}

fn signed_token(key_id: &str) -> String {
    let header = format!(r#"{{"alg":"RS256","typ":"JWT","kid":"{}"}}"#, key_id);
    format!("{}.e30.c2lnbmF0dXJl", URL_SAFE_NO_PAD.encode(header))
}

#[tokio::test]
async fn test_download_keys_success() {
    let server = MockServer::start().await;
    mount_jwks(&server, 1).await;

    let client = JwksClient::new(&jwks_url(&server));
    let keys = client.download_keys().await.expect("download failed");

    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].kid, "key-rs256");
    assert_eq!(keys[1].kid, "key-es384");
}

#[tokio::test]
async fn test_download_keys_rejects_non_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("Invalid Data"))
        .mount(&server)
        .await;

    let client = JwksClient::new(&jwks_url(&server));
    let err = client.download_keys().await.unwrap_err();

    assert!(matches!(err, JwksClientError::InvalidContentType(_)), "{:?}", err);
}

#[tokio::test]
async fn test_download_keys_rejects_invalid_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw("Invalid Data", "application/json"))
        .mount(&server)
        .await;

    let client = JwksClient::new(&jwks_url(&server));
    let err = client.download_keys().await.unwrap_err();

    assert!(matches!(err, JwksClientError::Parse(_)), "{:?}", err);
}

#[tokio::test]
async fn test_download_keys_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = JwksClient::new(&jwks_url(&server));
    let err = client.download_keys().await.unwrap_err();

    match err {
        JwksClientError::UnexpectedStatus(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_key_downloads_once_then_serves_from_cache() {
    let server = MockServer::start().await;
    mount_jwks(&server, 1).await;

    let client = JwksClient::new(&jwks_url(&server));

    let first = client.get_key("key-rs256").await.expect("first lookup failed");
    let second = client.get_key("key-rs256").await.expect("second lookup failed");

    assert_eq!(first.kid, "key-rs256");
    assert_eq!(second, first);
    // The mock's .expect(1) verifies on drop that only one download happened
}

#[tokio::test]
async fn test_persistent_cache_serves_sibling_keys_without_refetch() {
    let server = MockServer::start().await;
    mount_jwks(&server, 1).await;

    let client = JwksClient::new(&jwks_url(&server));

    client.get_key("key-rs256").await.expect("first lookup failed");
    // The default persistent cache ingested the whole set on the first miss
    let sibling = client.get_key("key-es384").await.expect("sibling lookup failed");

    assert_eq!(sibling.kid, "key-es384");
}

#[tokio::test]
async fn test_get_key_not_in_key_set() {
    let server = MockServer::start().await;
    mount_jwks(&server, 1).await;

    let client = JwksClient::new(&jwks_url(&server));
    let err = client.get_key("unknown-key").await.unwrap_err();

    assert!(
        matches!(err, JwksClientError::Cache(KeyCacheError::NotFound)),
        "{:?}",
        err
    );
}

#[tokio::test]
async fn test_get_key_refetches_after_expiry() {
    let server = MockServer::start().await;
    mount_jwks(&server, 2).await;

    let cache = MemoryKeyCache::new(
        MaxAge::Finite(Duration::from_millis(50)),
        MaxSize::Bounded(10),
    );
    let client = JwksClient::with_cache(&jwks_url(&server), Box::new(cache));

    client.get_key("key-rs256").await.expect("first lookup failed");
    tokio::time::sleep(Duration::from_millis(80)).await;
    let refreshed = client.get_key("key-rs256").await.expect("refetch failed");

    assert_eq!(refreshed.kid, "key-rs256");
}

#[tokio::test]
async fn test_key_for_token_end_to_end() {
    let server = MockServer::start().await;
    mount_jwks(&server, 1).await;

    let client = JwksClient::new(&jwks_url(&server));
    let token = signed_token("key-es384");

    let key = client.key_for_token(&token).await.expect("resolution failed");
    assert_eq!(key.kid, "key-es384");
    assert_eq!(key.alg.as_deref(), Some("ES384"));
}

#[tokio::test]
async fn test_key_for_token_rejects_malformed_token() {
    let client = JwksClient::new("http://localhost/.well-known/jwks.json");

    let err = client.key_for_token("not-a-token").await.unwrap_err();
    assert!(matches!(err, JwksClientError::MalformedToken(_)), "{:?}", err);
}

#[tokio::test]
async fn test_key_for_token_rejects_missing_key_id() {
    let client = JwksClient::new("http://localhost/.well-known/jwks.json");

    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let token = format!("{}.e30.c2lnbmF0dXJl", header);

    let err = client.key_for_token(&token).await.unwrap_err();
    assert!(matches!(err, JwksClientError::MissingKeyId), "{:?}", err);
}
