//! JWKS download and key resolution

use std::time::Duration;

use jwk_cache::{Jwk, JwkSet, KeyCache, MemoryKeyCache};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{JwksClientError, Result};
use crate::token::key_id_from_token;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for a JWKS endpoint.
///
/// Resolves verification keys by key ID, consulting the configured key cache
/// before downloading a fresh key set. Concurrent misses may download
/// redundantly; ingestion into the cache is idempotent.
pub struct JwksClient {
    client: Client,
    jwks_url: String,
    cache: Box<dyn KeyCache + Send + Sync>,
}

impl JwksClient {
    /// Create a client backed by a persistent key cache
    pub fn new(jwks_url: &str) -> Self {
        Self::with_cache(jwks_url, Box::new(MemoryKeyCache::persistent()))
    }

    /// Create a client with a custom cache discipline
    pub fn with_cache(jwks_url: &str, cache: Box<dyn KeyCache + Send + Sync>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            jwks_url: jwks_url.to_string(),
            cache,
        }
    }

    /// Download the key set published at the JWKS endpoint
    pub async fn download_keys(&self) -> Result<Vec<Jwk>> {
        debug!(url = %self.jwks_url, "Downloading JWKS");

        let response = self.client.get(&self.jwks_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %self.jwks_url, "JWKS download failed");
            return Err(JwksClientError::UnexpectedStatus(status));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.starts_with("application/json") {
            return Err(JwksClientError::InvalidContentType(content_type));
        }

        let body = response.text().await?;
        let jwks: JwkSet = serde_json::from_str(&body)?;

        debug!(count = jwks.keys.len(), "Downloaded JWKS");
        Ok(jwks.keys)
    }

    /// Resolve a key by its key ID, downloading a fresh key set on a miss.
    ///
    /// A hit is served from the cache without touching the network. On a
    /// miss or an expired entry the key set is re-downloaded and ingested;
    /// the call fails with a cache `NotFound` if the fresh set does not
    /// contain the requested key either.
    pub async fn get_key(&self, key_id: &str) -> Result<Jwk> {
        match self.cache.get(key_id) {
            Ok(key) => {
                debug!(key_id, "Key cache hit");
                return Ok(key);
            }
            Err(err) => {
                debug!(key_id, reason = %err, "Key cache miss");
            }
        }

        let keys = self.download_keys().await?;
        let key = self.cache.add(key_id, &keys)?;
        Ok(key)
    }

    /// Resolve the verification key for a compact-serialized JWS token.
    ///
    /// Reads the key ID from the token's protected header; verifying the
    /// signature with the returned key is the caller's concern.
    pub async fn key_for_token(&self, token: &str) -> Result<Jwk> {
        let key_id = key_id_from_token(token)?;
        debug!(key_id = %key_id, "Resolving key for token");
        self.get_key(&key_id).await
    }
}
