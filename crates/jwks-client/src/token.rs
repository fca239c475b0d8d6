//! Compact JWS header parsing

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use crate::error::{JwksClientError, Result};

#[derive(Debug, Deserialize)]
struct TokenHeader {
    #[serde(default)]
    kid: Option<String>,
}

/// Extract the key ID from the protected header of a compact-serialized JWS.
///
/// Only the header segment is decoded; the signature is never checked here.
pub fn key_id_from_token(token: &str) -> Result<String> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(JwksClientError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    }

    let decoded = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|err| JwksClientError::MalformedToken(format!("header segment: {}", err)))?;
    let header: TokenHeader = serde_json::from_slice(&decoded)
        .map_err(|err| JwksClientError::MalformedToken(format!("header JSON: {}", err)))?;

    header
        .kid
        .filter(|kid| !kid.is_empty())
        .ok_or(JwksClientError::MissingKeyId)
}
