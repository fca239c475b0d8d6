//! Error types for the JWKS client

use std::fmt;

use jwk_cache::KeyCacheError;

#[derive(Debug)]
pub enum JwksClientError {
    Cache(KeyCacheError),
    Request(Box<reqwest::Error>),
    UnexpectedStatus(reqwest::StatusCode),
    InvalidContentType(String),
    Parse(String),
    MalformedToken(String),
    MissingKeyId,
}

impl fmt::Display for JwksClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JwksClientError::Cache(err) => write!(f, "Key cache error: {}", err),
            JwksClientError::Request(err) => write!(f, "Request error: {}", err),
            JwksClientError::UnexpectedStatus(status) => {
                write!(f, "JWKS endpoint returned status {}", status)
            }
            JwksClientError::InvalidContentType(content_type) => {
                write!(f, "JWKS endpoint returned non-JSON content type: {}", content_type)
            }
            JwksClientError::Parse(msg) => write!(f, "JSON parse error: {}", msg),
            JwksClientError::MalformedToken(msg) => write!(f, "Malformed token: {}", msg),
            JwksClientError::MissingKeyId => write!(f, "Token header carries no key ID"),
        }
    }
}

impl std::error::Error for JwksClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JwksClientError::Cache(err) => Some(err),
            JwksClientError::Request(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<KeyCacheError> for JwksClientError {
    fn from(err: KeyCacheError) -> Self {
        JwksClientError::Cache(err)
    }
}

impl From<reqwest::Error> for JwksClientError {
    fn from(err: reqwest::Error) -> Self {
        JwksClientError::Request(Box::new(err))
    }
}

impl From<serde_json::Error> for JwksClientError {
    fn from(err: serde_json::Error) -> Self {
        JwksClientError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, JwksClientError>;
