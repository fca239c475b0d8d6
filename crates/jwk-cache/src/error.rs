//! Error types for the key cache

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCacheError {
    NotFound,
    Expired,
}

impl fmt::Display for KeyCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCacheError::NotFound => write!(f, "no matching key has been found"),
            KeyCacheError::Expired => write!(f, "key exists but is expired"),
        }
    }
}

impl std::error::Error for KeyCacheError {}

pub type Result<T> = std::result::Result<T, KeyCacheError>;
