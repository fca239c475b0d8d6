//! JWKS endpoint client
//!
//! Downloads JSON Web Key Sets over HTTP and resolves individual
//! verification keys by key ID, backed by a pluggable in-memory key cache.
//! Lookups for inbound tokens go through the cache first and fall back to a
//! fresh download on a miss or an expired entry.

mod client;
mod error;
mod token;

pub use client::JwksClient;
pub use error::{JwksClientError, Result};
pub use token::key_id_from_token;

pub use jwk_cache::{Jwk, JwkSet, KeyCache, KeyCacheError, MaxAge, MaxSize, MemoryKeyCache};
