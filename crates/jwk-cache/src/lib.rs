//! In-memory JSON Web Key cache
//!
//! Stores verification keys by key ID so that token verification does not
//! re-download the published key set on every lookup. Supports a bounded
//! discipline with TTL expiration and oldest-entry eviction, and a
//! persistent discipline that retains every key it observes.

mod cache;
mod error;
mod types;

pub use cache::{KeyCache, MaxAge, MaxSize, MemoryKeyCache};
pub use error::{KeyCacheError, Result};
pub use types::{Jwk, JwkSet};
