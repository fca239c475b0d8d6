//! JSON Web Key types

use serde::{Deserialize, Serialize};

/// A JSON Web Key (RFC 7517), reduced to the fields needed to select and
/// hand out verification keys. The cache never interprets the key material.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key ID, matched against the `kid` of an inbound token's header
    #[serde(default)]
    pub kid: String,
    /// Key type, e.g. "RSA", "EC" or "oct"
    #[serde(default)]
    pub kty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,

    // RSA parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,

    // EC parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,

    // Symmetric key parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
}

impl Jwk {
    /// Whether the record carries usable key material.
    ///
    /// A key-set entry that matches a requested key ID in name only, with no
    /// key parameters, does not count as a match.
    pub fn has_key_material(&self) -> bool {
        fn present(param: &Option<String>) -> bool {
            param.as_deref().is_some_and(|value| !value.is_empty())
        }

        present(&self.n) || present(&self.x) || present(&self.k)
    }
}

/// A key set as published by a JWKS endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}
