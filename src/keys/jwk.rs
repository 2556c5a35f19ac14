//! JWK representation of the service public key.
//!
//! The key ID is the RFC 7638 thumbprint, so it is stable for a given key
//! across restarts.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub alg: String,
    pub n: String,
    pub e: String,
}

impl Jwk {
    /// Build a signing JWK for an RSA public key.
    #[must_use]
    pub fn from_rsa(public_key: &RsaPublicKey, alg: &str) -> Self {
        let n = URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be());
        let e = URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be());
        let kid = thumbprint(&n, &e);

        Jwk {
            kty: "RSA".to_string(),
            kid,
            key_use: "sig".to_string(),
            alg: alg.to_string(),
            n,
            e,
        }
    }
}

/// RFC 7638 thumbprint over the required RSA members in lexicographic order.
#[must_use]
pub fn thumbprint(n: &str, e: &str) -> String {
    let canonical = format!(r#"{{"e":"{}","kty":"RSA","n":"{}"}}"#, e, n);
    let hash = Sha256::digest(canonical.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// JWK Set as served to verifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    #[must_use]
    pub fn single(key: Jwk) -> Self {
        Jwks { keys: vec![key] }
    }
}
