//! Parsed signing key and its derived public forms.

use crate::config::JwtAlgorithm;
use crate::error::StsError;
use crate::keys::jwk::{Jwk, Jwks};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

/// PEM SubjectPublicKeyInfo of the signing key, as published to verifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyRecord {
    pub public_key: String,
}

/// Signing key plus everything derived from it at load time.
///
/// Built once at startup and shared read-only afterwards.
pub struct KeyMaterial {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_key: PublicKeyRecord,
    jwk: Jwk,
    algorithm: JwtAlgorithm,
}

impl KeyMaterial {
    /// Parse a PEM RSA private key (PKCS#1 or PKCS#8) and derive its public key.
    ///
    /// # Errors
    ///
    /// Returns [`StsError::InvalidKeyFormat`] for empty, non-UTF-8 or
    /// non-RSA payloads.
    pub fn from_pem(bytes: &[u8], algorithm: JwtAlgorithm) -> Result<Self, StsError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(StsError::invalid_key("key file is empty"));
        }

        let pem = std::str::from_utf8(bytes)
            .map_err(|_| StsError::invalid_key("key file is not valid UTF-8 PEM"))?;

        let private_key = parse_private_key(pem)?;
        let public_key = RsaPublicKey::from(&private_key);

        let public_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| StsError::invalid_key(format!("cannot encode public key: {}", e)))?;

        // Normalize to PKCS#1 DER so both PEM flavours sign the same way.
        let der = private_key
            .to_pkcs1_der()
            .map_err(|e| StsError::invalid_key(e.to_string()))?;
        let encoding_key = EncodingKey::from_rsa_der(der.as_bytes());

        let jwk = Jwk::from_rsa(&public_key, algorithm.as_str());
        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|e| StsError::invalid_key(e.to_string()))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            public_key: PublicKeyRecord {
                public_key: public_pem,
            },
            jwk,
            algorithm,
        })
    }

    #[must_use]
    pub fn public_key(&self) -> &PublicKeyRecord {
        &self.public_key
    }

    #[must_use]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    #[must_use]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.jwk.kid
    }

    #[must_use]
    pub fn algorithm(&self) -> JwtAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub fn jwks(&self) -> Jwks {
        Jwks::single(self.jwk.clone())
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("kid", &self.jwk.kid)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, StsError> {
    if let Ok(key) = RsaPrivateKey::from_pkcs1_pem(pem) {
        return Ok(key);
    }
    RsaPrivateKey::from_pkcs8_pem(pem)
        .map_err(|e| StsError::invalid_key(format!("not an RSA private key: {}", e)))
}
