//! Signing key abstraction used by the token issuer.

use crate::error::StsError;
use crate::keys::KeyMaterial;
use jsonwebtoken::{Algorithm, EncodingKey};

/// Source of the key that signs issued tokens.
pub trait JwtSigner: Send + Sync {
    /// Get the encoding key for JWT serialization.
    fn encoding_key(&self) -> Result<&EncodingKey, StsError>;

    /// Get the key ID for the JWT header.
    fn key_id(&self) -> &str;

    /// Get the signature algorithm.
    fn algorithm(&self) -> Algorithm;
}

impl JwtSigner for KeyMaterial {
    fn encoding_key(&self) -> Result<&EncodingKey, StsError> {
        Ok(KeyMaterial::encoding_key(self))
    }

    fn key_id(&self) -> &str {
        KeyMaterial::key_id(self)
    }

    fn algorithm(&self) -> Algorithm {
        KeyMaterial::algorithm(self).to_jsonwebtoken()
    }
}
