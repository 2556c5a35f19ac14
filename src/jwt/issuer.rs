//! Token issuance for verified credentials.

use crate::error::StsError;
use crate::jwt::builder::JwtBuilder;
use crate::jwt::claims::Claims;
use crate::jwt::serializer::JwtSerializer;
use crate::jwt::signer::JwtSigner;
use crate::metrics;
use crate::storage::Credential;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// A signed token and the claims it carries.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    #[serde(skip)]
    pub claims: Claims,
}

pub struct TokenIssuer {
    signer: Arc<dyn JwtSigner>,
    serializer: JwtSerializer,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(signer: Arc<dyn JwtSigner>, issuer: impl Into<String>, ttl: Duration) -> Self {
        let serializer = JwtSerializer::new(signer.algorithm());
        Self {
            signer,
            serializer,
            issuer: issuer.into(),
            ttl,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn serializer(&self) -> &JwtSerializer {
        &self.serializer
    }

    /// Sign a claim set for `credential`. The password must already be verified.
    ///
    /// # Errors
    ///
    /// [`StsError::SigningFailure`] if the key cannot produce a signature; no
    /// token is returned in that case.
    pub fn issue(&self, credential: &Credential) -> Result<IssuedToken, StsError> {
        let ttl = i64::try_from(self.ttl.as_secs())
            .map_err(|_| StsError::signing("token TTL out of range"))?;

        let claims = JwtBuilder::new(self.issuer.clone())
            .subject(credential.username.clone())
            .role(credential.role.clone())
            .ttl_seconds(ttl)
            .build()
            .map_err(StsError::signing)?;

        let key = self.signer.encoding_key()?;
        let token = self
            .serializer
            .serialize(&claims, key, Some(self.signer.key_id()))
            .map_err(|e| {
                error!(error = %e, "Token signing failed");
                e
            })?;

        metrics::record_token_issued(&format!("{:?}", self.serializer.algorithm()));

        Ok(IssuedToken { token, claims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtAlgorithm;
    use crate::keys::KeyMaterial;
    use jsonwebtoken::{Algorithm, EncodingKey};

    const PKCS1_KEY: &str = include_str!("../../tests/fixtures/signing_key.pem");

    struct BrokenSigner {
        key: EncodingKey,
    }

    impl JwtSigner for BrokenSigner {
        fn encoding_key(&self) -> Result<&EncodingKey, StsError> {
            Ok(&self.key)
        }

        fn key_id(&self) -> &str {
            "broken"
        }

        fn algorithm(&self) -> Algorithm {
            Algorithm::RS256
        }
    }

    fn material() -> Arc<KeyMaterial> {
        Arc::new(KeyMaterial::from_pem(PKCS1_KEY.as_bytes(), JwtAlgorithm::RS256).unwrap())
    }

    #[test]
    fn test_issue_sets_identity_claims() {
        let keys = material();
        let issuer = TokenIssuer::new(keys.clone(), "sts-test", Duration::from_secs(3600));

        let issued = issuer
            .issue(&Credential::new("alice", "pw", "admin"))
            .unwrap();

        assert_eq!(issued.claims.sub, "alice");
        assert_eq!(issued.claims.role, "admin");
        assert_eq!(issued.claims.iss, "sts-test");
        assert_eq!(issued.claims.exp - issued.claims.iat, 3600);

        let verified = issuer
            .serializer()
            .deserialize(&issued.token, keys.decoding_key(), "sts-test")
            .unwrap();
        assert_eq!(verified, issued.claims);
    }

    #[test]
    fn test_header_carries_kid() {
        let keys = material();
        let issuer = TokenIssuer::new(keys.clone(), "sts-test", Duration::from_secs(60));
        let issued = issuer.issue(&Credential::new("bob", "pw", "user")).unwrap();

        let header = jsonwebtoken::decode_header(&issued.token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some(keys.key_id()));
    }

    #[test]
    fn test_unusable_key_is_signing_failure() {
        let signer = Arc::new(BrokenSigner {
            key: EncodingKey::from_secret(b"not-an-rsa-key"),
        });
        let issuer = TokenIssuer::new(signer, "sts-test", Duration::from_secs(60));

        let result = issuer.issue(&Credential::new("carol", "pw", "user"));
        assert!(matches!(result, Err(StsError::SigningFailure(_))));
    }

    #[test]
    fn test_overflowing_ttl_is_signing_failure() {
        for secs in [i64::MAX as u64 - 10, u64::MAX] {
            let issuer = TokenIssuer::new(material(), "sts-test", Duration::from_secs(secs));
            let result = issuer.issue(&Credential::new("erin", "pw", "user"));
            assert!(matches!(result, Err(StsError::SigningFailure(_))));
        }
    }

    #[test]
    fn test_serialized_form_exposes_only_token() {
        let keys = material();
        let issuer = TokenIssuer::new(keys, "sts-test", Duration::from_secs(60));
        let issued = issuer.issue(&Credential::new("dave", "pw", "user")).unwrap();

        let json = serde_json::to_value(&issued).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["token"], issued.token);
    }
}
