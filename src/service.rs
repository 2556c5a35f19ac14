//! Operations exposed to the transport layer.

use crate::config::Config;
use crate::error::StsError;
use crate::jwt::{Claims, IssuedToken, TokenIssuer};
use crate::keys::{Jwks, KeyMaterial, PublicKeyRecord};
use crate::metrics;
use crate::storage::{Credential, CredentialStore};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Body of a login request. Absent fields decode as empty strings.
#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Secure Token Service facade. Cheap to clone; all state is shared.
#[derive(Clone)]
pub struct StsService {
    keys: Arc<KeyMaterial>,
    store: Arc<CredentialStore>,
    issuer: Arc<TokenIssuer>,
}

impl StsService {
    pub fn new(keys: Arc<KeyMaterial>, store: Arc<CredentialStore>, issuer: TokenIssuer) -> Self {
        Self {
            keys,
            store,
            issuer: Arc::new(issuer),
        }
    }

    /// Wire the facade from loaded key material and configuration.
    pub fn from_config(keys: KeyMaterial, config: &Config) -> Self {
        let keys = Arc::new(keys);
        let issuer = TokenIssuer::new(keys.clone(), config.jwt_issuer.clone(), config.token_ttl);
        Self::new(keys, Arc::new(CredentialStore::new()), issuer)
    }

    pub fn public_key(&self) -> &PublicKeyRecord {
        self.keys.public_key()
    }

    pub fn jwks(&self) -> Jwks {
        self.keys.jwks()
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Decode a credential from JSON and store it, replacing any previous record.
    ///
    /// # Errors
    ///
    /// [`StsError::InvalidInput`] if the body is not a credential object.
    pub fn register_user(&self, body: &[u8]) -> Result<(), StsError> {
        let credential: Credential = serde_json::from_slice(body).map_err(|e| {
            metrics::record_registration("invalid_input");
            StsError::from(e)
        })?;

        let username = credential.username.clone();
        let replaced = self.store.register(credential);
        metrics::record_registration("accepted");
        info!(username = %username, replaced, "Credential registered");
        Ok(())
    }

    /// Check a username/password pair and issue a token for it.
    ///
    /// Unknown users and wrong passwords both yield [`StsError::Unauthorized`].
    ///
    /// # Errors
    ///
    /// [`StsError::InvalidInput`], [`StsError::Unauthorized`] or
    /// [`StsError::SigningFailure`].
    pub fn authenticate(&self, body: &[u8]) -> Result<IssuedToken, StsError> {
        let request: LoginRequest = serde_json::from_slice(body).map_err(|e| {
            metrics::record_authentication("invalid_input");
            StsError::from(e)
        })?;

        // The lock is released before signing.
        let stored = self.store.lookup(&request.username);
        let credential = match stored {
            Some(c) if c.password_matches(&request.password) => c,
            _ => {
                metrics::record_authentication("unauthorized");
                warn!(username = %request.username, "Authentication rejected");
                return Err(StsError::Unauthorized);
            }
        };

        let issued = self.issuer.issue(&credential).map_err(|e| {
            metrics::record_authentication("signing_failure");
            e
        })?;

        metrics::record_authentication("success");
        info!(username = %credential.username, "Token issued");
        Ok(issued)
    }

    /// Verify a token issued by this service and return its claims.
    ///
    /// # Errors
    ///
    /// [`StsError::JwtDecodingError`] for bad signatures, wrong issuer or expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, StsError> {
        self.issuer
            .serializer()
            .deserialize(token, self.keys.decoding_key(), self.issuer.issuer())
    }
}

impl std::fmt::Debug for StsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StsService")
            .field("keys", &self.keys)
            .field("users", &self.store.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtAlgorithm;

    const PKCS1_KEY: &str = include_str!("../tests/fixtures/signing_key.pem");

    fn service() -> StsService {
        let keys = KeyMaterial::from_pem(PKCS1_KEY.as_bytes(), JwtAlgorithm::RS256).unwrap();
        StsService::from_config(keys, &Config::default())
    }

    #[test]
    fn test_register_and_login() {
        let sts = service();
        sts.register_user(br#"{"username":"alice","password":"pw","role":"admin"}"#)
            .unwrap();

        let issued = sts
            .authenticate(br#"{"username":"alice","password":"pw"}"#)
            .unwrap();
        let claims = sts.verify(&issued.token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.iss, "sts-service");
    }

    #[test]
    fn test_malformed_register_body() {
        let sts = service();
        let err = sts.register_user(b"{not json").unwrap_err();
        assert!(matches!(err, StsError::InvalidInput(_)));
        assert!(sts.store().is_empty());
    }

    #[test]
    fn test_malformed_login_body() {
        let sts = service();
        let err = sts.authenticate(b"{not json").unwrap_err();
        assert!(matches!(err, StsError::InvalidInput(_)));

        let err = sts.authenticate(br#"{"username":"alice","password":42}"#).unwrap_err();
        assert!(matches!(err, StsError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let sts = service();
        sts.register_user(b"{}").unwrap();
        assert_eq!(sts.store().lookup("").unwrap().password, "");

        sts.register_user(br#"{"username":"v"}"#).unwrap();
        let issued = sts.authenticate(br#"{"username":"v"}"#).unwrap();
        assert_eq!(sts.verify(&issued.token).unwrap().sub, "v");

        let err = sts.authenticate(br#"{"username":"alice"}"#).unwrap_err();
        assert!(matches!(err, StsError::Unauthorized));
    }

    #[test]
    fn test_unknown_user_and_wrong_password_are_identical() {
        let sts = service();
        sts.register_user(br#"{"username":"bob","password":"right","role":"user"}"#)
            .unwrap();

        let unknown = sts
            .authenticate(br#"{"username":"nobody","password":"right"}"#)
            .unwrap_err();
        let wrong = sts
            .authenticate(br#"{"username":"bob","password":"wrong"}"#)
            .unwrap_err();

        assert!(matches!(unknown, StsError::Unauthorized));
        assert!(matches!(wrong, StsError::Unauthorized));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.code(), wrong.code());
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let sts = service();
        sts.register_user(br#"{"username":"carol","password":"pw","role":"user"}"#)
            .unwrap();
        let issued = sts
            .authenticate(br#"{"username":"carol","password":"pw"}"#)
            .unwrap();

        let (head, signature) = issued.token.rsplit_once('.').unwrap();
        let mut sig: Vec<char> = signature.chars().collect();
        sig[10] = if sig[10] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", head, sig.into_iter().collect::<String>());

        assert!(sts.verify(&tampered).is_err());
    }
}
