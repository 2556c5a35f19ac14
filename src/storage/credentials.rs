//! In-memory credential registry.
//!
//! Passwords are held and compared as plaintext. There is no hashing here;
//! anything beyond a development deployment needs a real password store.

use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::HashMap;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A registered user.
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl Credential {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    /// Exact-match password check without early exit on the first differing byte.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        let stored = self.password.as_bytes();
        let candidate = candidate.as_bytes();
        if stored.len() != candidate.len() {
            return false;
        }
        stored.ct_eq(candidate).into()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Username to credential map behind a single lock.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: Mutex<HashMap<String, Credential>>,
}

impl CredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `credential.username`.
    /// Returns `true` when an existing record was replaced.
    pub fn register(&self, credential: Credential) -> bool {
        let username = credential.username.clone();
        self.users.lock().insert(username, credential).is_some()
    }

    #[must_use]
    pub fn lookup(&self, username: &str) -> Option<Credential> {
        self.users.lock().get(username).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_lookup() {
        let store = CredentialStore::new();
        assert!(!store.register(Credential::new("alice", "pw", "admin")));

        let found = store.lookup("alice").unwrap();
        assert_eq!(found.password, "pw");
        assert_eq!(found.role, "admin");
    }

    #[test]
    fn test_lookup_missing_does_not_create() {
        let store = CredentialStore::new();
        assert!(store.lookup("ghost").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let store = CredentialStore::new();
        store.register(Credential::new("bob", "first", "user"));
        assert!(store.register(Credential::new("bob", "second", "admin")));

        let found = store.lookup("bob").unwrap();
        assert_eq!(found.password, "second");
        assert_eq!(found.role, "admin");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_password_matches_exactly() {
        let cred = Credential::new("carol", "s3cret", "user");
        assert!(cred.password_matches("s3cret"));
        assert!(!cred.password_matches("s3cre"));
        assert!(!cred.password_matches("s3cret "));
        assert!(!cred.password_matches("S3CRET"));
        assert!(!cred.password_matches(""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let cred = Credential::new("dave", "hunter2", "user");
        let dbg = format!("{cred:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("dave"));
    }

    #[test]
    fn test_role_defaults_to_empty() {
        let cred: Credential =
            serde_json::from_str(r#"{"username":"erin","password":"pw"}"#).unwrap();
        assert_eq!(cred.role, "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let cred: Credential = serde_json::from_str(r#"{"username":"erin"}"#).unwrap();
        assert_eq!(cred.password, "");

        let cred: Credential = serde_json::from_str("{}").unwrap();
        assert_eq!(cred, Credential::new("", "", ""));
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let result: Result<Credential, _> =
            serde_json::from_str(r#"{"username":"erin","password":7}"#);
        assert!(result.is_err());
    }
}
