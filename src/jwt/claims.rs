use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    // Standard JWT claims
    pub iss: String,
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,

    // Identity
    pub role: String,
}

impl Claims {
    /// Claims issued now. `None` if the expiry does not fit in an `i64`.
    pub fn new(issuer: String, subject: String, role: String, ttl_seconds: i64) -> Option<Self> {
        let now = chrono::Utc::now().timestamp();
        Self::issued_at(issuer, subject, role, now, ttl_seconds)
    }

    /// Claims anchored at an explicit issue time.
    pub fn issued_at(
        issuer: String,
        subject: String,
        role: String,
        now: i64,
        ttl_seconds: i64,
    ) -> Option<Self> {
        Some(Claims {
            iss: issuer,
            sub: subject,
            exp: now.checked_add(ttl_seconds)?,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
            role,
        })
    }
}
