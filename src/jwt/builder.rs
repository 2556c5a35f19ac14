use crate::jwt::claims::Claims;

pub struct JwtBuilder {
    issuer: String,
    subject: Option<String>,
    role: String,
    ttl_seconds: i64,
}

impl JwtBuilder {
    pub fn new(issuer: String) -> Self {
        JwtBuilder {
            issuer,
            subject: None,
            role: String::new(),
            ttl_seconds: 3600, // 1 hour default
        }
    }

    pub fn subject(mut self, subject: String) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn role(mut self, role: String) -> Self {
        self.role = role;
        self
    }

    pub fn ttl_seconds(mut self, ttl: i64) -> Self {
        self.ttl_seconds = ttl;
        self
    }

    pub fn build(self) -> Result<Claims, &'static str> {
        let subject = self.subject.ok_or("Subject is required")?;
        if self.ttl_seconds <= 0 {
            return Err("TTL must be positive");
        }

        Claims::new(self.issuer, subject, self.role, self.ttl_seconds)
            .ok_or("TTL overflows token expiry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let claims = JwtBuilder::new("issuer".to_string())
            .subject("user-123".to_string())
            .role("admin".to_string())
            .ttl_seconds(3600)
            .build()
            .unwrap();

        assert_eq!(claims.iss, "issuer");
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_builder_missing_subject() {
        let result = JwtBuilder::new("issuer".to_string()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_overflowing_ttl() {
        let result = JwtBuilder::new("issuer".to_string())
            .subject("u".to_string())
            .ttl_seconds(i64::MAX)
            .build();
        assert_eq!(result.unwrap_err(), "TTL overflows token expiry");
    }

    #[test]
    fn test_builder_rejects_non_positive_ttl() {
        let result = JwtBuilder::new("issuer".to_string())
            .subject("u".to_string())
            .ttl_seconds(0)
            .build();
        assert!(result.is_err());
    }
}
