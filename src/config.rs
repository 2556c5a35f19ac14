//! Centralized configuration for the Secure Token Service.
//!
//! All configuration is loaded from environment variables and validated
//! at startup.

use crate::error::StsError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Candidate key locations tried when `STS_KEY_PATHS` is unset: the
/// container mount first, then development-relative paths.
pub const DEFAULT_KEY_PATHS: [&str; 3] = [
    "/keys/sts_privada.pem",
    "../keys/sts_privada.pem",
    "./keys/sts_privada.pem",
];

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// JWT signing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JwtAlgorithm {
    /// RSA PKCS#1 v1.5 with SHA-256
    RS256,
    /// RSA-PSS with SHA-256
    PS256,
}

impl JwtAlgorithm {
    /// Parse algorithm from string.
    pub fn parse(s: &str) -> Result<Self, StsError> {
        match s.to_uppercase().as_str() {
            "RS256" => Ok(Self::RS256),
            "PS256" => Ok(Self::PS256),
            _ => Err(StsError::config(format!("Invalid JWT algorithm: {}", s))),
        }
    }

    /// Get algorithm name for JWT header.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RS256 => "RS256",
            Self::PS256 => "PS256",
        }
    }

    #[must_use]
    pub const fn to_jsonwebtoken(self) -> jsonwebtoken::Algorithm {
        match self {
            Self::RS256 => jsonwebtoken::Algorithm::RS256,
            Self::PS256 => jsonwebtoken::Algorithm::PS256,
        }
    }
}

/// Secure Token Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Server settings
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    // Key bootstrap
    /// Ordered candidate paths for the PEM private key
    pub key_paths: Vec<PathBuf>,
    /// Pause before exiting when the signing key cannot be loaded
    pub startup_failure_delay: Duration,

    // JWT settings
    /// JWT issuer claim
    pub jwt_issuer: String,
    /// JWT signing algorithm
    pub jwt_algorithm: JwtAlgorithm,
    /// Token lifetime
    pub token_ttl: Duration,

    // Lifecycle and logging
    /// Graceful shutdown budget
    pub shutdown_timeout: Duration,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            key_paths: DEFAULT_KEY_PATHS.iter().map(PathBuf::from).collect(),
            startup_failure_delay: Duration::from_secs(10),
            jwt_issuer: "sts-service".to_string(),
            jwt_algorithm: JwtAlgorithm::RS256,
            token_ttl: Duration::from_secs(3600),
            shutdown_timeout: Duration::from_secs(30),
            log_level: "info".to_string(),
            log_json: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, StsError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let key_paths = match env::var("STS_KEY_PATHS") {
            Ok(raw) => parse_path_list(&raw),
            Err(_) => defaults.key_paths,
        };

        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT", defaults.port)?,
            key_paths,
            startup_failure_delay: Duration::from_secs(parse_env(
                "STARTUP_FAILURE_DELAY",
                defaults.startup_failure_delay.as_secs(),
            )?),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or(defaults.jwt_issuer),
            jwt_algorithm: match env::var("JWT_ALGORITHM") {
                Ok(alg) => JwtAlgorithm::parse(&alg)?,
                Err(_) => defaults.jwt_algorithm,
            },
            token_ttl: Duration::from_secs(parse_env("TOKEN_TTL", defaults.token_ttl.as_secs())?),
            shutdown_timeout: Duration::from_secs(parse_env(
                "SHUTDOWN_TIMEOUT",
                defaults.shutdown_timeout.as_secs(),
            )?),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: parse_env("LOG_JSON", defaults.log_json)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), StsError> {
        if self.port == 0 {
            return Err(StsError::config("PORT must be between 1 and 65535"));
        }
        if self.key_paths.is_empty() {
            return Err(StsError::config("STS_KEY_PATHS must name at least one path"));
        }
        if self.token_ttl.is_zero() {
            return Err(StsError::config("TOKEN_TTL must be greater than 0"));
        }
        if self.token_ttl > MAX_TOKEN_TTL {
            return Err(StsError::config(format!(
                "TOKEN_TTL must not exceed {} seconds",
                MAX_TOKEN_TTL.as_secs()
            )));
        }
        if self.jwt_issuer.trim().is_empty() {
            return Err(StsError::config("JWT_ISSUER must not be empty"));
        }
        Ok(())
    }

    /// Socket address string for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse environment variable with default value.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, StsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| StsError::config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated path list, preserving order and dropping blanks.
fn parse_path_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_algorithm_parsing() {
        assert_eq!(JwtAlgorithm::parse("RS256").unwrap(), JwtAlgorithm::RS256);
        assert_eq!(JwtAlgorithm::parse("rs256").unwrap(), JwtAlgorithm::RS256);
        assert_eq!(JwtAlgorithm::parse("PS256").unwrap(), JwtAlgorithm::PS256);
        assert!(JwtAlgorithm::parse("HS256").is_err());
    }

    #[test]
    fn test_jwt_algorithm_as_str() {
        assert_eq!(JwtAlgorithm::RS256.as_str(), "RS256");
        assert_eq!(JwtAlgorithm::PS256.as_str(), "PS256");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_issuer, "sts-service");
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.key_paths[0], PathBuf::from("/keys/sts_privada.pem"));
        assert_eq!(config.key_paths.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_path_list_preserves_order() {
        let paths = parse_path_list(" /a.pem, ,./b.pem,../c.pem ");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/a.pem"),
                PathBuf::from("./b.pem"),
                PathBuf::from("../c.pem")
            ]
        );
    }

    #[test]
    fn test_validate_rejects_empty_paths_and_zero_ttl() {
        let config = Config {
            key_paths: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            token_ttl: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_token_ttl() {
        let config = Config {
            token_ttl: MAX_TOKEN_TTL,
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        for secs in [MAX_TOKEN_TTL.as_secs() + 1, i64::MAX as u64 - 10, u64::MAX] {
            let config = Config {
                token_ttl: Duration::from_secs(secs),
                ..Config::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, StsError::ConfigError(_)));
            assert!(err.is_fatal());
        }
    }
}
