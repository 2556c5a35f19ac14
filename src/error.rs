use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StsError {
    #[error("Signing key not found in any candidate path: {}", display_paths(.candidates))]
    KeyNotFound { candidates: Vec<PathBuf> },

    #[error("Invalid signing key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Token signing failed: {0}")]
    SigningFailure(String),

    #[error("JWT decoding error: {0}")]
    JwtDecodingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StsError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKeyFormat(msg.into())
    }

    pub fn signing(msg: impl Into<String>) -> Self {
        Self::SigningFailure(msg.into())
    }

    /// Stable machine-readable code for responses and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::KeyNotFound { .. } => STS_KEY_NOT_FOUND,
            Self::InvalidKeyFormat(_) => STS_INVALID_KEY_FORMAT,
            Self::InvalidInput(_) => STS_INVALID_INPUT,
            Self::Unauthorized => STS_UNAUTHORIZED,
            Self::SigningFailure(_) => STS_SIGNING_FAILURE,
            Self::JwtDecodingError(_) => STS_INVALID_TOKEN,
            Self::ConfigError(_) => STS_CONFIG_ERROR,
        }
    }

    /// Errors that must stop the process before the listener is bound.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound { .. } | Self::InvalidKeyFormat(_) | Self::ConfigError(_)
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<serde_json::Error> for StsError {
    fn from(err: serde_json::Error) -> Self {
        StsError::InvalidInput(err.to_string())
    }
}

// Error codes for HTTP responses
pub const STS_KEY_NOT_FOUND: &str = "STS_KEY_NOT_FOUND";
pub const STS_INVALID_KEY_FORMAT: &str = "STS_INVALID_KEY_FORMAT";
pub const STS_INVALID_INPUT: &str = "STS_INVALID_INPUT";
pub const STS_UNAUTHORIZED: &str = "STS_UNAUTHORIZED";
pub const STS_SIGNING_FAILURE: &str = "STS_SIGNING_FAILURE";
pub const STS_INVALID_TOKEN: &str = "STS_INVALID_TOKEN";
pub const STS_CONFIG_ERROR: &str = "STS_CONFIG_ERROR";
