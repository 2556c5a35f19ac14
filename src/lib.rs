//! Secure Token Service library.
//!
//! Loads an RSA signing key at startup, keeps an in-memory credential
//! registry and issues RS256 JWTs that verifiers check against the
//! published public key.

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod jwt;
pub mod keys;
pub mod metrics;
pub mod service;
pub mod shutdown;
pub mod storage;
pub mod telemetry;

// Re-exports for convenience
pub use config::Config;
pub use error::StsError;
pub use service::StsService;
