pub mod diagnostics;
pub mod jwk;
pub mod loader;
pub mod material;

pub use jwk::{Jwk, Jwks};
pub use loader::{resolve, FsKeySource, KeySource, LoadedKey, MemoryKeySource};
pub use material::{KeyMaterial, PublicKeyRecord};

use crate::config::JwtAlgorithm;
use crate::error::StsError;
use crate::metrics;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolve and parse the signing key. Returns the material and the path it came from.
///
/// # Errors
///
/// [`StsError::KeyNotFound`] or [`StsError::InvalidKeyFormat`]; both are fatal
/// to startup.
pub fn bootstrap<S, P>(
    candidates: &[P],
    source: &S,
    algorithm: JwtAlgorithm,
) -> Result<(KeyMaterial, PathBuf), StsError>
where
    S: KeySource + ?Sized,
    P: AsRef<Path>,
{
    let result = resolve(candidates, source).and_then(|loaded| {
        let material = KeyMaterial::from_pem(&loaded.bytes, algorithm)?;
        Ok((material, loaded.path))
    });

    match &result {
        Ok((material, path)) => {
            metrics::record_key_load("success");
            info!(path = %path.display(), kid = %material.key_id(), "Signing key ready");
        }
        Err(e) => metrics::record_key_load(e.code()),
    }

    result
}
