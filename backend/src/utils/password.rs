//! Password hashing for stored credentials.
//!
//! Digests are bcrypt strings, so the salt and cost travel with the hash and
//! verification needs nothing but the stored value. bcrypt only reads the
//! first 72 bytes of its input; longer passwords are refused rather than
//! truncated. Hashing runs on the blocking pool to keep runtime workers free.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{BcryptError, DEFAULT_COST, non_truncating_hash, non_truncating_verify};

/// Longest password bcrypt can digest without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes a plaintext password before it is stored.
///
/// # Errors
/// Returns `ServiceError::InternalError` if bcrypt fails, including for a
/// password longer than `MAX_PASSWORD_BYTES`
pub async fn hash_password(password: &str) -> ServiceResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || non_truncating_hash(&password, DEFAULT_COST))
        .await
        .map_err(|e| ServiceError::internal_error(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

/// Checks a plaintext password against a stored digest.
///
/// A digest that cannot be parsed never matches, and neither does a password
/// longer than `MAX_PASSWORD_BYTES`.
pub async fn verify_password(password: &str, digest: &str) -> bool {
    let password = password.to_owned();
    let digest = digest.to_owned();
    let outcome =
        tokio::task::spawn_blocking(move || non_truncating_verify(&password, &digest)).await;

    match outcome {
        Ok(Ok(matches)) => matches,
        Ok(Err(BcryptError::Truncation(_))) => false,
        Ok(Err(e)) => {
            tracing::warn!("Stored password digest could not be verified: {}", e);
            false
        }
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            false
        }
    }
}
