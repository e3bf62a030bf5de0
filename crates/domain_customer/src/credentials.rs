//! Credential hashing
//!
//! Thin wrapper around bcrypt so the rest of the system never touches
//! the hashing primitive directly.

use crate::error::CustomerError;

/// Hashes a plaintext password for storage
///
/// # Errors
///
/// Returns `CustomerError::Credential` if hashing fails.
pub fn hash_password(plain: &str) -> Result<String, CustomerError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST)
        .map_err(|e| CustomerError::Credential(e.to_string()))
}

/// Verifies a plaintext password against a stored hash
///
/// Verification failures (malformed hash) are treated as a
/// non-match rather than surfaced to the caller.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}
