//! Password hashing (Argon2id, PHC string format).
use std::sync::LazyLock;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};

use crate::services::auth::error::AuthError;

const SALT_LEN: usize = 16;

/// Hash `plain` with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    getrandom::fill(&mut salt_bytes).map_err(|e| AuthError::HashingFailure(e.to_string()))?;

    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::HashingFailure(e.to_string()))?;

    let digest = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AuthError::HashingFailure(e.to_string()))?
        .to_string();

    Ok(digest)
}

/// Check `plain` against a stored digest.
///
/// An unparsable digest is a mismatch, not an error.
pub fn verify_password(digest: &str, plain: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

// Same parameters as real digests, so verifying against it costs the same.
static DUMMY_DIGEST: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("no account has this password").ok());

/// Full Argon2 verify against a throwaway digest; always `false`.
///
/// For callers with no stored digest (unknown email) that must not answer
/// faster than a wrong password would.
pub fn verify_without_account(plain: &str) -> bool {
    match DUMMY_DIGEST.as_deref() {
        Some(digest) => {
            let _ = verify_password(digest, plain);
        }
        None => tracing::warn!("dummy password digest unavailable"),
    }
    false
}
