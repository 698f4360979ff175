//! Argon2 password hashing.

use crate::error::AuthError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a password with argon2id and a fresh random salt.
///
/// The returned string is in PHC format and embeds the salt and parameters,
/// so it is self-contained for later verification.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if the hashing backend fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash.
///
/// # Errors
///
/// Returns [`AuthError::MalformedHash`] if the stored hash cannot be parsed.
/// A wrong password is not an error; it returns `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::MalformedHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("Correct-horse-9").unwrap();
        assert!(verify_password("Correct-horse-9", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Correct-horse-9").unwrap();
        let b = hash_password("Correct-horse-9").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_rejected() {
        assert_eq!(
            verify_password("anything", "not-a-phc-hash"),
            Err(AuthError::MalformedHash)
        );
    }
}
