//! Opaque bearer tokens.
//!
//! Tokens are 32 random bytes, handed to the client as URL-safe base64. Only
//! the SHA-256 digest of the token is stored server-side, so a leaked
//! sessions table cannot be replayed.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes behind each token.
const TOKEN_BYTES: usize = 32;

/// A freshly issued token and the digest to store for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// The secret handed to the client. Never stored.
    pub token: String,
    /// SHA-256 digest of the token, for the sessions table.
    pub token_hash: String,
}

/// Issue a new opaque bearer token.
#[must_use]
pub fn issue_token() -> IssuedToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    let token = URL_SAFE_NO_PAD.encode(bytes);
    let token_hash = hash_token(&token);
    IssuedToken { token, token_hash }
}

/// Digest a client-supplied token for session lookup.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn issued_hash_matches_recomputed_hash() {
        let issued = issue_token();
        assert_eq!(issued.token_hash, hash_token(&issued.token));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(issue_token().token, issue_token().token);
    }

    #[test]
    fn token_is_url_safe() {
        let issued = issue_token();
        assert!(issued
            .token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
