//! Password hashing and bearer-token issuance for marketd.
//!
//! This crate is deliberately small: it covers exactly the mechanical pieces
//! the HTTP layer needs to establish an acting user identity: argon2
//! password hashes, opaque session tokens stored as SHA-256 digests, and the
//! registration input checks. Authentication *protocol* design (OAuth, OIDC,
//! WebAuthn) is out of scope.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod password;
pub mod token;
pub mod validate;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use token::{hash_token, issue_token, IssuedToken};
