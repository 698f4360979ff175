//! Users and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Authorization role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    User,
    /// Administrative actor: manages products and order statuses.
    Admin,
}

impl Role {
    /// Convert role to its database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a role from its string representation. Unknown strings fall
    /// back to [`Role::User`]; roles are written only by this system.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's public profile. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: Uuid,
    /// Unique username.
    pub username: String,
    /// Unique email address, stored lowercase.
    pub email: String,
    /// Authorization role.
    pub role: Role,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Fields for registering a user. The password arrives already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Unique email address; lowercased before storage.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
}

/// A user profile paired with its password hash, for credential checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAuth {
    /// The public profile.
    pub user: User,
    /// Stored password hash.
    pub password_hash: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        assert_eq!(Role::parse(Role::Admin.as_str()), Role::Admin);
        assert_eq!(Role::parse(Role::User.as_str()), Role::User);
    }

    #[test]
    fn unknown_role_falls_back_to_user() {
        assert_eq!(Role::parse("superuser"), Role::User);
    }
}
