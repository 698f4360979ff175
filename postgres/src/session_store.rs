//! Bearer-token sessions.
//!
//! Sessions hold only the SHA-256 digest of the token the client carries.
//! Expired rows are ignored on lookup and reaped opportunistically; there is
//! no background worker.

use chrono::{Duration, Utc};
use marketd_core::error::UserError;
use marketd_core::user::{Role, User};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL-backed session storage.
#[derive(Clone)]
pub struct SessionStore {
    pool: PgPool,
}

impl SessionStore {
    /// Create a new session store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a session for `user_id` expiring after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Storage`] on persistence failure.
    pub async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        ttl: Duration,
    ) -> Result<(), UserError> {
        sqlx::query(
            r"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(Utc::now() + ttl)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        Ok(())
    }

    /// Resolve a token digest to its user, if the session is still live.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Storage`] on persistence failure.
    pub async fn find_user(&self, token_hash: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r"
            SELECT u.id, u.username, u.email, u.role, u.created_at
            FROM sessions s
            JOIN users u ON s.user_id = u.id
            WHERE s.token_hash = $1 AND s.expires_at > now()
            ",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.map(|row| {
            let role_str: String = row.try_get("role")?;
            Ok(User {
                id: row.try_get("id")?,
                username: row.try_get("username")?,
                email: row.try_get("email")?,
                role: Role::parse(&role_str),
                created_at: row.try_get("created_at")?,
            })
        })
        .transpose()
        .map_err(|e: sqlx::Error| storage(e))
    }

    /// Delete expired sessions. Returns the number of rows reaped.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Storage`] on persistence failure.
    pub async fn delete_expired(&self) -> Result<u64, UserError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() > 0 {
            tracing::debug!(reaped = result.rows_affected(), "Expired sessions deleted");
        }

        Ok(result.rows_affected())
    }
}

fn storage(err: sqlx::Error) -> UserError {
    UserError::Storage(err.to_string())
}
