//! User account storage.

use marketd_core::error::UserError;
use marketd_core::user::{NewUser, Role, User, UserAuth};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL-backed user accounts.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    /// Create a new user store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a user. Email is stored lowercase; role defaults to `user`.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::EmailTaken`] or [`UserError::UsernameTaken`] when
    /// the respective unique constraint fires, or [`UserError::Storage`] on
    /// any other persistence failure.
    pub async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(
            r"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, 'user')
            RETURNING id, username, email, role, created_at
            ",
        )
        .bind(&user.username)
        .bind(user.email.to_lowercase())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return match db_err.constraint() {
                        Some("users_username_key") => UserError::UsernameTaken,
                        _ => UserError::EmailTaken,
                    };
                }
            }
            storage(e)
        })?;

        tracing::info!(username = %user.username, "User registered");

        row_to_user(&row).map_err(storage)
    }

    /// Whether an email address is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Storage`] on persistence failure.
    pub async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.to_lowercase())
            .fetch_one(&self.pool)
            .await
            .map_err(storage)
    }

    /// Whether a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Storage`] on persistence failure.
    pub async fn username_exists(&self, username: &str) -> Result<bool, UserError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)
    }

    /// Look up a user and their password hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Storage`] on persistence failure.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAuth>, UserError> {
        let row = sqlx::query(
            r"
            SELECT id, username, email, role, password_hash, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref()
            .map(|row| {
                Ok(UserAuth {
                    user: row_to_user(row)?,
                    password_hash: row.try_get("password_hash")?,
                })
            })
            .transpose()
            .map_err(storage)
    }

    /// Fetch a user's public profile by id.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Storage`] on persistence failure.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            "SELECT id, username, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref()
            .map(row_to_user)
            .transpose()
            .map_err(storage)
    }
}

/// Convert a database row to a [`User`].
fn row_to_user(row: &PgRow) -> Result<User, sqlx::Error> {
    let role_str: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        role: Role::parse(&role_str),
        created_at: row.try_get("created_at")?,
    })
}

fn storage(err: sqlx::Error) -> UserError {
    UserError::Storage(err.to_string())
}
