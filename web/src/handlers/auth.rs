//! Registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use marketd_auth::{hash_password, issue_token, validate, verify_password};
use marketd_core::error::UserError;
use marketd_core::user::{NewUser, User};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Body of `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before it touches storage.
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Registered email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginData {
    /// The opaque bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user's profile.
    pub user: User,
}

/// Register a new user account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let violations = validate::validate_registration(&req.username, &req.email, &req.password);
    if !violations.is_empty() {
        return Err(AppError::bad_request("Validation failed", violations));
    }

    // Friendly duplicate checks up front; the unique constraints still
    // backstop the race.
    if state.users.email_exists(&req.email).await? {
        return Err(UserError::EmailTaken.into());
    }
    if state.users.username_exists(&req.username).await? {
        return Err(UserError::UsernameTaken.into());
    }

    let password_hash = hash_password(&req.password)?;
    let user = state
        .users
        .create(NewUser {
            username: req.username,
            email: req.email,
            password_hash,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User registered successfully", user)),
    ))
}

/// Authenticate and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, AppError> {
    let rejected =
        || AppError::unauthorized("Login failed", vec!["Invalid credentials".to_string()]);

    let auth = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(rejected)?;

    if !verify_password(&req.password, &auth.password_hash)? {
        return Err(rejected());
    }

    let issued = issue_token();
    state
        .sessions
        .create(auth.user.id, &issued.token_hash, state.session_ttl)
        .await?;

    // Opportunistic reaping; a failure here must not fail the login.
    if let Err(err) = state.sessions.delete_expired().await {
        tracing::debug!(error = %err, "Expired session reaping failed");
    }

    tracing::info!(user_id = %auth.user.id, "User logged in");

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginData {
            token: issued.token,
            user: auth.user,
        },
    )))
}
