//! Authentication extractors.
//!
//! Protected handlers take [`AuthUser`] or [`AdminUser`] as an argument; the
//! extractor resolves the `Authorization: Bearer` token to a live session.
//! Tokens are opaque; only their SHA-256 digest is ever compared against
//! storage.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use marketd_auth::hash_token;
use marketd_core::user::{Role, User};

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated user behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// An authenticated user that must hold the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await.map(Self)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::forbidden(
                "Access denied",
                vec!["Admin access required".to_string()],
            ));
        }
        Ok(Self(user))
    }
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<User, AppError> {
    let token = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::unauthorized("Access denied", vec!["No token provided".to_string()])
        })?;

    state
        .sessions
        .find_user(&hash_token(token))
        .await?
        .ok_or_else(|| {
            AppError::unauthorized("Access denied", vec!["Invalid or expired token".to_string()])
        })
}
