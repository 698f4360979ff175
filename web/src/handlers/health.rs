//! Liveness endpoint.

use axum::http::StatusCode;

/// Report that the service is up.
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
