//! Domain-error to HTTP translation.
//!
//! Every handler returns `Result<_, AppError>`; the `From` impls below are
//! the single place where domain failures pick their status code and their
//! envelope wording. Storage failures are logged here and surface to clients
//! as a generic 500 with no internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use marketd_auth::AuthError;
use marketd_core::error::{OrderError, ProductError, UserError};
use marketd_core::page::PageError;

use crate::response::ApiResponse;

/// An HTTP-ready error: status code plus the failure envelope's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    status: StatusCode,
    message: String,
    errors: Vec<String>,
}

impl AppError {
    fn new(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors,
        }
    }

    /// A 400 with the given envelope content.
    #[must_use]
    pub fn bad_request(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, errors)
    }

    /// A 401 with the given envelope content.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message, errors)
    }

    /// A 403 with the given envelope content.
    #[must_use]
    pub fn forbidden(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message, errors)
    }

    /// The generic 500. Callers log the cause before constructing this;
    /// clients only ever see the generic wording.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            vec!["An unexpected error occurred".to_string()],
        )
    }

    /// The response status this error will produce.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ApiResponse::failure(self.message, self.errors);
        (self.status, Json(body)).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match &err {
            OrderError::EmptyCart
            | OrderError::NonPositiveQuantity { .. }
            | OrderError::InsufficientStock { .. } => {
                Self::bad_request("Order creation failed", vec![err.to_string()])
            }
            OrderError::ProductNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                "Order creation failed",
                vec![err.to_string()],
            ),
            OrderError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                "Order not found",
                vec![err.to_string()],
            ),
            OrderError::Forbidden => Self::forbidden("Access denied", vec![err.to_string()]),
            OrderError::InvalidStatus { .. } | OrderError::TerminalStatus { .. } => {
                Self::bad_request("Order status update failed", vec![err.to_string()])
            }
            OrderError::Storage(detail) => {
                tracing::error!(error = %detail, "Order storage failure");
                Self::internal()
            }
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match &err {
            ProductError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                "Product not found",
                vec![err.to_string()],
            ),
            ProductError::NoFieldsToUpdate => {
                Self::bad_request("Product update failed", vec![err.to_string()])
            }
            ProductError::Storage(detail) => {
                tracing::error!(error = %detail, "Product storage failure");
                Self::internal()
            }
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::EmailTaken | UserError::UsernameTaken => {
                Self::bad_request("Registration failed", vec![err.to_string()])
            }
            UserError::Storage(detail) => {
                tracing::error!(error = %detail, "User storage failure");
                Self::internal()
            }
        }
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        Self::bad_request("Invalid pagination parameters", vec![err.to_string()])
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        tracing::error!(error = %err, "Credential handling failure");
        Self::internal()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn cart_failures_are_bad_requests() {
        assert_eq!(
            AppError::from(OrderError::EmptyCart).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(OrderError::InsufficientStock {
                product_id: Uuid::nil(),
                available: 1,
                requested: 2,
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_product_in_cart_is_not_found() {
        let err = AppError::from(OrderError::ProductNotFound {
            product_id: Uuid::nil(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn ownership_violation_is_forbidden() {
        assert_eq!(
            AppError::from(OrderError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn storage_failures_hide_detail() {
        let err = AppError::from(OrderError::Storage("connection reset".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.errors.iter().any(|e| e.contains("connection reset")));
    }

    #[test]
    fn pagination_errors_are_bad_requests() {
        assert_eq!(
            AppError::from(PageError::PageTooSmall).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
