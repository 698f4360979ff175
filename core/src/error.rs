//! Error taxonomy for the marketd domain.
//!
//! Each enum covers one concern. Domain failures are always returned as typed
//! results and recovered at the workflow boundary; only unexpected storage
//! errors surface as the `Storage` variants, which the HTTP layer converts to
//! a generic 500 without leaking detail.

use crate::order::OrderStatus;
use thiserror::Error;
use uuid::Uuid;

/// Failures from order placement, lookup, listing and status updates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The submitted cart contained no lines.
    #[error("Order must contain at least one item")]
    EmptyCart,

    /// A cart line carried a non-positive quantity.
    #[error("Quantity must be at least 1 for product {product_id}")]
    NonPositiveQuantity {
        /// The offending cart line's product.
        product_id: Uuid,
    },

    /// A cart line referenced a product that does not exist.
    #[error("Product not found: {product_id}")]
    ProductNotFound {
        /// The missing product.
        product_id: Uuid,
    },

    /// A cart line asked for more units than the product has in stock.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        /// The product that ran short.
        product_id: Uuid,
        /// Units in stock when the check ran.
        available: i32,
        /// Units the cart asked for.
        requested: i32,
    },

    /// The requested order does not exist.
    #[error("Order does not exist")]
    NotFound,

    /// The order exists but belongs to another user.
    #[error("You can only view your own orders")]
    Forbidden,

    /// The supplied status string is not one of the five defined statuses.
    #[error("Invalid order status: {value}")]
    InvalidStatus {
        /// The rejected input.
        value: String,
    },

    /// The order is in a terminal status and admits no further transitions.
    #[error("Order status {from} is terminal and cannot change")]
    TerminalStatus {
        /// The current, terminal status.
        from: OrderStatus,
    },

    /// Unexpected persistence failure; the transaction was rolled back.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl OrderError {
    /// Wrap an underlying persistence error as a storage failure.
    #[must_use]
    pub fn storage<E: std::fmt::Display>(err: E) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Failures from product creation, update and listing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product does not exist.
    #[error("Product does not exist")]
    NotFound,

    /// A partial update carried no fields at all.
    #[error("Provide at least one field to update")]
    NoFieldsToUpdate,

    /// Unexpected persistence failure.
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Failures from user registration and lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    /// The email address is already registered.
    #[error("Email already registered")]
    EmailTaken,

    /// The username is already registered.
    #[error("Username already registered")]
    UsernameTaken,

    /// Unexpected persistence failure.
    #[error("Storage failure: {0}")]
    Storage(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_the_numbers() {
        let id = Uuid::nil();
        let err = OrderError::InsufficientStock {
            product_id: id,
            available: 5,
            requested: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("available 5"));
        assert!(msg.contains("requested 10"));
    }

    #[test]
    fn storage_wraps_display() {
        let err = OrderError::storage("connection reset");
        assert_eq!(err, OrderError::Storage("connection reset".to_string()));
    }
}
