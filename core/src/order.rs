//! Orders, order lines and the order status lifecycle.
//!
//! An order is created exactly once, atomically, by the workflow engine. Its
//! total price and its lines' unit prices are frozen snapshots taken at order
//! time; later product price changes never touch them. Status is the only
//! field mutated after creation, and only by an administrative actor.

use crate::error::OrderError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, awaiting confirmation.
    Pending,
    /// Confirmed by an administrator.
    Confirmed,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer. Terminal.
    Delivered,
    /// Cancelled. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Convert status to its database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidStatus`] if the string is not one of the
    /// five defined statuses.
    pub fn parse(s: &str) -> Result<Self, OrderError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(OrderError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }

    /// Whether this status admits no further transitions. The storage
    /// layer's conditional status update enforces the same rule in SQL.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One caller-supplied cart entry: a product and a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product to order.
    #[serde(rename = "productId")]
    pub product_id: Uuid,
    /// Units requested. Must be positive.
    pub quantity: i32,
}

/// An order header as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Auto-generated description, e.g. `"Order with 2 item(s)"`.
    pub description: String,
    /// Frozen sum of `quantity * unit_price` over the order's lines.
    pub total_price: Decimal,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time (status updates only).
    pub updated_at: DateTime<Utc>,
}

/// A line to append to the ledger during order placement.
///
/// `unit_price` is the price read during validation: the snapshot that the
/// ledger freezes, independent of later product price changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewOrderLine {
    /// Referenced product.
    pub product_id: Uuid,
    /// Units ordered.
    pub quantity: i32,
    /// Unit price at the instant of order creation.
    pub unit_price: Decimal,
}

/// An order line enriched for display.
///
/// `product_name` is the product's *current* name, joined at read time; only
/// the prices are snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Referenced product.
    pub product_id: Uuid,
    /// Current product name.
    pub product_name: String,
    /// Units ordered.
    pub quantity: i32,
    /// Snapshotted unit price.
    pub unit_price: Decimal,
    /// `quantity * unit_price`.
    pub total_price: Decimal,
}

/// A full order view: header plus its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    /// Order identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Auto-generated description.
    pub description: String,
    /// Frozen order total.
    pub total_price: Decimal,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Line items, enriched with current product names.
    pub items: Vec<OrderItem>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl OrderDetail {
    /// Assemble a detail view from a header and its items.
    #[must_use]
    pub fn from_parts(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            description: order.description,
            total_price: order.total_price,
            status: order.status,
            items,
            created_at: order.created_at,
        }
    }
}

/// An order view for administrative listings, carrying the owner's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedOrderDetail {
    /// The order itself.
    #[serde(flatten)]
    pub order: OrderDetail,
    /// Owner's username.
    pub username: String,
    /// Owner's email address.
    pub email: String,
}

/// The description auto-generated for a newly placed order.
#[must_use]
pub fn order_description(line_count: usize) -> String {
    format!("Order with {line_count} item(s)")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn status_roundtrip() {
        for status in &[
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let parsed = OrderStatus::parse(status.as_str()).expect("valid status should parse");
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn status_rejects_unknown_values() {
        let err = OrderStatus::parse("refunded").unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidStatus {
                value: "refunded".to_string()
            }
        );
    }

    #[test]
    fn only_delivered_and_cancelled_are_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Confirmed.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }

    #[test]
    fn cart_line_uses_camel_case_product_id() {
        let line: CartLine =
            serde_json::from_str(r#"{"productId":"00000000-0000-0000-0000-000000000000","quantity":2}"#)
                .unwrap();
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn description_counts_lines() {
        assert_eq!(order_description(1), "Order with 1 item(s)");
        assert_eq!(order_description(3), "Order with 3 item(s)");
    }

    #[test]
    fn detail_assembles_from_parts() {
        let order = Order {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: order_description(1),
            total_price: Decimal::new(2000, 2),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let items = vec![OrderItem {
            product_id: Uuid::new_v4(),
            product_name: "Widget".to_string(),
            quantity: 2,
            unit_price: Decimal::new(1000, 2),
            total_price: Decimal::new(2000, 2),
        }];
        let detail = OrderDetail::from_parts(order.clone(), items);
        assert_eq!(detail.id, order.id);
        assert_eq!(detail.total_price, order.total_price);
        assert_eq!(detail.items.len(), 1);
    }
}
