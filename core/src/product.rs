//! Products: catalog identity, pricing and stock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product.
///
/// `stock` is a non-negative unit count. Within this system it only ever
/// decreases through order placement; admin updates may set it freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Current unit price. Orders snapshot this at placement time.
    pub price: Decimal,
    /// Units available. Never negative.
    pub stock: i32,
    /// Optional category label.
    pub category: Option<String>,
    /// The admin user who created the product.
    pub user_id: Option<Uuid>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Initial stock count.
    pub stock: i32,
    /// Optional category label.
    pub category: Option<String>,
}

/// A partial product update. Only the present fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New unit price. Does not touch existing orders' snapshots.
    pub price: Option<Decimal>,
    /// New stock count.
    pub stock: Option<i32>,
    /// New category label.
    pub category: Option<String>,
}

impl ProductUpdate {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_detected() {
        assert!(ProductUpdate::default().is_empty());

        let update = ProductUpdate {
            price: Some(Decimal::new(999, 2)),
            ..ProductUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
