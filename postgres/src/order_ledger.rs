//! Durable storage of order headers and order line items.
//!
//! The ledger is strictly append/update: headers are inserted once, lines are
//! inserted once and never touched again, and `status` is the only column
//! that changes after creation. The insert operations take the caller's
//! connection so they run inside the workflow's transaction.

use marketd_core::error::OrderError;
use marketd_core::order::{NewOrderLine, Order, OrderItem, OrderStatus};
use marketd_core::page::PageRequest;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

const ORDER_COLUMNS: &str = "id, user_id, description, total_price, status, created_at, updated_at";

/// PostgreSQL-backed order ledger.
#[derive(Clone)]
pub struct OrderLedger {
    pool: PgPool,
}

impl OrderLedger {
    /// Create a new order ledger over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an order header inside the caller's transaction.
    ///
    /// The order starts in `pending` status with the frozen `total`.
    ///
    /// # Errors
    ///
    /// Returns the underlying sqlx error; the caller classifies it.
    pub async fn insert_order(
        conn: &mut PgConnection,
        user_id: Uuid,
        description: &str,
        total: rust_decimal::Decimal,
    ) -> Result<Order, sqlx::Error> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO orders (user_id, description, total_price, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(user_id)
        .bind(description)
        .bind(total)
        .fetch_one(conn)
        .await?;

        row_to_order(&row)
    }

    /// Append the order's lines inside the caller's transaction.
    ///
    /// Each line records the snapshotted unit price read during validation.
    ///
    /// # Errors
    ///
    /// Returns the underlying sqlx error; the caller classifies it.
    pub async fn insert_lines(
        conn: &mut PgConnection,
        order_id: Uuid,
        lines: &[NewOrderLine],
    ) -> Result<(), sqlx::Error> {
        for line in lines {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Fetch an order header by id.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn get_header(&self, id: Uuid) -> Result<Option<Order>, OrderError> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(OrderError::storage)?;

        row.as_ref()
            .map(row_to_order)
            .transpose()
            .map_err(OrderError::storage)
    }

    /// Fetch an order's lines, each enriched with the product's *current*
    /// name for display. Prices are the stored snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn lines_for(&self, order_id: Uuid) -> Result<Vec<OrderItem>, OrderError> {
        let rows = sqlx::query(
            r"
            SELECT oi.product_id, p.name AS product_name, oi.quantity, oi.unit_price,
                   (oi.quantity * oi.unit_price) AS total_price
            FROM order_items oi
            JOIN products p ON oi.product_id = p.id
            WHERE oi.order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(OrderError::storage)?;

        rows.iter()
            .map(row_to_item)
            .collect::<Result<Vec<_>, _>>()
            .map_err(OrderError::storage)
    }

    /// Set an order's status. Returns `None` when the order does not exist
    /// or already sits in a terminal status.
    ///
    /// The terminal guard is part of the `UPDATE` itself, not a prior read:
    /// under concurrent updates the row lock makes the check and the write
    /// one indivisible step, so a transition out of `delivered` or
    /// `cancelled` can never commit.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, OrderError> {
        let row = sqlx::query(&format!(
            r"
            UPDATE orders
            SET status = $1, updated_at = now()
            WHERE id = $2 AND status NOT IN ('delivered', 'cancelled')
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(status.as_str())
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(OrderError::storage)?;

        row.as_ref()
            .map(row_to_order)
            .transpose()
            .map_err(OrderError::storage)
    }

    /// Count orders owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn count_for_user(&self, user_id: Uuid) -> Result<i64, OrderError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(OrderError::storage)
    }

    /// Count all orders.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn count_all(&self) -> Result<i64, OrderError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(OrderError::storage)
    }

    /// List one page of a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(user_id)
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(OrderError::storage)?;

        rows.iter()
            .map(row_to_order)
            .collect::<Result<Vec<_>, _>>()
            .map_err(OrderError::storage)
    }

    /// List one page of all orders with owner identity, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn list_all(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(Order, String, String)>, OrderError> {
        let rows = sqlx::query(
            r"
            SELECT o.id, o.user_id, o.description, o.total_price, o.status,
                   o.created_at, o.updated_at, u.username, u.email
            FROM orders o
            JOIN users u ON o.user_id = u.id
            ORDER BY o.created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(OrderError::storage)?;

        rows.iter()
            .map(|row| {
                let order = row_to_order(row)?;
                let username: String = row.try_get("username")?;
                let email: String = row.try_get("email")?;
                Ok((order, username, email))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(OrderError::storage)
    }
}

/// Convert a database row to an [`Order`].
fn row_to_order(row: &PgRow) -> Result<Order, sqlx::Error> {
    let status_str: String = row.try_get("status")?;
    let status = OrderStatus::parse(&status_str)
        .map_err(|e| sqlx::Error::Decode(e.to_string().into()))?;

    Ok(Order {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        description: row.try_get("description")?,
        total_price: row.try_get("total_price")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Convert a joined row to an [`OrderItem`].
fn row_to_item(row: &PgRow) -> Result<OrderItem, sqlx::Error> {
    Ok(OrderItem {
        product_id: row.try_get("product_id")?,
        product_name: row.try_get("product_name")?,
        quantity: row.try_get("quantity")?,
        unit_price: row.try_get("unit_price")?,
        total_price: row.try_get("total_price")?,
    })
}
