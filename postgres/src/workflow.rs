//! The order workflow engine.
//!
//! [`OrderWorkflow::place_order`] is the one hard path in the system: it
//! validates a multi-line cart against live stock, computes the frozen total,
//! persists the order with its lines, and decrements inventory, all inside a
//! single transaction. Failure precedence is structural validation, then
//! existence, then stock; the first failing line wins and nothing is
//! persisted.
//!
//! The engine owns the `sqlx::Transaction` and threads its connection through
//! the store calls. Every early return drops the transaction, which rolls it
//! back; commit happens on exactly one path, after the last stock decrement
//! succeeds.

use marketd_core::error::OrderError;
use marketd_core::order::{
    order_description, CartLine, NewOrderLine, OrderDetail, OrderItem, OrderStatus,
    OwnedOrderDetail,
};
use marketd_core::page::{Page, PageRequest};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::order_ledger::OrderLedger;
use crate::product_store::ProductStore;

/// Orchestrates cart validation, pricing, persistence and stock mutation.
///
/// Constructed with an explicit pool (no ambient connection state); clone is
/// cheap and shares the pool.
#[derive(Clone)]
pub struct OrderWorkflow {
    pool: PgPool,
    ledger: OrderLedger,
}

impl OrderWorkflow {
    /// Create a workflow engine over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let ledger = OrderLedger::new(pool.clone());
        Self { pool, ledger }
    }

    /// Place an order for `user_id` from the given cart.
    ///
    /// Runs the validation ladder inside one transaction, short-circuiting at
    /// the first failure:
    ///
    /// 1. non-empty cart with positive quantities,
    /// 2. every referenced product exists (in cart order),
    /// 3. every line's quantity is covered by current stock,
    ///
    /// then inserts the header and lines with prices snapshotted from the
    /// validation read, and finally issues one atomic conditional decrement
    /// per line. A decrement that affects zero rows means a concurrent order
    /// depleted the stock after validation; the whole transaction is aborted
    /// with [`OrderError::InsufficientStock`].
    ///
    /// # Errors
    ///
    /// Any variant of [`OrderError`] from the ladder above, or
    /// [`OrderError::Storage`] for unexpected persistence failures. On every
    /// error path the transaction is rolled back; no order, line, or stock
    /// change is ever partially applied.
    pub async fn place_order(
        &self,
        user_id: Uuid,
        cart: &[CartLine],
    ) -> Result<OrderDetail, OrderError> {
        if cart.is_empty() {
            metrics::counter!("orders.rejected", "reason" => "empty_cart").increment(1);
            return Err(OrderError::EmptyCart);
        }
        if let Some(line) = cart.iter().find(|line| line.quantity < 1) {
            metrics::counter!("orders.rejected", "reason" => "bad_quantity").increment(1);
            return Err(OrderError::NonPositiveQuantity {
                product_id: line.product_id,
            });
        }

        let mut tx = self.pool.begin().await.map_err(OrderError::storage)?;

        // Existence pass, in input order. Prices and names read here are the
        // snapshot the rest of the placement uses; stock is re-checked by the
        // conditional decrement below.
        let mut validated = Vec::with_capacity(cart.len());
        for line in cart {
            let product = ProductStore::get_by_id(&mut *tx, line.product_id)
                .await
                .map_err(OrderError::storage)?
                .ok_or(OrderError::ProductNotFound {
                    product_id: line.product_id,
                })?;
            validated.push((product, line.quantity));
        }

        // Stock pass against the values just read.
        for (product, quantity) in &validated {
            if product.stock < *quantity {
                metrics::counter!("orders.rejected", "reason" => "insufficient_stock")
                    .increment(1);
                return Err(OrderError::InsufficientStock {
                    product_id: product.id,
                    available: product.stock,
                    requested: *quantity,
                });
            }
        }

        // Totals from the validation read; no re-read.
        let mut total = Decimal::ZERO;
        let mut lines = Vec::with_capacity(validated.len());
        let mut items = Vec::with_capacity(validated.len());
        for (product, quantity) in &validated {
            let line_total = product.price * Decimal::from(*quantity);
            total += line_total;
            lines.push(NewOrderLine {
                product_id: product.id,
                quantity: *quantity,
                unit_price: product.price,
            });
            items.push(OrderItem {
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: *quantity,
                unit_price: product.price,
                total_price: line_total,
            });
        }

        let order = OrderLedger::insert_order(
            &mut *tx,
            user_id,
            &order_description(cart.len()),
            total,
        )
        .await
        .map_err(OrderError::storage)?;

        OrderLedger::insert_lines(&mut *tx, order.id, &lines)
            .await
            .map_err(OrderError::storage)?;

        // The concurrency-safety linchpin: one atomic conditional decrement
        // per line. Zero rows affected means a concurrent placement won the
        // race since our validation read; abort the whole order.
        for line in &lines {
            let decremented =
                ProductStore::decrement_stock_if_available(&mut *tx, line.product_id, line.quantity)
                    .await
                    .map_err(OrderError::storage)?;

            if !decremented {
                let available = ProductStore::stock_of(&mut *tx, line.product_id)
                    .await
                    .map_err(OrderError::storage)?
                    .unwrap_or(0);
                metrics::counter!("orders.rejected", "reason" => "insufficient_stock")
                    .increment(1);
                return Err(OrderError::InsufficientStock {
                    product_id: line.product_id,
                    available,
                    requested: line.quantity,
                });
            }
        }

        tx.commit().await.map_err(OrderError::storage)?;

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            lines = lines.len(),
            total = %order.total_price,
            "Order placed"
        );
        metrics::counter!("orders.placed").increment(1);

        Ok(OrderDetail::from_parts(order, items))
    }

    /// Fetch one order with its lines, enforcing ownership.
    ///
    /// # Errors
    ///
    /// [`OrderError::NotFound`] if no such order exists,
    /// [`OrderError::Forbidden`] if it belongs to another user, or
    /// [`OrderError::Storage`] on persistence failure.
    pub async fn get_order(
        &self,
        order_id: Uuid,
        user_id: Uuid,
    ) -> Result<OrderDetail, OrderError> {
        let order = self
            .ledger
            .get_header(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if order.user_id != user_id {
            return Err(OrderError::Forbidden);
        }

        let items = self.ledger.lines_for(order_id).await?;
        Ok(OrderDetail::from_parts(order, items))
    }

    /// List one page of a user's orders, newest first, with line items.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn list_orders_for_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<OrderDetail>, OrderError> {
        let total = self.ledger.count_for_user(user_id).await?;
        let headers = self.ledger.list_for_user(user_id, page).await?;

        let mut details = Vec::with_capacity(headers.len());
        for order in headers {
            let items = self.ledger.lines_for(order.id).await?;
            details.push(OrderDetail::from_parts(order, items));
        }

        Ok(Page::new(details, page, total))
    }

    /// List one page of all orders across users (administrative), newest
    /// first, each row carrying the owner's username and email.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] on persistence failure.
    pub async fn list_all_orders(
        &self,
        page: PageRequest,
    ) -> Result<Page<OwnedOrderDetail>, OrderError> {
        let total = self.ledger.count_all().await?;
        let rows = self.ledger.list_all(page).await?;

        let mut details = Vec::with_capacity(rows.len());
        for (order, username, email) in rows {
            let items = self.ledger.lines_for(order.id).await?;
            details.push(OwnedOrderDetail {
                order: OrderDetail::from_parts(order, items),
                username,
                email,
            });
        }

        Ok(Page::new(details, page, total))
    }

    /// Update an order's status (administrative).
    ///
    /// Transitions out of the terminal statuses `delivered` and `cancelled`
    /// are rejected; anything else is permitted. The guard is the conditional
    /// `UPDATE` itself, so two concurrent updates cannot interleave a read of
    /// pre-terminal state with a write out of a terminal one.
    ///
    /// # Errors
    ///
    /// [`OrderError::NotFound`] if the order does not exist,
    /// [`OrderError::TerminalStatus`] for a transition out of a terminal
    /// status, or [`OrderError::Storage`] on persistence failure.
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<OrderDetail, OrderError> {
        let Some(updated) = self.ledger.update_status(order_id, new_status).await? else {
            // Zero rows: the order is missing, or the guard refused a
            // terminal row. A follow-up read tells the two apart.
            let current = self
                .ledger
                .get_header(order_id)
                .await?
                .ok_or(OrderError::NotFound)?;
            if current.status.is_terminal() {
                return Err(OrderError::TerminalStatus {
                    from: current.status,
                });
            }
            return Err(OrderError::storage("status update affected no rows"));
        };

        tracing::info!(
            order_id = %order_id,
            to = %new_status,
            "Order status updated"
        );

        let items = self.ledger.lines_for(order_id).await?;
        Ok(OrderDetail::from_parts(updated, items))
    }
}
