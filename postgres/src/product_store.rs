//! Product catalog storage.
//!
//! Read/list/create/update run against the pool. The two operations that must
//! join the order transaction, [`ProductStore::get_by_id`] and
//! [`ProductStore::decrement_stock_if_available`], are associated functions
//! taking the caller's connection, so the workflow can thread its transaction
//! through them.

use marketd_core::error::ProductError;
use marketd_core::page::{Page, PageRequest};
use marketd_core::product::{NewProduct, Product, ProductUpdate};
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, stock, category, user_id, created_at, updated_at";

/// PostgreSQL-backed product catalog.
#[derive(Clone)]
pub struct ProductStore {
    pool: PgPool,
}

impl ProductStore {
    /// Create a new product store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read a product inside the caller's transaction.
    ///
    /// Used by the workflow's validation pass so that the price and stock it
    /// sees belong to the same transaction that will mutate them.
    ///
    /// # Errors
    ///
    /// Returns the underlying sqlx error; the caller classifies it.
    pub async fn get_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Product>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        row.as_ref().map(row_to_product).transpose()
    }

    /// Atomically decrement stock, only if enough remains.
    ///
    /// This is a single conditional `UPDATE`, not a read-then-write pair:
    /// under concurrent placements the row lock makes the re-check and the
    /// decrement one indivisible step. Returns `false` when the condition
    /// failed, i.e. stock was no longer sufficient.
    ///
    /// # Errors
    ///
    /// Returns the underlying sqlx error; the caller classifies it.
    pub async fn decrement_stock_if_available(
        conn: &mut PgConnection,
        id: Uuid,
        quantity: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET stock = stock - $1, updated_at = now()
            WHERE id = $2 AND stock >= $1
            ",
        )
        .bind(quantity)
        .bind(id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Read a product's current stock inside the caller's transaction.
    ///
    /// # Errors
    ///
    /// Returns the underlying sqlx error; the caller classifies it.
    pub async fn stock_of(conn: &mut PgConnection, id: Uuid) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Fetch a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::NotFound`] if no such product exists, or
    /// [`ProductError::Storage`] on persistence failure.
    pub async fn fetch(&self, id: Uuid) -> Result<Product, ProductError> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref()
            .map(row_to_product)
            .transpose()
            .map_err(storage)?
            .ok_or(ProductError::NotFound)
    }

    /// Create a product owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::Storage`] on persistence failure.
    pub async fn create(&self, owner: Uuid, product: NewProduct) -> Result<Product, ProductError> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO products (name, description, price, stock, category, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(storage)?;

        tracing::info!(product = %product.name, owner = %owner, "Product created");

        row_to_product(&row).map_err(storage)
    }

    /// Apply a partial update. Only the present fields change; absent fields
    /// keep their current values.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::NoFieldsToUpdate`] for an empty update,
    /// [`ProductError::NotFound`] if the product does not exist, or
    /// [`ProductError::Storage`] on persistence failure.
    pub async fn update(&self, id: Uuid, update: ProductUpdate) -> Result<Product, ProductError> {
        if update.is_empty() {
            return Err(ProductError::NoFieldsToUpdate);
        }

        let row = sqlx::query(&format!(
            r"
            UPDATE products
            SET name        = COALESCE($1, name),
                description = COALESCE($2, description),
                price       = COALESCE($3, price),
                stock       = COALESCE($4, stock),
                category    = COALESCE($5, category),
                updated_at  = now()
            WHERE id = $6
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(update.stock)
        .bind(&update.category)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref()
            .map(row_to_product)
            .transpose()
            .map_err(storage)?
            .ok_or(ProductError::NotFound)
    }

    /// List products, newest first, optionally filtered by a name search.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::Storage`] on persistence failure.
    pub async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Product>, ProductError> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        let (total, rows) = if let Some(pattern) = &pattern {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE name ILIKE $1")
                .bind(pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(storage)?;

            let rows = sqlx::query(&format!(
                r"
                SELECT {PRODUCT_COLUMNS} FROM products
                WHERE name ILIKE $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "
            ))
            .bind(pattern)
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

            (total, rows)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
                .fetch_one(&self.pool)
                .await
                .map_err(storage)?;

            let rows = sqlx::query(&format!(
                r"
                SELECT {PRODUCT_COLUMNS} FROM products
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                "
            ))
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

            (total, rows)
        };

        let items = rows
            .iter()
            .map(row_to_product)
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage)?;

        Ok(Page::new(items, page, total))
    }
}

/// Convert a database row to a [`Product`].
fn row_to_product(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        stock: row.try_get("stock")?,
        category: row.try_get("category")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn storage(err: sqlx::Error) -> ProductError {
    ProductError::Storage(err.to_string())
}
