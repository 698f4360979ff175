//! PostgreSQL storage layer and order workflow engine for marketd.
//!
//! This crate provides the stores the HTTP layer consumes (product catalog,
//! order ledger, user accounts, sessions) plus the [`OrderWorkflow`] engine
//! that turns a cart into a persisted order inside one all-or-nothing
//! transaction.
//!
//! All queries are runtime-checked (`sqlx::query` with `.bind`), so the crate
//! builds without a live `DATABASE_URL`. Operations that must participate in
//! the order transaction take a `&mut PgConnection` rather than the pool; the
//! workflow owns the `sqlx::Transaction` and threads it through.
//!
//! # Example
//!
//! ```ignore
//! use marketd_postgres::{connect, OrderWorkflow};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = connect("postgres://localhost/marketd").await?;
//!     marketd_postgres::migrate(&pool).await?;
//!     let workflow = OrderWorkflow::new(pool);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod order_ledger;
pub mod product_store;
pub mod session_store;
pub mod user_store;
pub mod workflow;

pub use order_ledger::OrderLedger;
pub use product_store::ProductStore;
pub use session_store::SessionStore;
pub use user_store::UserStore;
pub use workflow::OrderWorkflow;

use sqlx::postgres::PgPoolOptions;
pub use sqlx::PgPool;

/// Embedded migrations for the marketd schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connect to PostgreSQL with the pool settings the service expects.
///
/// # Errors
///
/// Returns the underlying sqlx error if the database is unreachable.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns the underlying migration error if the schema cannot be applied.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
