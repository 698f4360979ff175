//! Domain types for the marketd commerce backend.
//!
//! This crate holds the pure domain model shared by the storage layer and the
//! HTTP layer: products, orders and their line items, users, pagination, and
//! the error taxonomy. It performs no I/O.
//!
//! Money is represented as [`rust_decimal::Decimal`] throughout, a fixed-point
//! decimal that maps to Postgres `NUMERIC` rather than floating point, so
//! totals and snapshotted unit prices carry no rounding drift.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod order;
pub mod page;
pub mod product;
pub mod user;

// Re-export key types for convenience
pub use error::{OrderError, ProductError, UserError};
pub use order::{CartLine, NewOrderLine, Order, OrderDetail, OrderItem, OrderStatus, OwnedOrderDetail};
pub use page::{Page, PageError, PageRequest};
pub use product::{NewProduct, Product, ProductUpdate};
pub use user::{NewUser, Role, User, UserAuth};
