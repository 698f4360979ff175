//! HTTP layer for the marketd commerce backend.
//!
//! Routes, handlers, authentication extractors and the response envelope
//! live here. The layer is thin on purpose: handlers translate HTTP into
//! calls on the stores and the order workflow engine, and translate domain
//! errors back into enveloped JSON with the right status code. No business
//! rule is enforced in this crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;
