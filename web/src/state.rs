//! Shared application state.

use chrono::Duration;
use marketd_postgres::{OrderWorkflow, PgPool, ProductStore, SessionStore, UserStore};

/// State shared by every handler. Clone is cheap; the stores share one pool.
#[derive(Clone)]
pub struct AppState {
    /// The order workflow engine.
    pub workflow: OrderWorkflow,
    /// Product catalog storage.
    pub products: ProductStore,
    /// User account storage.
    pub users: UserStore,
    /// Bearer-token session storage.
    pub sessions: SessionStore,
    /// How long issued sessions stay valid.
    pub session_ttl: Duration,
}

impl AppState {
    /// Build the state over one connection pool.
    #[must_use]
    pub fn new(pool: PgPool, session_ttl: Duration) -> Self {
        Self {
            workflow: OrderWorkflow::new(pool.clone()),
            products: ProductStore::new(pool.clone()),
            users: UserStore::new(pool.clone()),
            sessions: SessionStore::new(pool),
            session_ttl,
        }
    }
}
