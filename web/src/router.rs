//! Route table.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, health, orders, products};
use crate::state::AppState;

/// Build the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get_one).put(products::update),
        )
        .route("/orders", post(orders::place).get(orders::list_mine))
        .route("/orders/:id", get(orders::get_one))
        .route("/orders/:id/status", put(orders::update_status))
        .route("/admin/orders", get(orders::list_all))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
