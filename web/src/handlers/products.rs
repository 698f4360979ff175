//! Product catalog endpoints.
//!
//! Listing and fetching are public; creation and updates require the admin
//! role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketd_core::page::PageRequest;
use marketd_core::product::{NewProduct, Product, ProductUpdate};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::AdminUser;
use crate::response::{ApiResponse, PagedResponse};
use crate::state::AppState;

/// Query string of `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Page size; defaults to 10, capped at 100.
    pub limit: Option<u32>,
    /// Case-insensitive name filter.
    pub search: Option<String>,
}

/// List products, newest first, optionally filtered by name.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<PagedResponse<Product>>, AppError> {
    let page = PageRequest::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
    )?;
    let products = state.products.list(page, query.search.as_deref()).await?;

    Ok(Json(PagedResponse::from_page(
        "Products retrieved successfully",
        products,
    )))
}

/// Fetch one product by id.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let product = state.products.fetch(id).await?;
    Ok(Json(ApiResponse::ok(
        "Product retrieved successfully",
        product,
    )))
}

/// Create a product (admin only).
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(product): Json<NewProduct>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), AppError> {
    let product = state.products.create(admin.id, product).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Product created successfully", product)),
    ))
}

/// Apply a partial product update (admin only).
pub async fn update(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let product = state.products.update(id, update).await?;
    Ok(Json(ApiResponse::ok(
        "Product updated successfully",
        product,
    )))
}
