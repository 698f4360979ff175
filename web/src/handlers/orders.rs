//! Order endpoints.
//!
//! Placement and per-order reads enforce ownership through the workflow
//! engine; the cross-user listing and status updates require the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketd_core::order::{CartLine, OrderDetail, OrderStatus, OwnedOrderDetail};
use marketd_core::page::PageRequest;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{AdminUser, AuthUser};
use crate::response::{ApiResponse, PagedResponse};
use crate::state::AppState;

/// Body of `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    /// The cart: product references with quantities.
    pub items: Vec<CartLine>,
}

/// Pagination query string for order listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Page size; defaults to 10, capped at 100.
    pub limit: Option<u32>,
}

impl ListOrdersQuery {
    fn page_request(&self) -> Result<PageRequest, AppError> {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
        )
        .map_err(Into::into)
    }
}

/// Body of `PUT /orders/:id/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// The new status, as its lowercase string form.
    pub status: String,
}

/// Place an order from the caller's cart.
pub async fn place(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderDetail>>), AppError> {
    let detail = state.workflow.place_order(user.id, &req.items).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Order created successfully", detail)),
    ))
}

/// List the caller's orders, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<PagedResponse<OrderDetail>>, AppError> {
    let page = query.page_request()?;
    let orders = state.workflow.list_orders_for_user(user.id, page).await?;

    Ok(Json(PagedResponse::from_page(
        "Orders retrieved successfully",
        orders,
    )))
}

/// Fetch one of the caller's orders. Ownership applies to every caller,
/// admins included.
pub async fn get_one(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderDetail>>, AppError> {
    let detail = state.workflow.get_order(id, user.id).await?;
    Ok(Json(ApiResponse::ok("Order retrieved successfully", detail)))
}

/// Update an order's status (admin only).
pub async fn update_status(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<OrderDetail>>, AppError> {
    let status = OrderStatus::parse(&req.status)?;
    let detail = state.workflow.update_order_status(id, status).await?;
    Ok(Json(ApiResponse::ok(
        "Order status updated successfully",
        detail,
    )))
}

/// List all orders across users with owner identity (admin only).
pub async fn list_all(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<PagedResponse<OwnedOrderDetail>>, AppError> {
    let page = query.page_request()?;
    let orders = state.workflow.list_all_orders(page).await?;

    Ok(Json(PagedResponse::from_page(
        "Orders retrieved successfully",
        orders,
    )))
}
