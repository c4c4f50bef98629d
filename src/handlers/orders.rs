use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::OrderService;
use crate::auth::{AdminUser, CurrentUser};
use crate::domain::order::{OrderLineView, OrderView, StatusUpdateView};
use crate::domain::status::OrderStatus;
use crate::errors::AppError;
use crate::infrastructure::DieselOrderStore;

pub type Service = OrderService<DieselOrderStore>;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    /// Free-form shipping address, stored verbatim.
    pub shipping_address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shipping_address: String,
    pub status: String,
    pub total: String,
    pub created_at: String,
    pub lines: Vec<OrderLineResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of PENDING, SHIPPED, DELIVERED, CANCELLED.
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusUpdateResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub total: String,
    pub created_at: String,
}

impl From<OrderLineView> for OrderLineResponse {
    fn from(view: OrderLineView) -> Self {
        Self {
            id: view.id,
            book_id: view.book_id,
            quantity: view.quantity,
            unit_price: view.unit_price.to_string(),
        }
    }
}

impl From<OrderView> for OrderResponse {
    fn from(view: OrderView) -> Self {
        Self {
            id: view.id,
            user_id: view.user_id,
            shipping_address: view.shipping_address,
            status: view.status.as_str().to_string(),
            total: view.total.to_string(),
            created_at: view.created_at.to_rfc3339(),
            lines: view.lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<StatusUpdateView> for StatusUpdateResponse {
    fn from(view: StatusUpdateView) -> Self {
        Self {
            id: view.id,
            user_id: view.user_id,
            status: view.status.as_str().to_string(),
            total: view.total.to_string(),
            created_at: view.created_at.to_rfc3339(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Converts the caller's cart into an order. The cart read, the order and
/// line inserts, and the cart clear all run in one database transaction.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Shopping cart is empty"),
        (status = 401, description = "Missing or malformed user identity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    service: web::Data<Service>,
    user: CurrentUser,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    if body.shipping_address.trim().is_empty() {
        return Err(AppError::Validation(
            "shipping_address must not be blank".to_string(),
        ));
    }

    let view = web::block(move || service.place_order(user.id, &body.shipping_address))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(view)))
}

/// GET /orders
///
/// Paginated order history for the caller, oldest first, lines included.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated order history", body = ListOrdersResponse),
        (status = 401, description = "Missing or malformed user identity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<Service>,
    user: CurrentUser,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);

    let result = web::block(move || service.list_orders(user.id, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// PATCH /orders/{id}
///
/// Administrative status update. Not scoped to an owner, and no transition
/// graph is enforced: any known status may replace any other.
#[utoipa::path(
    patch,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = StatusUpdateResponse),
        (status = 400, description = "Unknown status value"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_status(
    service: web::Data<Service>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = OrderStatus::from_str(&body.status).map_err(AppError::Validation)?;

    let view = web::block(move || service.update_status(order_id, status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(StatusUpdateResponse::from(view)))
}

/// GET /orders/{order_id}/items
///
/// Line items of one of the caller's orders. Someone else's order answers
/// 404, never 403, so order ids cannot be probed.
#[utoipa::path(
    get,
    path = "/orders/{order_id}/items",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Line items of the order", body = [OrderLineResponse]),
        (status = 401, description = "Missing or malformed user identity"),
        (status = 404, description = "Order not found or not visible"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_order_items(
    service: web::Data<Service>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let items = web::block(move || service.get_order_items(user.id, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<OrderLineResponse> = items.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// GET /orders/{order_id}/items/{item_id}
#[utoipa::path(
    get,
    path = "/orders/{order_id}/items/{item_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
        ("item_id" = Uuid, Path, description = "Order line UUID"),
    ),
    responses(
        (status = 200, description = "Single line item", body = OrderLineResponse),
        (status = 401, description = "Missing or malformed user identity"),
        (status = 404, description = "Order or item not found or not visible"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order_item(
    service: web::Data<Service>,
    user: CurrentUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (order_id, item_id) = path.into_inner();

    let item = web::block(move || service.get_order_item(user.id, order_id, item_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderLineResponse::from(item)))
}
