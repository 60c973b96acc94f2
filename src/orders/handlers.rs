// HTTP handlers for order endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthenticatedUser, Role};
use crate::error::{ApiError, ErrorResponse};
use crate::orders::{
    CompleteFlashOrderRequest, CreateFlashOrderRequest, CreateOrderRequest, OrderHistoryQuery, OrderResponse,
    PlacedOrderResponse, UpdateStatusRequest,
};
use crate::response::ApiResponse;
use crate::AppState;

/// Place an order for the authenticated user
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed in PENDING", body = PlacedOrderResponse),
        (status = 400, description = "Invalid request or incompatible service", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Not enough loyalty points", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_order_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlacedOrderResponse>>), ApiError> {
    request.validate()?;

    let placed = state.order_service.create_order(user.user_id, request).await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(placed)))
}

/// Order history of the authenticated user
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    params(OrderHistoryQuery),
    responses(
        (status = 200, description = "Orders, newest first", body = [OrderResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_order_history_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<OrderHistoryQuery>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, ApiError> {
    let orders = state
        .order_service
        .get_user_orders(user.user_id, query.status, query.include_drafts.unwrap_or(false))
        .await?;

    Ok(ApiResponse::ok(orders))
}

#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    tag = "orders",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = OrderResponse),
        (status = 403, description = "Order belongs to another user", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_order_by_id_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let order = state.order_service.get_order(order_id, &user).await?;
    Ok(ApiResponse::ok(order))
}

/// Move an order to its next status (staff)
#[utoipa::path(
    patch,
    path = "/api/orders/{order_id}/status",
    tag = "orders",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Transition not allowed", body = ErrorResponse),
        (status = 403, description = "Caller is not staff", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_order_status_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    user.require_any(Role::STAFF)?;

    let order = state
        .order_service
        .update_order_status(order_id, request.status)
        .await?;

    Ok(ApiResponse::ok(order))
}

/// Create a flash order from an address only
#[utoipa::path(
    post,
    path = "/api/orders/flash",
    tag = "orders",
    request_body = CreateFlashOrderRequest,
    responses(
        (status = 201, description = "Draft flash order", body = OrderResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_flash_order_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateFlashOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), ApiError> {
    request.validate()?;

    let order = state.order_service.create_flash_order(user.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok_with_message(order, "Flash order created; pricing will follow"),
    ))
}

/// Flash orders awaiting completion (staff)
#[utoipa::path(
    get,
    path = "/api/orders/flash",
    tag = "orders",
    responses(
        (status = 200, description = "Draft flash orders, oldest first", body = [OrderResponse]),
        (status = 403, description = "Caller is not staff", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_flash_orders_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, ApiError> {
    user.require_any(Role::STAFF)?;
    let orders = state.order_service.list_flash_orders().await?;
    Ok(ApiResponse::ok(orders))
}

/// Price a draft flash order and move it to PENDING (admin)
#[utoipa::path(
    patch,
    path = "/api/orders/flash/{order_id}/complete",
    tag = "orders",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = CompleteFlashOrderRequest,
    responses(
        (status = 200, description = "Order completed", body = OrderResponse),
        (status = 400, description = "Order is not a draft, has no items, or input is invalid", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn complete_flash_order_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    Json(request): Json<CompleteFlashOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    user.require_any(Role::ADMINS)?;

    let order = state
        .order_service
        .complete_flash_order(order_id, request)
        .await?;

    Ok(ApiResponse::ok_with_message(order, "Flash order completed"))
}
