// HTTP handlers for manual pricing overrides (admin only)

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, Role};
use crate::error::{ApiError, ErrorResponse};
use crate::order_pricing::calculator::PricingChange;
use crate::order_pricing::models::{OrderPricingResponse, PaymentFlagRequest, UpdatePricingRequest};
use crate::response::ApiResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/orders/{order_id}/pricing",
    tag = "pricing",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Original, manual and display price", body = OrderPricingResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_pricing_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderPricingResponse>>, ApiError> {
    user.require_any(Role::ADMINS)?;
    let pricing = state.pricing_service.get_pricing(order_id).await?;
    Ok(ApiResponse::ok(pricing))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{order_id}/pricing",
    tag = "pricing",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = UpdatePricingRequest,
    responses(
        (status = 200, description = "Pricing updated", body = OrderPricingResponse),
        (status = 400, description = "Negative manual price", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_pricing_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdatePricingRequest>,
) -> Result<Json<ApiResponse<OrderPricingResponse>>, ApiError> {
    user.require_any(Role::ADMINS)?;

    let change = PricingChange::Update(request);
    change
        .validate()
        .map_err(|msg| ApiError::bad_request("VALIDATION_ERROR", msg))?;

    let pricing = state.pricing_service.apply(order_id, user.user_id, change).await?;
    Ok(ApiResponse::ok_with_message(pricing, "Pricing updated"))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{order_id}/pricing/manual-price",
    tag = "pricing",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Manual price removed", body = OrderPricingResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn reset_manual_price_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderPricingResponse>>, ApiError> {
    user.require_any(Role::ADMINS)?;
    let pricing = state
        .pricing_service
        .apply(order_id, user.user_id, PricingChange::ResetManualPrice)
        .await?;
    Ok(ApiResponse::ok_with_message(pricing, "Manual price reset"))
}

#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/pricing/mark-paid",
    tag = "pricing",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = PaymentFlagRequest,
    responses(
        (status = 200, description = "Order marked as paid", body = OrderPricingResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_paid_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    body: Option<Json<PaymentFlagRequest>>,
) -> Result<Json<ApiResponse<OrderPricingResponse>>, ApiError> {
    user.require_any(Role::ADMINS)?;
    let reason = body.and_then(|Json(b)| b.reason);
    let pricing = state
        .pricing_service
        .apply(order_id, user.user_id, PricingChange::MarkPaid { reason })
        .await?;
    Ok(ApiResponse::ok_with_message(pricing, "Order marked as paid"))
}

#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/pricing/mark-unpaid",
    tag = "pricing",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = PaymentFlagRequest,
    responses(
        (status = 200, description = "Order marked as unpaid", body = OrderPricingResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_unpaid_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    body: Option<Json<PaymentFlagRequest>>,
) -> Result<Json<ApiResponse<OrderPricingResponse>>, ApiError> {
    user.require_any(Role::ADMINS)?;
    let reason = body.and_then(|Json(b)| b.reason);
    let pricing = state
        .pricing_service
        .apply(order_id, user.user_id, PricingChange::MarkUnpaid { reason })
        .await?;
    Ok(ApiResponse::ok_with_message(pricing, "Order marked as unpaid"))
}
