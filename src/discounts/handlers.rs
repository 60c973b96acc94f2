use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::discounts::types::{DiscountPreviewRequest, DiscountRequest, DiscountResult};
use crate::error::{ApiError, ErrorResponse};
use crate::response::ApiResponse;
use crate::AppState;

/// Preview the discounts the caller would get for a subtotal
#[utoipa::path(
    post,
    path = "/api/discounts/preview",
    tag = "discounts",
    request_body = DiscountPreviewRequest,
    responses(
        (status = 200, description = "Subtotal, applied discounts and total", body = DiscountResult),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn preview_discounts_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<DiscountPreviewRequest>,
) -> Result<Json<ApiResponse<DiscountResult>>, ApiError> {
    request.validate()?;

    let result = state
        .discount_service
        .calculate_order_discounts(DiscountRequest {
            user_id: user.user_id,
            subtotal: request.subtotal,
            use_points: request.use_points,
            applied_offer_ids: request.applied_offer_ids,
        })
        .await?;

    Ok(ApiResponse::ok(result))
}
