use axum::{extract::State, Json};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::loyalty::LoyaltyBalanceResponse;
use crate::response::ApiResponse;
use crate::AppState;

/// Caller's loyalty points balance
#[utoipa::path(
    get,
    path = "/api/loyalty/balance",
    tag = "loyalty",
    responses(
        (status = 200, description = "Current balance", body = LoyaltyBalanceResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_balance_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<LoyaltyBalanceResponse>>, ApiError> {
    let points_balance = state.loyalty_repo.get_balance(user.user_id).await?;
    Ok(ApiResponse::ok(LoyaltyBalanceResponse {
        user_id: user.user_id,
        points_balance,
    }))
}
