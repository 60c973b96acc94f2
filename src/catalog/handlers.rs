// HTTP handlers for catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthenticatedUser, Role};
use crate::catalog::models::{
    ArticleServicePrice, CalculatePriceRequest, CreateWeightTierRequest, PriceQuote, WeightPricingTier,
};
use crate::error::{ApiError, ErrorResponse};
use crate::response::ApiResponse;
use crate::AppState;

/// Quote one article under one service
#[utoipa::path(
    post,
    path = "/api/services/calculate-price",
    tag = "catalog",
    request_body = CalculatePriceRequest,
    responses(
        (status = 200, description = "Price quote", body = PriceQuote),
        (status = 400, description = "Incompatible service, missing weight tier or invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn calculate_price_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CalculatePriceRequest>,
) -> Result<Json<ApiResponse<PriceQuote>>, ApiError> {
    request.validate()?;
    let quote = state.catalog_service.calculate_price(request).await?;
    Ok(ApiResponse::ok(quote))
}

/// List every price row for an article
#[utoipa::path(
    get,
    path = "/api/articles/{article_id}/prices",
    tag = "catalog",
    params(("article_id" = Uuid, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Price rows", body = [ArticleServicePrice]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_article_prices_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(article_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ArticleServicePrice>>>, ApiError> {
    let prices = state.catalog_service.list_article_prices(article_id).await?;
    Ok(ApiResponse::ok(prices))
}

/// List the active weight tiers of a service type
#[utoipa::path(
    get,
    path = "/api/weight-pricing/{service_type_id}",
    tag = "catalog",
    params(("service_type_id" = Uuid, Path, description = "Service type ID")),
    responses(
        (status = 200, description = "Active tiers ordered by minimum weight", body = [WeightPricingTier]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_weight_tiers_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(service_type_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<WeightPricingTier>>>, ApiError> {
    let tiers = state.catalog_service.list_weight_tiers(service_type_id).await?;
    Ok(ApiResponse::ok(tiers))
}

/// Create a weight tier (admin)
#[utoipa::path(
    post,
    path = "/api/weight-pricing",
    tag = "catalog",
    request_body = CreateWeightTierRequest,
    responses(
        (status = 201, description = "Tier created", body = WeightPricingTier),
        (status = 400, description = "Invalid bounds or price", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 409, description = "Overlaps an active tier", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_weight_tier_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateWeightTierRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WeightPricingTier>>), ApiError> {
    user.require_any(Role::ADMINS)?;
    let tier = state.catalog_service.create_weight_tier(request).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(tier)))
}
