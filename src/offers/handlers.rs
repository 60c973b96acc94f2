// HTTP handlers for offer endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, Role};
use crate::error::{ApiError, ErrorResponse};
use crate::offers::models::{CreateOfferRequest, Offer, ToggleOfferStatusRequest};
use crate::offers::service::validate_offer;
use crate::response::ApiResponse;
use crate::AppState;

/// Offers currently available to customers
#[utoipa::path(
    get,
    path = "/api/offers",
    tag = "offers",
    responses(
        (status = 200, description = "Active offers inside their date window", body = [Offer]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_offers_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Offer>>>, ApiError> {
    let offers = state.offer_service.list_available_offers(Utc::now()).await?;
    Ok(ApiResponse::ok(offers))
}

#[utoipa::path(
    get,
    path = "/api/offers/{id}",
    tag = "offers",
    params(("id" = Uuid, Path, description = "Offer ID")),
    responses(
        (status = 200, description = "Offer", body = Offer),
        (status = 404, description = "Offer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_offer_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Offer>>, ApiError> {
    let offer = state.offer_service.get_offer(id).await?;
    Ok(ApiResponse::ok(offer))
}

/// Create an offer (admin)
#[utoipa::path(
    post,
    path = "/api/offers",
    tag = "offers",
    request_body = CreateOfferRequest,
    responses(
        (status = 201, description = "Offer created", body = Offer),
        (status = 400, description = "Invalid offer", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_offer_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOfferRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Offer>>), ApiError> {
    user.require_any(Role::ADMINS)?;
    validate_offer(&request)?;
    let offer = state.offer_service.create_offer(request).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(offer)))
}

/// Activate or deactivate an offer (admin)
#[utoipa::path(
    patch,
    path = "/api/offers/{id}/status",
    tag = "offers",
    params(("id" = Uuid, Path, description = "Offer ID")),
    request_body = ToggleOfferStatusRequest,
    responses(
        (status = 200, description = "Offer updated", body = Offer),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Offer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_offer_status_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ToggleOfferStatusRequest>,
) -> Result<Json<ApiResponse<Offer>>, ApiError> {
    user.require_any(Role::ADMINS)?;
    let offer = state.offer_service.toggle_offer_status(id, request.is_active).await?;
    Ok(ApiResponse::ok(offer))
}
