use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::catalog::CatalogError;
use crate::discounts::DiscountError;
use crate::error::ApiError;
use crate::loyalty::LoyaltyError;

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Order not found")]
    NotFound(Uuid),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    InvalidOrderState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Discount(#[from] DiscountError),

    #[error(transparent)]
    Loyalty(#[from] LoyaltyError),
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Database(e) => ApiError::DatabaseError(e),
            OrderError::NotFound(id) => ApiError::not_found("Order", id),
            OrderError::Forbidden(msg) => ApiError::Forbidden(msg),
            OrderError::InvalidTransition(msg) => ApiError::bad_request("INVALID_TRANSITION", msg),
            OrderError::InvalidOrderState(msg) => ApiError::bad_request("INVALID_ORDER_STATE", msg),
            OrderError::Validation(msg) => ApiError::bad_request("VALIDATION_ERROR", msg),
            OrderError::Catalog(e) => e.into(),
            OrderError::Discount(e) => e.into(),
            OrderError::Loyalty(e) => e.into(),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
