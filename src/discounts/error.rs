use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::loyalty::LoyaltyError;
use crate::offers::OfferError;

/// Error types for discount calculation
#[derive(Debug, thiserror::Error)]
pub enum DiscountError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Offer(#[from] OfferError),

    #[error(transparent)]
    Loyalty(#[from] LoyaltyError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<DiscountError> for ApiError {
    fn from(err: DiscountError) -> Self {
        match err {
            DiscountError::Validation(msg) => ApiError::bad_request("VALIDATION_ERROR", msg),
            DiscountError::Offer(e) => e.into(),
            DiscountError::Loyalty(e) => e.into(),
            DiscountError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

impl IntoResponse for DiscountError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
