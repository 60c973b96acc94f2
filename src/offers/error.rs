use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::error::ApiError;

/// Error types for offer operations
#[derive(Debug, thiserror::Error)]
pub enum OfferError {
    #[error("Offer not found")]
    NotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<OfferError> for ApiError {
    fn from(err: OfferError) -> Self {
        match err {
            OfferError::NotFound(id) => ApiError::not_found("Offer", id),
            OfferError::Validation(msg) => ApiError::bad_request("VALIDATION_ERROR", msg),
            OfferError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

impl IntoResponse for OfferError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
