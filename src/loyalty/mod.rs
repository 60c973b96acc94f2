// Loyalty points: balance lookup, crediting on delivery, debiting on redemption

pub mod handlers;
pub mod repository;

pub use handlers::*;
pub use repository::*;

use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;

/// Points needed for one currency unit of discount
pub const POINTS_PER_CURRENCY_UNIT: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyAccount {
    pub user_id: Uuid,
    pub points_balance: i64,
    pub lifetime_points: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyBalanceResponse {
    pub user_id: Uuid,
    pub points_balance: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum LoyaltyError {
    #[error("Insufficient loyalty points: requested {requested}, available {available}")]
    InsufficientPoints { requested: i64, available: i64 },

    #[error("Points amount must be positive")]
    InvalidAmount,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<LoyaltyError> for ApiError {
    fn from(err: LoyaltyError) -> Self {
        match err {
            LoyaltyError::InsufficientPoints { .. } => ApiError::Conflict {
                message: err.to_string(),
            },
            LoyaltyError::InvalidAmount => ApiError::bad_request("VALIDATION_ERROR", err.to_string()),
            LoyaltyError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

impl IntoResponse for LoyaltyError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Points earned for an order total: one point per whole currency unit
pub fn points_for_amount(amount: Decimal) -> i64 {
    if amount <= Decimal::ZERO {
        return 0;
    }
    amount.floor().to_i64().unwrap_or(i64::MAX)
}

/// Points credited on delivery, from the manual price when one overrides the total
pub fn delivery_points(total_amount: Decimal, manual_price: Option<Decimal>) -> i64 {
    points_for_amount(manual_price.unwrap_or(total_amount))
}

/// Currency value of a number of points
pub fn points_value(points: i64) -> Decimal {
    Decimal::from(points) / Decimal::from(POINTS_PER_CURRENCY_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_points_for_amount_floors() {
        assert_eq!(points_for_amount(dec!(59.99)), 59);
        assert_eq!(points_for_amount(dec!(60)), 60);
        assert_eq!(points_for_amount(dec!(0.4)), 0);
        assert_eq!(points_for_amount(dec!(-5)), 0);
    }

    #[test]
    fn test_delivery_points_follow_manual_price() {
        assert_eq!(delivery_points(dec!(1000), Some(dec!(800))), 800);
        assert_eq!(delivery_points(dec!(1000), None), 1000);
        assert_eq!(delivery_points(dec!(50), Some(dec!(0))), 0);
    }

    #[test]
    fn test_points_value() {
        assert_eq!(points_value(250), dec!(2.5));
        assert_eq!(points_value(0), dec!(0));
    }

    #[test]
    fn test_insufficient_points_is_conflict() {
        let api = ApiError::from(LoyaltyError::InsufficientPoints { requested: 500, available: 10 });
        assert_eq!(api.status_code(), axum::http::StatusCode::CONFLICT);
    }
}
