use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_non_negative_decimal, validate_positive_decimal};

/// How an offer's `discount_value` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferDiscountType {
    /// Percentage of the remaining total
    Percentage,
    /// Flat currency amount
    FixedAmount,
    /// Redeemed through loyalty points, never through the offer list
    PointsExchange,
}

impl OfferDiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferDiscountType::Percentage => "PERCENTAGE",
            OfferDiscountType::FixedAmount => "FIXED_AMOUNT",
            OfferDiscountType::PointsExchange => "POINTS_EXCHANGE",
        }
    }
}

impl Default for OfferDiscountType {
    fn default() -> Self {
        OfferDiscountType::Percentage
    }
}

impl std::fmt::Display for OfferDiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A promotional offer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub discount_type: OfferDiscountType,
    #[schema(value_type = String, example = "10")]
    pub discount_value: Decimal,
    #[schema(value_type = Option<String>)]
    pub max_discount_amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub min_purchase_amount: Option<Decimal>,
    pub is_cumulative: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    /// Active and inside its date window (inclusive on both ends)
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.start_date <= now && now <= self.end_date
    }
}

/// Request DTO for `POST /api/offers`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub discount_type: OfferDiscountType,
    #[validate(custom = "validate_positive_decimal")]
    #[schema(value_type = String, example = "10")]
    pub discount_value: Decimal,
    #[validate(custom = "validate_non_negative_decimal")]
    #[schema(value_type = Option<String>)]
    pub max_discount_amount: Option<Decimal>,
    #[validate(custom = "validate_non_negative_decimal")]
    #[schema(value_type = Option<String>)]
    pub min_purchase_amount: Option<Decimal>,
    #[serde(default)]
    pub is_cumulative: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Request DTO for `PATCH /api/offers/:id/status`
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOfferStatusRequest {
    pub is_active: bool,
}
