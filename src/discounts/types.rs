use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_non_negative_decimal;

/// Round a currency amount to cents, half away from zero as Postgres NUMERIC does
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Source of a discount line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    FirstOrder,
    Loyalty,
    AdminOffer,
}

/// One applied discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    #[schema(value_type = String, example = "9.00")]
    pub amount: Decimal,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<Uuid>,
}

/// Subtotal, applied discounts in evaluation order, and the resulting total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResult {
    #[schema(value_type = String, example = "60.00")]
    pub subtotal: Decimal,
    pub discounts: Vec<Discount>,
    #[schema(value_type = String, example = "51.00")]
    pub total: Decimal,
}

impl DiscountResult {
    pub fn total_discount(&self) -> Decimal {
        self.discounts.iter().map(|d| d.amount).sum()
    }

    pub fn loyalty_applied(&self) -> bool {
        self.discounts.iter().any(|d| d.kind == DiscountKind::Loyalty)
    }
}

/// Request DTO for `POST /api/discounts/preview`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPreviewRequest {
    #[validate(custom = "validate_non_negative_decimal")]
    #[schema(value_type = String, example = "60.00")]
    pub subtotal: Decimal,
    #[validate(range(min = 0, message = "usePoints must not be negative"))]
    pub use_points: Option<i64>,
    #[serde(default)]
    pub applied_offer_ids: Vec<Uuid>,
}

/// Inputs gathered for one discount calculation
#[derive(Debug, Clone)]
pub struct DiscountRequest {
    pub user_id: Uuid,
    pub subtotal: Decimal,
    pub use_points: Option<i64>,
    pub applied_offer_ids: Vec<Uuid>,
}
