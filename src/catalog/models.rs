use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_non_negative_decimal, validate_positive_decimal};

/// Price of one article under one service and service type
///
/// Absence of an available row means the combination is not offered.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleServicePrice {
    pub id: Uuid,
    pub article_id: Uuid,
    pub service_id: Uuid,
    pub service_type_id: Uuid,
    #[schema(value_type = String, example = "15.00")]
    pub base_price: Decimal,
    #[schema(value_type = Option<String>, example = "22.50")]
    pub premium_price: Option<Decimal>,
    pub is_available: bool,
}

/// Per-kilogram price for a `[min_weight, max_weight)` range of one service type
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeightPricingTier {
    pub id: Uuid,
    pub service_type_id: Uuid,
    #[schema(value_type = String, example = "0")]
    pub min_weight: Decimal,
    #[schema(value_type = String, example = "5")]
    pub max_weight: Decimal,
    #[schema(value_type = String, example = "4.50")]
    pub price_per_kg: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for `POST /api/services/calculate-price`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculatePriceRequest {
    pub article_id: Uuid,
    pub service_id: Uuid,
    pub service_type_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    /// Kilograms, for weight-priced service types
    #[validate(custom = "validate_positive_decimal")]
    #[schema(value_type = Option<String>, example = "3.5")]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub is_premium: bool,
}

/// Request DTO for `POST /api/weight-pricing`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWeightTierRequest {
    pub service_type_id: Uuid,
    #[validate(custom = "validate_non_negative_decimal")]
    #[schema(value_type = String, example = "0")]
    pub min_weight: Decimal,
    #[validate(custom = "validate_positive_decimal")]
    #[schema(value_type = String, example = "5")]
    pub max_weight: Decimal,
    #[validate(custom = "validate_positive_decimal")]
    #[schema(value_type = String, example = "4.50")]
    pub price_per_kg: Decimal,
}

/// Kind of a price breakdown line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakdownKind {
    Item,
    Weight,
}

/// One line of a price quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdownEntry {
    #[serde(rename = "type")]
    pub kind: BreakdownKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub weight: Option<Decimal>,
    /// Price per unit for items, per kilogram for weight lines
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub cost: Decimal,
}

/// Response DTO for `calculate-price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    #[schema(value_type = String, example = "60.00")]
    pub total: Decimal,
    pub breakdown: Vec<PriceBreakdownEntry>,
}
