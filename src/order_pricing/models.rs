use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Stored override for one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderPricing {
    pub order_id: Uuid,
    pub manual_price: Option<Decimal>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for `PATCH /api/orders/:order_id/pricing`
///
/// Field names stay snake_case on the wire.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePricingRequest {
    #[schema(value_type = Option<String>, example = "800.00")]
    pub manual_price: Option<Decimal>,
    pub is_paid: Option<bool>,
    pub reason: Option<String>,
}

/// Optional reason for mark-paid / mark-unpaid
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaymentFlagRequest {
    pub reason: Option<String>,
}

/// Display price and discount derived from the original and manual prices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingCalculation {
    pub original_price: Decimal,
    pub manual_price: Option<Decimal>,
    pub display_price: Decimal,
    pub discount: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPricingResponse {
    pub order_id: Uuid,
    #[schema(value_type = String, example = "1000.00")]
    pub original_price: Decimal,
    #[schema(value_type = Option<String>, example = "800.00")]
    pub manual_price: Option<Decimal>,
    #[schema(value_type = String, example = "800.00")]
    pub display_price: Decimal,
    /// Positive for a reduction, negative for an increase
    #[schema(value_type = Option<String>, example = "200.00")]
    pub discount: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "20.00")]
    pub discount_percentage: Option<Decimal>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderPricingResponse {
    pub fn new(order_id: Uuid, calculation: PricingCalculation, stored: Option<&OrderPricing>) -> Self {
        Self {
            order_id,
            original_price: calculation.original_price,
            manual_price: calculation.manual_price,
            display_price: calculation.display_price,
            discount: calculation.discount,
            discount_percentage: calculation.discount_percentage,
            is_paid: stored.map(|p| p.is_paid).unwrap_or(false),
            paid_at: stored.and_then(|p| p.paid_at),
            reason: stored.and_then(|p| p.reason.clone()),
            updated_by: stored.map(|p| p.updated_by),
            updated_at: stored.map(|p| p.updated_at),
        }
    }
}
