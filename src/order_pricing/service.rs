use chrono::Utc;
use uuid::Uuid;

use crate::order_pricing::calculator::{apply_change, compute_pricing, PricingChange};
use crate::order_pricing::error::PricingError;
use crate::order_pricing::models::OrderPricingResponse;
use crate::order_pricing::repository::OrderPricingRepository;
use crate::orders::OrdersRepository;

/// Service for admin price overrides and the paid flag
#[derive(Clone)]
pub struct OrderPricingService {
    repo: OrderPricingRepository,
    orders: OrdersRepository,
}

impl OrderPricingService {
    pub fn new(repo: OrderPricingRepository, orders: OrdersRepository) -> Self {
        Self { repo, orders }
    }

    pub async fn get_pricing(&self, order_id: Uuid) -> Result<OrderPricingResponse, PricingError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(PricingError::OrderNotFound(order_id))?;
        let stored = self.repo.find_by_order_id(order_id).await?;

        let calculation = compute_pricing(order.total_amount, stored.as_ref().and_then(|p| p.manual_price));
        Ok(OrderPricingResponse::new(order_id, calculation, stored.as_ref()))
    }

    /// Apply one change and return the recomputed pricing
    pub async fn apply(&self, order_id: Uuid, admin_id: Uuid, change: PricingChange) -> Result<OrderPricingResponse, PricingError> {
        change.validate().map_err(PricingError::Validation)?;

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(PricingError::OrderNotFound(order_id))?;
        let existing = self.repo.find_by_order_id(order_id).await?;

        let record = apply_change(order_id, existing, change, admin_id, Utc::now());
        let saved = self.repo.upsert(&record).await?;

        tracing::info!(
            "Pricing for order {} updated by {}: manual_price={:?}, is_paid={}",
            order_id,
            admin_id,
            saved.manual_price,
            saved.is_paid
        );

        let calculation = compute_pricing(order.total_amount, saved.manual_price);
        Ok(OrderPricingResponse::new(order_id, calculation, Some(&saved)))
    }
}
