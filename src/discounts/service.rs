use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::discounts::engine::{calculate_order_discounts, DiscountContext};
use crate::discounts::error::DiscountError;
use crate::discounts::types::{DiscountRequest, DiscountResult};
use crate::loyalty::LoyaltyRepository;
use crate::offers::OfferService;

/// Order history lookups needed by the first-order rule
#[derive(Clone)]
pub struct DiscountRepository {
    pool: PgPool,
}

impl DiscountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Orders the customer has placed; flash drafts do not count
    pub async fn count_prior_orders(&self, user_id: Uuid) -> Result<i64, DiscountError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1 AND status <> 'DRAFT'")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

/// Gathers discount inputs and runs the engine
#[derive(Clone)]
pub struct DiscountService {
    repo: DiscountRepository,
    offers: OfferService,
    loyalty: LoyaltyRepository,
}

impl DiscountService {
    pub fn new(repo: DiscountRepository, offers: OfferService, loyalty: LoyaltyRepository) -> Self {
        Self { repo, offers, loyalty }
    }

    pub async fn calculate_order_discounts(&self, request: DiscountRequest) -> Result<DiscountResult, DiscountError> {
        if request.subtotal < Decimal::ZERO {
            return Err(DiscountError::Validation("subtotal must not be negative".to_string()));
        }
        let use_points = request.use_points.unwrap_or(0);
        if use_points < 0 {
            return Err(DiscountError::Validation("usePoints must not be negative".to_string()));
        }

        let prior_order_count = self.repo.count_prior_orders(request.user_id).await?;
        let active_offers = self
            .offers
            .find_valid_by_ids(&request.applied_offer_ids, Utc::now())
            .await?;
        let points_balance = if use_points > 0 {
            self.loyalty.get_balance(request.user_id).await?
        } else {
            0
        };

        let result = calculate_order_discounts(&DiscountContext {
            subtotal: request.subtotal,
            prior_order_count,
            active_offers: &active_offers,
            use_points,
            points_balance,
        });

        tracing::debug!(
            "Discounts for user {}: subtotal={}, discounts={}, total={}",
            request.user_id,
            result.subtotal,
            result.discounts.len(),
            result.total
        );

        Ok(result)
    }
}
