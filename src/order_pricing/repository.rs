use sqlx::PgPool;
use uuid::Uuid;

use crate::order_pricing::error::PricingError;
use crate::order_pricing::models::OrderPricing;

/// Repository for `order_pricing` rows
#[derive(Clone)]
pub struct OrderPricingRepository {
    pool: PgPool,
}

impl OrderPricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_order_id(&self, order_id: Uuid) -> Result<Option<OrderPricing>, PricingError> {
        let pricing = sqlx::query_as::<_, OrderPricing>(
            r#"
            SELECT order_id, manual_price, is_paid, paid_at, reason, updated_by, updated_at
            FROM order_pricing
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pricing)
    }

    /// Insert or replace the row for `record.order_id`; last write wins
    pub async fn upsert(&self, record: &OrderPricing) -> Result<OrderPricing, PricingError> {
        let pricing = sqlx::query_as::<_, OrderPricing>(
            r#"
            INSERT INTO order_pricing (order_id, manual_price, is_paid, paid_at, reason, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (order_id) DO UPDATE
            SET manual_price = EXCLUDED.manual_price,
                is_paid = EXCLUDED.is_paid,
                paid_at = EXCLUDED.paid_at,
                reason = EXCLUDED.reason,
                updated_by = EXCLUDED.updated_by,
                updated_at = EXCLUDED.updated_at
            RETURNING order_id, manual_price, is_paid, paid_at, reason, updated_by, updated_at
            "#,
        )
        .bind(record.order_id)
        .bind(record.manual_price)
        .bind(record.is_paid)
        .bind(record.paid_at)
        .bind(&record.reason)
        .bind(record.updated_by)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(pricing)
    }
}
