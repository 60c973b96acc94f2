use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::error::CatalogError;
use crate::catalog::models::{ArticleServicePrice, WeightPricingTier};

/// Repository for article prices and weight tiers
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Available price row for an (article, service, service type) combination
    pub async fn find_available_price(
        &self,
        article_id: Uuid,
        service_id: Uuid,
        service_type_id: Uuid,
    ) -> Result<Option<ArticleServicePrice>, CatalogError> {
        let entry = sqlx::query_as::<_, ArticleServicePrice>(
            r#"
            SELECT id, article_id, service_id, service_type_id, base_price, premium_price, is_available
            FROM article_service_prices
            WHERE article_id = $1 AND service_id = $2 AND service_type_id = $3 AND is_available = TRUE
            "#,
        )
        .bind(article_id)
        .bind(service_id)
        .bind(service_type_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn find_prices_for_article(&self, article_id: Uuid) -> Result<Vec<ArticleServicePrice>, CatalogError> {
        let entries = sqlx::query_as::<_, ArticleServicePrice>(
            r#"
            SELECT id, article_id, service_id, service_type_id, base_price, premium_price, is_available
            FROM article_service_prices
            WHERE article_id = $1
            ORDER BY service_id, service_type_id
            "#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn find_active_tiers(&self, service_type_id: Uuid) -> Result<Vec<WeightPricingTier>, CatalogError> {
        let tiers = sqlx::query_as::<_, WeightPricingTier>(
            r#"
            SELECT id, service_type_id, min_weight, max_weight, price_per_kg, is_active, created_at, updated_at
            FROM weight_based_pricing
            WHERE service_type_id = $1 AND is_active = TRUE
            ORDER BY min_weight
            "#,
        )
        .bind(service_type_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tiers)
    }

    pub async fn insert_tier(
        &self,
        service_type_id: Uuid,
        min_weight: Decimal,
        max_weight: Decimal,
        price_per_kg: Decimal,
    ) -> Result<WeightPricingTier, CatalogError> {
        let tier = sqlx::query_as::<_, WeightPricingTier>(
            r#"
            INSERT INTO weight_based_pricing (id, service_type_id, min_weight, max_weight, price_per_kg, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING id, service_type_id, min_weight, max_weight, price_per_kg, is_active, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(service_type_id)
        .bind(min_weight)
        .bind(max_weight)
        .bind(price_per_kg)
        .fetch_one(&self.pool)
        .await?;

        Ok(tier)
    }
}
