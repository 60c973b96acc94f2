use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::offers::error::OfferError;
use crate::offers::models::{CreateOfferRequest, Offer};

const OFFER_COLUMNS: &str = "id, name, description, discount_type, discount_value, max_discount_amount, \
     min_purchase_amount, is_cumulative, start_date, end_date, is_active, created_at, updated_at";

/// Repository for offer records
#[derive(Clone)]
pub struct OfferRepository {
    pool: PgPool,
}

impl OfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, request: &CreateOfferRequest) -> Result<Offer, OfferError> {
        let sql = format!(
            r#"
            INSERT INTO offers (id, name, description, discount_type, discount_value, max_discount_amount,
                                min_purchase_amount, is_cumulative, start_date, end_date, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE)
            RETURNING {OFFER_COLUMNS}
            "#
        );
        let offer = sqlx::query_as::<_, Offer>(&sql)
            .bind(Uuid::new_v4())
            .bind(&request.name)
            .bind(&request.description)
            .bind(request.discount_type)
            .bind(request.discount_value)
            .bind(request.max_discount_amount)
            .bind(request.min_purchase_amount)
            .bind(request.is_cumulative)
            .bind(request.start_date)
            .bind(request.end_date)
            .fetch_one(&self.pool)
            .await?;

        Ok(offer)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, OfferError> {
        let sql = format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1");
        let offer = sqlx::query_as::<_, Offer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(offer)
    }

    /// Offers with the given IDs, in no particular order and regardless of validity
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Offer>, OfferError> {
        let sql = format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = ANY($1)");
        let offers = sqlx::query_as::<_, Offer>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(offers)
    }

    /// Active offers whose date window contains `now`
    pub async fn find_available(&self, now: DateTime<Utc>) -> Result<Vec<Offer>, OfferError> {
        let sql = format!(
            r#"
            SELECT {OFFER_COLUMNS}
            FROM offers
            WHERE is_active = TRUE AND start_date <= $1 AND end_date >= $1
            ORDER BY end_date
            "#
        );
        let offers = sqlx::query_as::<_, Offer>(&sql)
            .bind(now)
            .fetch_all(&self.pool)
            .await?;

        Ok(offers)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Offer, OfferError> {
        let sql = format!(
            r#"
            UPDATE offers
            SET is_active = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {OFFER_COLUMNS}
            "#
        );
        let offer = sqlx::query_as::<_, Offer>(&sql)
            .bind(is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(OfferError::NotFound(id))?;

        Ok(offer)
    }
}
