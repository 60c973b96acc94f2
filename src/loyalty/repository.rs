use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::loyalty::{LoyaltyAccount, LoyaltyError};

/// Repository for loyalty point balances
#[derive(Clone)]
pub struct LoyaltyRepository {
    pool: PgPool,
}

impl LoyaltyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Current balance; 0 when the user has no loyalty row yet
    pub async fn get_balance(&self, user_id: Uuid) -> Result<i64, LoyaltyError> {
        let balance: Option<i64> =
            sqlx::query_scalar("SELECT points_balance FROM loyalty_points WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(balance.unwrap_or(0))
    }

    /// Add points to both the balance and the lifetime counter
    pub async fn credit_points(&self, user_id: Uuid, points: i64) -> Result<LoyaltyAccount, LoyaltyError> {
        if points <= 0 {
            return Err(LoyaltyError::InvalidAmount);
        }

        let account = sqlx::query_as::<_, LoyaltyAccount>(
            r#"
            INSERT INTO loyalty_points (user_id, points_balance, lifetime_points, updated_at)
            VALUES ($1, $2, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET points_balance = loyalty_points.points_balance + EXCLUDED.points_balance,
                lifetime_points = loyalty_points.lifetime_points + EXCLUDED.lifetime_points,
                updated_at = NOW()
            RETURNING user_id, points_balance, lifetime_points, updated_at
            "#,
        )
        .bind(user_id)
        .bind(points)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Credited {} loyalty points to user {}", points, user_id);
        Ok(account)
    }
}

/// Remove points inside the caller's transaction
///
/// The balance check and the decrement happen in one statement.
pub async fn debit_points(conn: &mut PgConnection, user_id: Uuid, points: i64) -> Result<i64, LoyaltyError> {
    if points <= 0 {
        return Err(LoyaltyError::InvalidAmount);
    }

    let remaining: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE loyalty_points
        SET points_balance = points_balance - $2, updated_at = NOW()
        WHERE user_id = $1 AND points_balance >= $2
        RETURNING points_balance
        "#,
    )
    .bind(user_id)
    .bind(points)
    .fetch_optional(&mut *conn)
    .await?;

    match remaining {
        Some(balance) => {
            tracing::info!("Debited {} loyalty points from user {}", points, user_id);
            Ok(balance)
        }
        None => {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT points_balance FROM loyalty_points WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_optional(&mut *conn)
                    .await?;
            Err(LoyaltyError::InsufficientPoints {
                requested: points,
                available: available.unwrap_or(0),
            })
        }
    }
}
