use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::loyalty;
use crate::orders::error::OrderError;
use crate::orders::flash::FlashCompletion;
use crate::orders::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, StatusMachine};

const ORDER_COLUMNS: &str = "id, user_id, address_id, service_id, service_type_id, status, is_flash_order, \
     subtotal, total_amount, collection_date, delivery_date, note, created_at, updated_at";

async fn insert_items(
    conn: &mut sqlx::PgConnection,
    order_id: Uuid,
    items: &[NewOrderItem],
) -> Result<(), OrderError> {
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, article_id, service_id, quantity, unit_price, is_premium)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(item.article_id)
        .bind(item.service_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.is_premium)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Repository for order operations
#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a PENDING order with its items; debits redeemed points in the same transaction
    pub async fn create_with_items(
        &self,
        order: NewOrder,
        items: &[NewOrderItem],
        redeemed_points: i64,
    ) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        if redeemed_points > 0 {
            loyalty::debit_points(&mut tx, order.user_id, redeemed_points).await?;
        }

        let sql = format!(
            r#"
            INSERT INTO orders (id, user_id, address_id, service_id, service_type_id, status, is_flash_order,
                                subtotal, total_amount, collection_date, delivery_date, note)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8, $9, $10, $11)
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Order>(&sql)
            .bind(Uuid::new_v4())
            .bind(order.user_id)
            .bind(order.address_id)
            .bind(order.service_id)
            .bind(order.service_type_id)
            .bind(OrderStatus::Pending)
            .bind(order.subtotal)
            .bind(order.total_amount)
            .bind(order.collection_date)
            .bind(order.delivery_date)
            .bind(&order.note)
            .fetch_one(&mut *tx)
            .await?;

        insert_items(&mut tx, created.id, items).await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Store a flash order in DRAFT with a zero total
    pub async fn create_draft(&self, user_id: Uuid, address_id: Uuid, note: Option<String>) -> Result<Order, OrderError> {
        let sql = format!(
            r#"
            INSERT INTO orders (id, user_id, address_id, status, is_flash_order, subtotal, total_amount, note)
            VALUES ($1, $2, $3, $4, TRUE, 0, 0, $5)
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(address_id)
            .bind(OrderStatus::Draft)
            .bind(note)
            .fetch_one(&self.pool)
            .await?;

        Ok(order)
    }

    /// Write items, totals, dates and PENDING status for a DRAFT order in one transaction
    ///
    /// The status guard in the UPDATE rejects a concurrent completion of the same draft.
    pub async fn complete_flash(&self, order_id: Uuid, completion: &FlashCompletion) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            UPDATE orders
            SET status = $1, service_id = $2, service_type_id = $3, subtotal = $4, total_amount = $4,
                collection_date = $5, delivery_date = $6, updated_at = NOW()
            WHERE id = $7 AND status = $8
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(OrderStatus::Pending)
            .bind(completion.service_id)
            .bind(completion.service_type_id)
            .bind(completion.total_amount)
            .bind(completion.collection_date)
            .bind(completion.delivery_date)
            .bind(order_id)
            .bind(OrderStatus::Draft)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| OrderError::InvalidOrderState("Order is no longer a draft".to_string()))?;

        insert_items(&mut tx, order.id, &completion.items).await?;

        tx.commit().await?;

        Ok(order)
    }

    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Orders of one user, newest first, optionally filtered by status
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
        status: Option<OrderStatus>,
        include_drafts: bool,
    ) -> Result<Vec<Order>, OrderError> {
        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3 OR status <> 'DRAFT')
            ORDER BY created_at DESC
            "#
        );
        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(user_id)
            .bind(status)
            .bind(include_drafts)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Flash orders still waiting for staff completion, oldest first
    pub async fn find_flash_drafts(&self) -> Result<Vec<Order>, OrderError> {
        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE is_flash_order = TRUE AND status = 'DRAFT'
            ORDER BY created_at
            "#
        );
        let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(&self.pool).await?;

        Ok(orders)
    }

    /// Write a new status only if the order still has `expected`
    pub async fn update_status(
        &self,
        order_id: Uuid,
        expected: OrderStatus,
        new_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let sql = format!(
            r#"
            UPDATE orders
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND status = $3
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(new_status)
            .bind(order_id)
            .bind(expected)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| OrderError::InvalidTransition(StatusMachine::stale_status(expected, new_status)))?;

        Ok(order)
    }

    /// Manual price override for an order, if an admin set one
    pub async fn find_manual_price(&self, order_id: Uuid) -> Result<Option<Decimal>, OrderError> {
        let manual_price: Option<Option<Decimal>> =
            sqlx::query_scalar("SELECT manual_price FROM order_pricing WHERE order_id = $1")
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(manual_price.flatten())
    }
}

/// Repository for order items operations
#[derive(Clone)]
pub struct OrderItemsRepository {
    pool: PgPool,
}

impl OrderItemsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<OrderItem>, OrderError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, article_id, service_id, quantity, unit_price, is_premium
            FROM order_items
            WHERE order_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
