use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::discounts::DiscountResult;

/// Order status enum representing the lifecycle of a laundry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Draft,
    Pending,
    Accepted,
    PickedUp,
    InProgress,
    Ready,
    Delivering,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::Draft,
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::PickedUp,
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "DRAFT",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::PickedUp => "PICKED_UP",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivering => "DELIVERING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid order status: {}", s))
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing an order in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub service_id: Option<Uuid>,
    pub service_type_id: Option<Uuid>,
    pub status: OrderStatus,
    pub is_flash_order: bool,
    pub subtotal: Decimal,
    pub total_amount: Decimal,
    pub collection_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Domain model representing an item within an order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub article_id: Uuid,
    pub service_id: Option<Uuid>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub is_premium: bool,
}

/// Priced line ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub article_id: Uuid,
    pub service_id: Option<Uuid>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub is_premium: bool,
}

/// Order row ready to be stored in PENDING
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub service_id: Uuid,
    pub service_type_id: Uuid,
    pub subtotal: Decimal,
    pub total_amount: Decimal,
    pub collection_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

/// Largest quantity accepted on a single order line
pub const MAX_ITEM_QUANTITY: i32 = 10_000;

/// One article line when placing an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    pub article_id: Uuid,
    #[validate(range(min = 1, max = 10000, message = "Quantity must be between 1 and 10000"))]
    pub quantity: i32,
    #[serde(default)]
    pub is_premium: bool,
}

/// Request DTO for `POST /api/orders`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub address_id: Uuid,
    pub service_id: Uuid,
    pub service_type_id: Uuid,
    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    #[validate]
    pub items: Vec<CreateOrderItemRequest>,
    pub collection_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
    #[serde(default)]
    pub offer_ids: Vec<Uuid>,
    #[validate(range(min = 0, message = "usePoints must not be negative"))]
    pub use_points: Option<i64>,
}

/// Request DTO for `POST /api/orders/flash`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlashOrderRequest {
    pub address_id: Uuid,
    #[serde(alias = "notes")]
    #[validate(length(max = 1000))]
    pub note: Option<String>,
}

/// One line supplied by staff when completing a flash order
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlashOrderItemRequest {
    pub article_id: Uuid,
    pub quantity: i32,
    #[schema(value_type = String, example = "15.00")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub is_premium: bool,
}

/// Request DTO for `PATCH /api/orders/flash/:order_id/complete`
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteFlashOrderRequest {
    pub service_id: Option<Uuid>,
    pub service_type_id: Option<Uuid>,
    #[serde(default)]
    pub items: Vec<FlashOrderItemRequest>,
    pub collection_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
}

/// Request DTO for updating order status
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Query parameters for order history
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderHistoryQuery {
    /// Optional status filter
    pub status: Option<OrderStatus>,
    /// Include flash orders still in DRAFT
    pub include_drafts: Option<bool>,
}

/// Response DTO for order with items
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub service_id: Option<Uuid>,
    pub service_type_id: Option<Uuid>,
    pub status: OrderStatus,
    pub is_flash_order: bool,
    pub is_draft: bool,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub collection_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderResponse {
    pub fn from_parts(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            address_id: order.address_id,
            service_id: order.service_id,
            service_type_id: order.service_type_id,
            is_flash_order: order.is_flash_order || order.status == OrderStatus::Draft,
            is_draft: order.status == OrderStatus::Draft,
            status: order.status,
            subtotal: order.subtotal,
            total_amount: order.total_amount,
            collection_date: order.collection_date,
            delivery_date: order.delivery_date,
            note: order.note,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Response DTO for order item
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub article_id: Uuid,
    pub service_id: Option<Uuid>,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    pub is_premium: bool,
    #[schema(value_type = String)]
    pub line_total: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            line_total: Decimal::from(item.quantity) * item.unit_price,
            id: item.id,
            article_id: item.article_id,
            service_id: item.service_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            is_premium: item.is_premium,
        }
    }
}

/// Response DTO for `POST /api/orders`
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrderResponse {
    pub order: OrderResponse,
    pub pricing: DiscountResult,
    pub points_redeemed: i64,
}
